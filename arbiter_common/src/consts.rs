//! System-wide constants for the arbiter workspace.
//!
//! Single source of truth for the default channel mapping and the
//! loss-of-target timeout bounds.

/// Maximum number of channels an input frame may address.
pub const MAX_INPUT_CHANNELS: usize = 32;

/// Default channel of the "request idle" control.
pub const DEFAULT_IDLE_BUTTON: usize = 3;

/// Default channel of the "request follow" control.
pub const DEFAULT_FOLLOW_BUTTON: usize = 1;

/// Default channel of the "request teleop" control.
pub const DEFAULT_TELEOP_BUTTON: usize = 0;

/// Follow → Idle after this long without seeing the target [s].
pub const TARGET_LOSS_TIMEOUT_DEFAULT: f64 = 5.0;

/// Lower bound of the loss-of-target timeout [s].
pub const TARGET_LOSS_TIMEOUT_MIN: f64 = 0.0;

/// Upper bound of the loss-of-target timeout [s].
pub const TARGET_LOSS_TIMEOUT_MAX: f64 = 600.0;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "config/arbiter.toml";
