//! Prelude module for common re-exports.
//!
//! ```rust
//! use arbiter_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ArbiterConfig, ConfigError, ConfigLoader, ControllerConfig, LogLevel, SharedConfig,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{MAX_INPUT_CHANNELS, TARGET_LOSS_TIMEOUT_DEFAULT};

// ─── Modes & Output ─────────────────────────────────────────────────
pub use crate::error::InputFormatError;
pub use crate::mode::{ButtonIntents, OperatingMode};
pub use crate::output::{ControllerOutput, Vector3, Velocity};
