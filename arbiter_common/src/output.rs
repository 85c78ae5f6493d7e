//! Controller output types.
//!
//! `ControllerOutput` is emitted once per processed input frame. It is only
//! ever built from a mode via [`ControllerOutput::for_mode`], which keeps the
//! indicator code and the idle velocity consistent with the mode.

use serde::{Deserialize, Serialize};

use crate::mode::OperatingMode;

/// Three-component vector [m/s or rad/s].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Linear + angular velocity command.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub linear: Vector3,
    pub angular: Vector3,
}

impl Velocity {
    /// Hold-still command.
    pub const ZERO: Self = Self {
        linear: Vector3::ZERO,
        angular: Vector3::ZERO,
    };

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Output emitted for every processed input frame.
///
/// Fields are private: [`for_mode`](Self::for_mode) is the only way to build
/// one, so the indicator code, idle flag and idle velocity always agree with
/// the mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControllerOutput {
    mode: OperatingMode,
    indicator_code: i32,
    idle: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    idle_velocity: Option<Velocity>,
}

impl ControllerOutput {
    /// Build the output for a mode.
    pub const fn for_mode(mode: OperatingMode) -> Self {
        let idle_velocity = match mode {
            OperatingMode::Idle => Some(Velocity::ZERO),
            OperatingMode::Follow | OperatingMode::Teleop => None,
        };
        Self {
            mode,
            indicator_code: mode.indicator_code(),
            idle: idle_velocity.is_some(),
            idle_velocity,
        }
    }

    /// Current mode (after the transition step).
    #[inline]
    pub const fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// Status-light code, always `mode.indicator_code()`.
    #[inline]
    pub const fn indicator_code(&self) -> i32 {
        self.indicator_code
    }

    /// Idle assertion flag: true iff the output holds the robot still.
    #[inline]
    pub const fn is_idle(&self) -> bool {
        self.idle
    }

    /// Zero velocity in Idle, absent otherwise.
    #[inline]
    pub const fn idle_velocity(&self) -> Option<Velocity> {
        self.idle_velocity
    }
}
