//! Operating mode enum and per-frame button intents.
//!
//! `OperatingMode` uses `#[repr(u8)]` so the discriminant doubles as the
//! indicator code. The label, the code and the mode can therefore never
//! disagree.

use serde::{Deserialize, Serialize};

/// Robot operating mode.
///
/// Exactly one mode is active at any time. There is no terminal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum OperatingMode {
    /// Holding still. Initial mode.
    #[default]
    Idle = 0,
    /// Autonomously following a visible target.
    Follow = 1,
    /// Manual teleoperation.
    Teleop = 2,
}

impl OperatingMode {
    /// Status-light code: Idle = 0, Follow = 1, Teleop = 2.
    #[inline]
    pub const fn indicator_code(self) -> i32 {
        self as u8 as i32
    }

    /// Mode label as published on the mode channel.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Follow => "FOLLOW",
            Self::Teleop => "TELEOP",
        }
    }
}

impl std::fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Logical intents derived from one input frame.
///
/// Each flag is true only on the frame where its control went from
/// released to pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonIntents {
    pub request_idle: bool,
    pub request_follow: bool,
    pub request_teleop: bool,
}

impl ButtonIntents {
    /// No control was just pressed.
    pub const NONE: Self = Self {
        request_idle: false,
        request_follow: false,
        request_teleop: false,
    };

    /// Returns true if any intent is raised.
    #[inline]
    pub const fn any(&self) -> bool {
        self.request_idle || self.request_follow || self.request_teleop
    }
}
