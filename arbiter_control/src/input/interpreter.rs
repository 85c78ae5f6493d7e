//! Rising-edge button interpretation.
//!
//! Converts a raw input frame (one bool per physical control) into
//! [`ButtonIntents`]. An intent fires only on the frame where its control
//! goes from released to pressed. Holding a control yields one intent.
//!
//! The previous-frame snapshot starts as "all released", so a control that
//! is already held on the very first frame counts as a fresh press.

use arbiter_common::config::ControllerConfig;
use arbiter_common::error::InputFormatError;
use arbiter_common::mode::ButtonIntents;

/// Channel indices of the three logical controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMap {
    pub idle: usize,
    pub follow: usize,
    pub teleop: usize,
}

impl ChannelMap {
    /// Minimum frame length containing every mapped channel.
    #[inline]
    pub fn required_len(&self) -> usize {
        self.idle.max(self.follow).max(self.teleop) + 1
    }
}

impl From<&ControllerConfig> for ChannelMap {
    fn from(config: &ControllerConfig) -> Self {
        Self {
            idle: config.idle_button,
            follow: config.follow_button,
            teleop: config.teleop_button,
        }
    }
}

/// Pressed state of the mapped controls on one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PressedSnapshot {
    idle: bool,
    follow: bool,
    teleop: bool,
}

/// Edge detector over successive input frames.
#[derive(Debug, Clone)]
pub struct InputInterpreter {
    channels: ChannelMap,
    previous: PressedSnapshot,
}

impl InputInterpreter {
    pub fn new(channels: ChannelMap) -> Self {
        Self {
            channels,
            previous: PressedSnapshot::default(),
        }
    }

    /// Derive intents from `frame` and remember it as the previous frame.
    ///
    /// # Errors
    ///
    /// `InputFormatError::FrameTooShort` if the frame lacks a mapped channel.
    /// The snapshot is left untouched in that case.
    pub fn interpret(&mut self, frame: &[bool]) -> Result<ButtonIntents, InputFormatError> {
        let required = self.channels.required_len();
        if frame.len() < required {
            return Err(InputFormatError::FrameTooShort {
                len: frame.len(),
                required,
            });
        }

        let current = PressedSnapshot {
            idle: frame[self.channels.idle],
            follow: frame[self.channels.follow],
            teleop: frame[self.channels.teleop],
        };

        let intents = ButtonIntents {
            request_idle: current.idle && !self.previous.idle,
            request_follow: current.follow && !self.previous.follow,
            request_teleop: current.teleop && !self.previous.teleop,
        };

        self.previous = current;
        Ok(intents)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
