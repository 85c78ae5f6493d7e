//! Mode controller: owns the operating mode and target visibility.
//!
//! Two entry points, both applied one at a time by a single owner:
//!
//! - [`ModeController::process_frame`] interprets an input frame and runs
//!   exactly one transition step, then returns the output to publish.
//! - [`ModeController::update_target`] records target visibility. It never
//!   changes the mode; the loss-of-target timeout is evaluated at the next
//!   input frame.
//!
//! A malformed frame is rejected before any state is touched.

use std::time::{Duration, Instant};

use arbiter_common::config::{ConfigError, ControllerConfig};
use arbiter_common::error::InputFormatError;
use arbiter_common::mode::OperatingMode;
use arbiter_common::output::ControllerOutput;
use tracing::{debug, info};

use crate::clock::{Clock, MonotonicClock};
use crate::input::interpreter::{ChannelMap, InputInterpreter};
use crate::mode::transition::{ModeTransition, TargetSnapshot, TransitionReason, next_mode};

/// Target visibility flag and the last time the target was seen.
///
/// `last_seen` is set only by visible reports, so it freezes at the last
/// visible report once the target is lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetVisibility {
    pub visible: bool,
    pub last_seen: Option<Instant>,
}

impl TargetVisibility {
    /// Snapshot for a transition step at `now`.
    ///
    /// A target that was never seen counts as unseen forever.
    pub fn snapshot(&self, now: Instant) -> TargetSnapshot {
        if self.visible {
            return TargetSnapshot::VISIBLE;
        }
        let unseen_for = self
            .last_seen
            .map_or(Duration::MAX, |seen| now.saturating_duration_since(seen));
        TargetSnapshot::lost_for(unseen_for)
    }
}

/// Most recent mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    pub from: OperatingMode,
    pub to: OperatingMode,
    pub reason: TransitionReason,
    pub at: Instant,
}

/// Idle / Follow / Teleop state machine.
#[derive(Debug)]
pub struct ModeController<C: Clock = MonotonicClock> {
    interpreter: InputInterpreter,
    mode: OperatingMode,
    target: TargetVisibility,
    loss_timeout: Duration,
    clock: C,
    last_transition: Option<TransitionRecord>,
}

impl ModeController<MonotonicClock> {
    /// Controller on the system monotonic clock.
    pub fn with_monotonic_clock(config: &ControllerConfig) -> Result<Self, ConfigError> {
        Self::new(config, MonotonicClock)
    }
}

impl<C: Clock> ModeController<C> {
    /// Create a controller in Idle with no target seen.
    ///
    /// # Errors
    ///
    /// `ConfigError::ValidationError` if the config is invalid.
    pub fn new(config: &ControllerConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            interpreter: InputInterpreter::new(ChannelMap::from(config)),
            mode: OperatingMode::Idle,
            target: TargetVisibility::default(),
            loss_timeout: config.loss_timeout(),
            clock,
            last_transition: None,
        })
    }

    #[inline]
    pub const fn mode(&self) -> OperatingMode {
        self.mode
    }

    #[inline]
    pub const fn target(&self) -> &TargetVisibility {
        &self.target
    }

    #[inline]
    pub const fn loss_timeout(&self) -> Duration {
        self.loss_timeout
    }

    #[inline]
    pub const fn last_transition(&self) -> Option<&TransitionRecord> {
        self.last_transition.as_ref()
    }

    /// Output for the current mode.
    #[inline]
    pub const fn output(&self) -> ControllerOutput {
        ControllerOutput::for_mode(self.mode)
    }

    /// Record a target visibility report.
    ///
    /// A visible report refreshes `last_seen`. The mode is not touched.
    pub fn update_target(&mut self, visible: bool) {
        if visible != self.target.visible {
            debug!(visible, mode = %self.mode, "target visibility changed");
        }
        self.target.visible = visible;
        if visible {
            self.target.last_seen = Some(self.clock.now());
        }
    }

    /// Interpret one input frame and apply one transition step.
    ///
    /// Returns the output for the resulting mode. Outputs are produced on
    /// every frame, including self-transitions.
    ///
    /// # Errors
    ///
    /// `InputFormatError` if the frame is too short. Mode, visibility and the
    /// edge-detection snapshot are unchanged.
    pub fn process_frame(&mut self, frame: &[bool]) -> Result<ControllerOutput, InputFormatError> {
        let intents = self.interpreter.interpret(frame)?;
        if intents.any() {
            debug!(?intents, mode = %self.mode, "button intents");
        }

        let now = self.clock.now();
        let transition = next_mode(
            self.mode,
            &intents,
            &self.target.snapshot(now),
            self.loss_timeout,
        );
        if let ModeTransition::Changed { to, reason } = transition {
            info!(from = %self.mode, to = %to, %reason, "mode changed");
            self.last_transition = Some(TransitionRecord {
                from: self.mode,
                to,
                reason,
                at: now,
            });
        }
        self.mode = transition.resolve(self.mode);

        Ok(self.output())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
