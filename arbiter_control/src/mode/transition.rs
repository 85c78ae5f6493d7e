//! Mode transition table.
//!
//! Idle ↔ Follow, Idle ↔ Teleop. Guards are evaluated in a fixed order and
//! the first match wins, so at most one transition fires per input frame:
//!
//! | From   | Guard                                   | To     |
//! |--------|-----------------------------------------|--------|
//! | Idle   | follow requested and target visible     | Follow |
//! | Idle   | teleop requested                        | Teleop |
//! | Follow | target unseen for at least the timeout  | Idle   |
//! | Follow | idle requested                          | Idle   |
//! | Teleop | idle requested                          | Idle   |
//!
//! Every other combination stays in the current mode.

use std::time::Duration;

use arbiter_common::mode::{ButtonIntents, OperatingMode};

/// Why a transition fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionReason {
    /// Follow requested while the target was visible.
    FollowRequested,
    /// Teleop requested from Idle.
    TeleopRequested,
    /// Target not seen for the loss-of-target timeout.
    TargetLost,
    /// Operator requested Idle.
    IdleRequested,
}

impl TransitionReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FollowRequested => "follow requested",
            Self::TeleopRequested => "teleop requested",
            Self::TargetLost => "target lost",
            Self::IdleRequested => "idle requested",
        }
    }
}

impl std::fmt::Display for TransitionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one transition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// No guard matched.
    Stay,
    /// Move to `to`.
    Changed {
        to: OperatingMode,
        reason: TransitionReason,
    },
}

impl ModeTransition {
    /// Mode after applying this transition to `current`.
    #[inline]
    pub const fn resolve(self, current: OperatingMode) -> OperatingMode {
        match self {
            Self::Stay => current,
            Self::Changed { to, .. } => to,
        }
    }
}

/// Target visibility as seen by one transition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSnapshot {
    /// Target currently reported visible.
    pub visible: bool,
    /// Time since the target was last seen (zero while visible).
    pub unseen_for: Duration,
}

impl TargetSnapshot {
    pub const VISIBLE: Self = Self {
        visible: true,
        unseen_for: Duration::ZERO,
    };

    /// Target invisible for `unseen_for`.
    pub const fn lost_for(unseen_for: Duration) -> Self {
        Self {
            visible: false,
            unseen_for,
        }
    }

    #[inline]
    fn timed_out(&self, timeout: Duration) -> bool {
        !self.visible && self.unseen_for >= timeout
    }
}

/// Evaluate the transition table for one input frame.
///
/// Total over every (mode, intents, target) combination.
pub fn next_mode(
    mode: OperatingMode,
    intents: &ButtonIntents,
    target: &TargetSnapshot,
    loss_timeout: Duration,
) -> ModeTransition {
    use OperatingMode::*;
    use TransitionReason::*;

    let changed = |to, reason| ModeTransition::Changed { to, reason };

    match mode {
        Idle if intents.request_follow && target.visible => changed(Follow, FollowRequested),
        Idle if intents.request_teleop => changed(Teleop, TeleopRequested),
        Follow if target.timed_out(loss_timeout) => changed(Idle, TargetLost),
        Follow if intents.request_idle => changed(Idle, IdleRequested),
        Teleop if intents.request_idle => changed(Idle, IdleRequested),
        _ => ModeTransition::Stay,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
