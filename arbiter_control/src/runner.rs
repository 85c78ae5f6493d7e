//! Ordered event queue and controller runner.
//!
//! Input frames and target reports come from independent sources. Both are
//! pushed into one FIFO channel and applied to the controller strictly in
//! arrival order, one event to completion before the next.
//!
//! ```text
//! input source  ──┐
//!                 ├─► EventSender ─► [FIFO] ─► ControllerRunner ─► OutputSink
//! target source ──┘
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arbiter_common::error::InputFormatError;
use arbiter_common::output::ControllerOutput;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::mode::controller::ModeController;
use crate::output::OutputSink;

/// How often a blocked runner rechecks its shutdown flag.
pub const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Inbound event.
///
/// Serialized externally tagged: `{"input_frame":[..]}` or
/// `{"target_status":true}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerEvent {
    /// Raw operator-input frame.
    InputFrame(Vec<bool>),
    /// Target visibility report.
    TargetStatus(bool),
}

/// Runner error.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The receiving side of the queue is gone.
    #[error("event queue closed")]
    QueueClosed,

    /// The output sink failed.
    #[error("output sink error: {0}")]
    Sink(#[from] io::Error),
}

/// Producer handle. Clone one per event source.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<ControllerEvent>,
}

impl EventSender {
    pub fn send(&self, event: ControllerEvent) -> Result<(), RunnerError> {
        self.tx.send(event).map_err(|_| RunnerError::QueueClosed)
    }

    pub fn send_frame(&self, frame: Vec<bool>) -> Result<(), RunnerError> {
        self.send(ControllerEvent::InputFrame(frame))
    }

    pub fn send_target(&self, visible: bool) -> Result<(), RunnerError> {
        self.send(ControllerEvent::TargetStatus(visible))
    }
}

/// Consumer handle, owned by the runner's thread.
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<ControllerEvent>,
}

impl EventReceiver {
    /// Number of queued events.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Take queued events in arrival order without blocking.
    pub fn try_iter(&self) -> impl Iterator<Item = ControllerEvent> + '_ {
        self.rx.try_iter()
    }
}

/// Create the single ordered queue feeding one controller.
pub fn event_queue() -> (EventSender, EventReceiver) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (EventSender { tx }, EventReceiver { rx })
}

/// What happened to one event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Frame processed, output published.
    Published(ControllerOutput),
    /// Visibility recorded.
    TargetUpdated,
    /// Frame rejected, state unchanged.
    Dropped(InputFormatError),
}

/// Event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerStats {
    /// Input frames processed and published.
    pub frames_processed: u64,
    /// Malformed input frames dropped.
    pub frames_dropped: u64,
    /// Target reports applied.
    pub target_updates: u64,
    /// Frames that changed the mode.
    pub mode_changes: u64,
}

/// Single owner of a `ModeController`.
pub struct ControllerRunner<C: Clock, S: OutputSink> {
    controller: ModeController<C>,
    sink: S,
    stats: RunnerStats,
}

impl<C: Clock, S: OutputSink> ControllerRunner<C, S> {
    pub fn new(controller: ModeController<C>, sink: S) -> Self {
        Self {
            controller,
            sink,
            stats: RunnerStats::default(),
        }
    }

    #[inline]
    pub fn controller(&self) -> &ModeController<C> {
        &self.controller
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn stats(&self) -> RunnerStats {
        self.stats
    }

    /// Apply one event to completion.
    ///
    /// A malformed frame is counted, logged and reported as
    /// `EventOutcome::Dropped`; it is not an error for the runner.
    pub fn handle(&mut self, event: ControllerEvent) -> Result<EventOutcome, RunnerError> {
        match event {
            ControllerEvent::TargetStatus(visible) => {
                self.controller.update_target(visible);
                self.stats.target_updates += 1;
                Ok(EventOutcome::TargetUpdated)
            }
            ControllerEvent::InputFrame(frame) => {
                let before = self.controller.mode();
                match self.controller.process_frame(&frame) {
                    Ok(output) => {
                        self.stats.frames_processed += 1;
                        if output.mode() != before {
                            self.stats.mode_changes += 1;
                        }
                        self.sink.publish(&output)?;
                        Ok(EventOutcome::Published(output))
                    }
                    Err(e) => {
                        self.stats.frames_dropped += 1;
                        warn!(
                            error = %e,
                            dropped = self.stats.frames_dropped,
                            "input frame dropped"
                        );
                        Ok(EventOutcome::Dropped(e))
                    }
                }
            }
        }
    }

    /// Apply every event already queued. Returns how many were applied.
    pub fn drain(&mut self, events: &EventReceiver) -> Result<usize, RunnerError> {
        let mut applied = 0;
        for event in events.try_iter() {
            self.handle(event)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Block on the queue until every sender is dropped or `running` clears.
    pub fn run(&mut self, events: &EventReceiver, running: &AtomicBool) -> Result<(), RunnerError> {
        while running.load(Ordering::SeqCst) {
            match events.rx.recv_timeout(SHUTDOWN_POLL_INTERVAL) {
                Ok(event) => {
                    self.handle(event)?;
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("all event sources closed");
                    return Ok(());
                }
            }
        }
        debug!(pending = events.len(), "runner stopped by shutdown flag");
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
