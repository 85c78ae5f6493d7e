//! # Arbiter Control Library
//!
//! Mode arbitration for a mobile robot. Consumes operator input frames and
//! target-visibility reports, runs a three-mode state machine
//! (Idle / Follow / Teleop), and emits the current mode, an indicator code
//! and, while idle, a zero-velocity command.
//!
//! ## Pipeline
//!
//! 1. **InputInterpreter** — raw button frame → rising-edge intents
//! 2. **ModeController** — intents + target visibility → one transition step
//! 3. **ControllerRunner** — serializes both event sources through one FIFO
//!    queue and publishes every output to an `OutputSink`
//!
//! ## Time
//!
//! The loss-of-target timeout is checked lazily against a monotonic
//! [`clock::Clock`] whenever an input frame is processed. No timers run.

pub mod clock;
pub mod input;
pub mod mode;
pub mod output;
pub mod runner;
