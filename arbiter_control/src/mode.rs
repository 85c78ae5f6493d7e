//! Mode state machine root.
//!
//! `transition` holds the pure transition table, `controller` owns the mode
//! and the target-visibility state.

pub mod controller;
pub mod transition;
