//! Operator input root.
//!
//! Rising-edge interpretation of raw button frames.

pub mod interpreter;
