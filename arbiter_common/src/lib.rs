//! Arbiter Common Library
//!
//! Shared types, constants and configuration loading for the robot mode
//! arbiter workspace.
//!
//! # Module Structure
//!
//! - [`mode`] - Operating modes and per-frame button intents
//! - [`output`] - Controller output and velocity command types
//! - [`error`] - Input frame errors
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Default channel mapping and timeout bounds
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use arbiter_common::prelude::*;
//!
//! let output = ControllerOutput::for_mode(OperatingMode::Idle);
//! assert_eq!(output.indicator_code(), 0);
//! ```

pub mod config;
pub mod consts;
pub mod error;
pub mod mode;
pub mod output;
pub mod prelude;
