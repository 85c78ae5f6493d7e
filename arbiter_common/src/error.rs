//! Input frame errors.
//!
//! Configuration errors live in [`crate::config::ConfigError`].

use thiserror::Error;

/// A raw input frame could not be interpreted.
///
/// The frame is dropped and controller state is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputFormatError {
    /// The frame does not contain every configured channel.
    #[error("input frame has {len} channels, at least {required} required")]
    FrameTooShort { len: usize, required: usize },
}
