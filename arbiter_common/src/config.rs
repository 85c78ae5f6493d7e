//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load the arbiter's TOML
//! configuration file and validate it before the controller starts.
//!
//! # Usage
//!
//! ```rust,no_run
//! use arbiter_common::config::{ArbiterConfig, ConfigError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = ArbiterConfig::load_validated(Path::new("config/arbiter.toml"))?;
//!     println!("Service: {}", config.shared.service_name);
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{
    DEFAULT_FOLLOW_BUTTON, DEFAULT_IDLE_BUTTON, DEFAULT_TELEOP_BUTTON, MAX_INPUT_CHANNELS,
    TARGET_LOSS_TIMEOUT_DEFAULT, TARGET_LOSS_TIMEOUT_MAX, TARGET_LOSS_TIMEOUT_MIN,
};

/// Error type for configuration loading and validation.
///
/// Any of these at startup is fatal: the controller must not start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// File exists but could not be read.
    #[error("Failed to read configuration: {0}")]
    Io(String),

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Common configuration fields.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "mode-arbiter"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Mode controller configuration.
///
/// Channel indices map physical controls to logical intents. Immutable
/// after startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    /// Channel of the "request idle" control (default: 3).
    #[serde(default = "default_idle_button")]
    pub idle_button: usize,

    /// Channel of the "request follow" control (default: 1).
    #[serde(default = "default_follow_button")]
    pub follow_button: usize,

    /// Channel of the "request teleop" control (default: 0).
    #[serde(default = "default_teleop_button")]
    pub teleop_button: usize,

    /// Follow → Idle after this long without the target [s] (default: 5.0).
    #[serde(default = "default_target_loss_timeout")]
    pub target_loss_timeout: f64,
}

fn default_idle_button() -> usize {
    DEFAULT_IDLE_BUTTON
}
fn default_follow_button() -> usize {
    DEFAULT_FOLLOW_BUTTON
}
fn default_teleop_button() -> usize {
    DEFAULT_TELEOP_BUTTON
}
fn default_target_loss_timeout() -> f64 {
    TARGET_LOSS_TIMEOUT_DEFAULT
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            idle_button: DEFAULT_IDLE_BUTTON,
            follow_button: DEFAULT_FOLLOW_BUTTON,
            teleop_button: DEFAULT_TELEOP_BUTTON,
            target_loss_timeout: TARGET_LOSS_TIMEOUT_DEFAULT,
        }
    }
}

impl ControllerConfig {
    /// Validate channel indices and timeout bounds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - a channel index is `>= MAX_INPUT_CHANNELS`
    /// - two controls share a channel
    /// - `target_loss_timeout` is non-finite or outside
    ///   `[TARGET_LOSS_TIMEOUT_MIN, TARGET_LOSS_TIMEOUT_MAX]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let buttons = [
            ("idle_button", self.idle_button),
            ("follow_button", self.follow_button),
            ("teleop_button", self.teleop_button),
        ];

        for (name, index) in buttons {
            if index >= MAX_INPUT_CHANNELS {
                return Err(ConfigError::ValidationError(format!(
                    "{name} {index} out of range [0, {})",
                    MAX_INPUT_CHANNELS
                )));
            }
        }

        for (i, (name_a, a)) in buttons.iter().enumerate() {
            for (name_b, b) in &buttons[i + 1..] {
                if a == b {
                    return Err(ConfigError::ValidationError(format!(
                        "{name_a} and {name_b} both mapped to channel {a}"
                    )));
                }
            }
        }

        if !self.target_loss_timeout.is_finite()
            || self.target_loss_timeout < TARGET_LOSS_TIMEOUT_MIN
            || self.target_loss_timeout > TARGET_LOSS_TIMEOUT_MAX
        {
            return Err(ConfigError::ValidationError(format!(
                "target_loss_timeout {} out of range [{}, {}]",
                self.target_loss_timeout, TARGET_LOSS_TIMEOUT_MIN, TARGET_LOSS_TIMEOUT_MAX
            )));
        }

        Ok(())
    }

    /// Loss-of-target timeout as a `Duration`.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded.
    #[inline]
    pub fn loss_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.target_loss_timeout)
    }
}

/// Top-level arbiter configuration file.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// service_name = "mode-arbiter"
///
/// [controller]
/// idle_button = 3
/// follow_button = 1
/// teleop_button = 0
/// target_loss_timeout = 5.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbiterConfig {
    pub shared: SharedConfig,
    #[serde(default)]
    pub controller: ControllerConfig,
}

impl ArbiterConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.controller.validate()
    }

    /// Parse and validate from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        debug!(
            path = %path.display(),
            service = %config.shared.service_name,
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Trait for loading configuration from TOML files.
///
/// Blanket-implemented for every type implementing
/// `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::Io` if the file cannot be read
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::Io(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
