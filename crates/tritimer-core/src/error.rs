//! Core error types for tritimer-core.
//!
//! Error hierarchy built on thiserror. Timer command errors are kept
//! separate from configuration-file errors so callers can match on the
//! small set of rejections the engine can actually produce.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tritimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timer command rejected
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Rejections produced by timer commands.
///
/// Everything not listed here is defined as a no-op rather than an error:
/// `pause`, `reset` and `tick` are total and never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    /// Configuration parameters violate a mode's requirements.
    /// The engine state is unchanged.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfiguration { field: String, message: String },

    /// `start()` called without a startable configuration.
    #[error("Timer is not ready: {0}")]
    NotReady(String),
}

impl TimerError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        TimerError::InvalidConfiguration {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Configuration-file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
