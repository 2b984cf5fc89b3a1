//! Application-level errors
//!
//! Arithmetic never fails outward (see [`crate::core::CalcError`]); these are
//! the failures of everything around the engine: config files, replay input,
//! the terminal.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Errors raised outside the calculator engine
#[derive(Debug, Error)]
pub enum AppError {
    /// Config file could not be read
    #[error("Cannot read config {path}: {source}")]
    ConfigRead {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Config file is not valid YAML for [`crate::config::CalcConfig`]
    #[error("Invalid config syntax: {0}")]
    ConfigParse(#[from] serde_yaml_ng::Error),

    /// Config parsed but holds an unusable value
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Replay string contains a character with no key binding
    #[error("Unknown key {key:?} at position {position}")]
    UnknownKey {
        /// Offending character
        key: char,
        /// Zero-based character index in the replay string
        position: usize,
    },

    /// Terminal or stdout I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
