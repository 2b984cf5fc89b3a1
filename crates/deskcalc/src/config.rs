//! Calculator configuration
//!
//! Loaded from an optional YAML file; every field has a default so an empty
//! file (or no file) gives the stock calculator.
//!
//! ```yaml
//! error_token: "Erro"
//! comma_is_decimal: true
//! log_level: info
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::format::parse_display;
use crate::core::DEFAULT_ERROR_TOKEN;
use crate::error::{AppError, AppResult};

/// Log level used when neither `-v` nor `RUST_LOG` says otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    #[default]
    Warn,
    /// Informational
    Info,
    /// Every engine transition
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Raises the level by `steps` (one per `-v`)
    #[must_use]
    pub const fn raised(self, steps: u8) -> Self {
        let base = match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        };
        match base + steps as u16 {
            0 => Self::Error,
            1 => Self::Warn,
            2 => Self::Info,
            3 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalcConfig {
    /// Display text after a division by zero
    pub error_token: String,
    /// Treat ',' as a decimal point key
    pub comma_is_decimal: bool,
    /// Default log level
    pub log_level: LogLevel,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            error_token: DEFAULT_ERROR_TOKEN.to_string(),
            comma_is_decimal: true,
            log_level: LogLevel::Warn,
        }
    }
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error token
    #[must_use]
    pub fn with_error_token(mut self, token: impl Into<String>) -> Self {
        self.error_token = token.into();
        self
    }

    /// Set whether ',' enters a decimal point
    #[must_use]
    pub const fn with_comma_is_decimal(mut self, enabled: bool) -> Self {
        self.comma_is_decimal = enabled;
        self
    }

    /// Set the default log level
    #[must_use]
    pub const fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Parses and validates YAML text
    pub fn from_yaml(text: &str) -> AppResult<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> AppResult<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Checks the invariants the engine relies on
    ///
    /// The error token must be non-empty and must not read as a number,
    /// otherwise the display could not tell an error from a result.
    pub fn validate(&self) -> AppResult<()> {
        let token = self.error_token.trim();
        if token.is_empty() {
            return Err(AppError::config("error_token must not be empty"));
        }
        if parse_display(&self.error_token).is_some() {
            return Err(AppError::config(format!(
                "error_token {:?} reads as a number",
                self.error_token
            )));
        }
        Ok(())
    }
}
