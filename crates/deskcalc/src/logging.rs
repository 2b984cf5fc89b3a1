//! Tracing subscriber setup
//!
//! Logs go to stderr; the terminal front end owns stdout. `RUST_LOG` takes
//! precedence over the configured level.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogLevel;

/// Builds the filter: `RUST_LOG` if set and valid, else `level`
#[must_use]
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Installs the global subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(level: LogLevel) {
    let installed = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();

    if installed.is_ok() {
        tracing::debug!(level = level.as_directive(), "logging initialised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(LogLevel::Warn);
        init(LogLevel::Debug);
    }

    #[test]
    fn test_env_filter_builds() {
        let filter = env_filter(LogLevel::Info);
        assert!(!format!("{filter}").is_empty());
    }
}
