//! Logging setup for Taskboard binaries.
//!
//! The library itself only emits `tracing` events. Binaries call
//! [`init_logging`] once to route them to stderr.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{directive}': {source}")]
    InvalidFilter {
        /// Rejected directive.
        directive: String,
        /// Parser error.
        source: tracing_subscriber::filter::ParseError,
    },

    /// A global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Builds the log filter: `RUST_LOG` when set, `level` otherwise.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `level` is not a valid
/// filter directive and `RUST_LOG` is unset.
pub fn log_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| TelemetryError::InvalidFilter {
        directive: level.to_owned(),
        source,
    })
}

/// Installs a stderr `fmt` subscriber filtered by [`log_filter`].
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a global
/// subscriber is already installed.
pub fn init_logging(level: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
