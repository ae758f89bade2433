//! Structured logging setup.
//!
//! The global `tracing` subscriber can only be installed once per process.
//! [`initialise`] installs it on first use and hands back the same handle on
//! every later call, so repeated bootstraps (tests, embedded use) are safe.

use once_cell::sync::OnceCell;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use docshim_config::{Config, LogFormat};

static TELEMETRY: OnceCell<TelemetryHandle> = OnceCell::new();

/// Marker returned once the subscriber is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    format: LogFormat,
}

impl TelemetryHandle {
    /// Output format chosen when the subscriber was installed.
    #[must_use]
    pub fn format(&self) -> LogFormat {
        self.format
    }
}

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter expression does not parse.
    #[error("invalid log filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },
    /// Another subscriber was already installed by someone else.
    #[error("failed to install tracing subscriber: {message}")]
    Install { message: String },
}

/// Installs the global subscriber described by `config`.
///
/// The filter is validated on every call, even when a subscriber is already
/// in place.
///
/// # Errors
///
/// Returns [`TelemetryError`] if the filter is invalid or a foreign subscriber
/// is already installed.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    let filter =
        EnvFilter::try_new(config.log_filter()).map_err(|source| TelemetryError::InvalidFilter {
            filter: config.log_filter().to_owned(),
            source,
        })?;
    TELEMETRY
        .get_or_try_init(|| install(filter, config.log_format()))
        .copied()
}

fn install(filter: EnvFilter, format: LogFormat) -> Result<TelemetryHandle, TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let result = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
    result.map_err(|error| TelemetryError::Install {
        message: error.to_string(),
    })?;
    Ok(TelemetryHandle { format })
}
