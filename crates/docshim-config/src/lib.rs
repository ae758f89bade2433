//! Shared configuration for the legacy-protocol shim.
//!
//! Settings are layered by `ortho_config`: built-in defaults, then a
//! configuration file (`--config-path` or `DOCSHIM_CONFIG_PATH`), then
//! `DOCSHIM_*` environment variables, and finally command-line flags. The
//! resolved [`Config`] carries the server identity advertised during the
//! topology-discovery handshake together with the logging settings.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_BSON_OBJECT_SIZE_BYTES, DEFAULT_TCP_HOST, default_log_filter,
    default_log_filter_string, default_log_format, default_tcp_host,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved shim configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "DOCSHIM")]
pub struct Config {
    /// Host identity (`host:port`) reported to clients during discovery.
    #[ortho_config(default = defaults::default_tcp_host())]
    pub tcp_host: String,
    /// Replica-set name; empty for a standalone server.
    #[ortho_config(default = String::new())]
    pub repl_set_name: String,
    /// Largest document size advertised to clients.
    #[ortho_config(default = defaults::DEFAULT_MAX_BSON_OBJECT_SIZE_BYTES)]
    pub max_bson_object_size_bytes: i32,
    /// `tracing` filter expression.
    #[ortho_config(default = defaults::default_log_filter_string())]
    pub log_filter: String,
    /// Log output format.
    #[ortho_config(default = defaults::default_log_format())]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tcp_host: default_tcp_host(),
            repl_set_name: String::new(),
            max_bson_object_size_bytes: DEFAULT_MAX_BSON_OBJECT_SIZE_BYTES,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Host identity reported during discovery.
    #[must_use]
    pub fn tcp_host(&self) -> &str {
        &self.tcp_host
    }

    /// Replica-set name, or `None` for a standalone server.
    #[must_use]
    pub fn repl_set_name(&self) -> Option<&str> {
        let name = self.repl_set_name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Advertised maximum document size in bytes.
    #[must_use]
    pub fn max_bson_object_size_bytes(&self) -> i32 {
        self.max_bson_object_size_bytes
    }

    /// `tracing` filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Checks values the loader cannot reject on type alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the TCP host is blank or the maximum
    /// document size is not positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tcp_host.trim().is_empty() {
            return Err(ConfigError::EmptyTcpHost);
        }
        if self.max_bson_object_size_bytes <= 0 {
            return Err(ConfigError::NonPositiveDocumentSize {
                value: self.max_bson_object_size_bytes,
            });
        }
        Ok(())
    }
}

/// Semantic validation failures for a loaded [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The TCP host identity was blank.
    #[error("tcp_host must not be empty")]
    EmptyTcpHost,
    /// The advertised document size limit was zero or negative.
    #[error("max_bson_object_size_bytes must be positive, got {value}")]
    NonPositiveDocumentSize { value: i32 },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.tcp_host(), DEFAULT_TCP_HOST);
        assert_eq!(config.repl_set_name(), None);
        assert_eq!(
            config.max_bson_object_size_bytes(),
            DEFAULT_MAX_BSON_OBJECT_SIZE_BYTES
        );
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("rs0", Some("rs0"))]
    fn blank_replica_set_means_standalone(#[case] name: &str, #[case] expected: Option<&str>) {
        let config = Config {
            repl_set_name: name.to_owned(),
            ..Config::default()
        };
        assert_eq!(config.repl_set_name(), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn rejects_non_positive_document_size(#[case] value: i32) {
        let config = Config {
            max_bson_object_size_bytes: value,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveDocumentSize { value })
        );
    }

    #[test]
    fn rejects_blank_tcp_host() {
        let config = Config {
            tcp_host: String::from(" "),
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyTcpHost));
    }
}
