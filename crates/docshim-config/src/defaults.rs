//! Built-in configuration values, the lowest-priority layer.

use crate::logging::LogFormat;

/// Host identity advertised when none is configured.
pub const DEFAULT_TCP_HOST: &str = "127.0.0.1:27017";

/// Largest document the shim advertises to clients (16 MiB).
pub const DEFAULT_MAX_BSON_OBJECT_SIZE_BYTES: i32 = 16 * 1024 * 1024;

/// `tracing` filter applied when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned host identity used where allocation is required (e.g. serde).
pub fn default_tcp_host() -> String {
    DEFAULT_TCP_HOST.to_owned()
}

/// Borrowed form of [`DEFAULT_LOG_FILTER`].
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Log format applied when none is configured.
pub fn default_log_format() -> LogFormat {
    LogFormat::Json
}
