use crate::logging::LogFormat;

/// Default log filter expression used by the engine binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the engine binary.
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default diagnostic stream format for the engine binary.
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}
