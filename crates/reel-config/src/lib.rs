//! Startup configuration for the reel engine.
//!
//! The engine recognises a deliberately small surface: the transport
//! selection (`--port`, where 0 keeps the stdin/stdout channel), the dev
//! logging toggle (`--dev`), and the diagnostic stream's filter and format.
//! Every flag falls back to a `REEL_*` environment variable so front ends can
//! configure a spawned engine without building argument lists.
//!
//! The resolved [`Config`] is read-only after startup and is threaded
//! explicitly into the connection handling entry points; nothing in the
//! engine consults process-global state.

mod defaults;
mod logging;
mod transport;

pub use defaults::{DEFAULT_LOG_FILTER, default_log_filter, default_log_format};
pub use logging::{LogFormat, LogFormatParseError};
pub use transport::TransportMode;

use std::ffi::OsString;

use clap::Parser;
use thiserror::Error;

/// Command-line surface of the engine binary.
#[derive(Debug, Parser)]
#[command(
    name = "reeld",
    version,
    about = "Local command-dispatch engine behind the reel front end"
)]
struct Cli {
    /// Port to listen on (0 keeps the stdin/stdout channel).
    #[arg(long, env = "REEL_PORT", default_value_t = 0)]
    port: u16,
    /// Enables development mode with request/response logging.
    #[arg(long, env = "REEL_DEV")]
    dev: bool,
    /// Filter expression for the diagnostic stream.
    #[arg(long, env = "REEL_LOG_FILTER", default_value = defaults::DEFAULT_LOG_FILTER)]
    log_filter: String,
    /// Output format for the diagnostic stream.
    #[arg(long, env = "REEL_LOG_FORMAT", default_value_t = defaults::default_log_format())]
    log_format: LogFormat,
}

/// Error surfaced when configuration arguments fail to parse.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ConfigError(#[from] clap::Error);

/// Resolved engine configuration, immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    transport: TransportMode,
    dev_logging: bool,
    log_filter: String,
    log_format: LogFormat,
}

impl Config {
    /// Loads configuration from the process arguments and environment.
    ///
    /// Follows the standard binary convention: `--help`/`--version` and
    /// argument errors print to the terminal and exit the process.
    #[must_use]
    pub fn load() -> Self {
        Cli::parse().into()
    }

    /// Loads configuration from an explicit argument list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the arguments do not parse.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Ok(Cli::try_parse_from(args)?.into())
    }

    /// Selected transport channel.
    #[must_use]
    pub fn transport(&self) -> TransportMode {
        self.transport
    }

    /// Whether the request/response logging decorator is enabled.
    #[must_use]
    pub fn dev_logging(&self) -> bool {
        self.dev_logging
    }

    /// Filter expression for the diagnostic stream.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for the diagnostic stream.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: TransportMode::Stdio,
            dev_logging: false,
            log_filter: defaults::DEFAULT_LOG_FILTER.to_owned(),
            log_format: defaults::default_log_format(),
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            transport: TransportMode::from_port(cli.port),
            dev_logging: cli.dev,
            log_filter: cli.log_filter,
            log_format: cli.log_format,
        }
    }
}
