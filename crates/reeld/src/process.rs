//! Engine launch orchestration.
//!
//! Picks the configured transport and runs it to completion. Socket mode
//! blocks on the accept loop until the process exits through a shutdown
//! command; stdio mode returns once stdin reaches end-of-file, which exits
//! the process cleanly.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use reel_config::{Config, TransportMode};

use crate::dispatch::{EngineConnectionHandler, ServeOutcome, serve};
use crate::transport::{ConnectionStream, EngineListener, ListenerError};

const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

/// Errors that prevent the engine from serving.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The TCP listener could not be started.
    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// Runs the engine on the transport named by the configuration.
///
/// # Errors
///
/// Returns [`LaunchError`] when socket mode fails to bind its listener; the
/// binary maps this to exit code 1.
pub fn run_engine(config: &Config) -> Result<(), LaunchError> {
    match config.transport() {
        TransportMode::Stdio => {
            run_stdio(config.dev_logging());
            Ok(())
        }
        TransportMode::Tcp { port } => run_socket(port, config.dev_logging()),
    }
}

fn run_stdio(dev_logging: bool) {
    let mode = TransportMode::Stdio;
    info!(target: PROCESS_TARGET, %mode, "engine started");
    let mut stream = ConnectionStream::stdio();
    // Shutdown and end-of-file both land here; either way the process exits
    // with success once this returns.
    match serve(&mut stream, dev_logging) {
        ServeOutcome::Closed => {
            info!(target: PROCESS_TARGET, "stdin reached end of file");
        }
        ServeOutcome::Shutdown => {}
    }
}

fn run_socket(port: u16, dev_logging: bool) -> Result<(), LaunchError> {
    let listener = EngineListener::bind(port)?;
    let mode = TransportMode::Tcp { port };
    info!(
        target: PROCESS_TARGET,
        %mode,
        addr = %listener.local_addr(),
        "engine started"
    );
    let handler = Arc::new(EngineConnectionHandler::new(dev_logging));
    let handle = listener.start(handler)?;
    handle.join()?;
    Ok(())
}
