//! The per-connection read/dispatch/write loop.

use std::io::{Read, Write};
use std::process;

use tracing::{debug, info, warn};

use reel_protocol::Response;

use crate::transport::{ConnectionHandler, ConnectionStream, LineBuffer};

use super::DISPATCH_TARGET;
use super::logger;
use super::request;
use super::response::ResponseWriter;
use super::router::{self, Disposition};

/// Why a conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ServeOutcome {
    /// The peer closed the channel or reading failed.
    Closed,
    /// A shutdown command was answered; the process must now exit.
    Shutdown,
}

/// Connection handler running the engine protocol.
///
/// Dev logging arrives here as explicit configuration rather than a process
/// global, so every conversation (and every test) states it outright.
#[derive(Debug)]
pub(crate) struct EngineConnectionHandler {
    dev_logging: bool,
}

impl EngineConnectionHandler {
    pub(crate) fn new(dev_logging: bool) -> Self {
        Self { dev_logging }
    }
}

impl ConnectionHandler for EngineConnectionHandler {
    fn handle(&self, mut stream: ConnectionStream) {
        if serve(&mut stream, self.dev_logging) == ServeOutcome::Shutdown {
            // The response is already flushed; nothing waits for other
            // connections to drain.
            process::exit(0);
        }
    }
}

/// Serves one conversation until the channel closes or shutdown is requested.
///
/// Blank and whitespace-only lines are skipped without a reply. A read error
/// ends only this conversation; the error is reported on the diagnostic
/// stream.
pub(crate) fn serve<S: Read + Write>(stream: &mut S, dev_logging: bool) -> ServeOutcome {
    let mut lines = LineBuffer::new();
    loop {
        let line = match lines.next_line(stream) {
            Ok(Some(line)) => line,
            Ok(None) => return ServeOutcome::Closed,
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "failed to read connection");
                return ServeOutcome::Closed;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let disposition = if dev_logging {
            logger::dispatch_logged(&line, stream)
        } else {
            dispatch_line(&line, stream)
        };
        if disposition == Disposition::Shutdown {
            info!(target: DISPATCH_TARGET, "shutdown requested, goodbye");
            return ServeOutcome::Shutdown;
        }
    }
}

/// Maps one request line to exactly one response line.
pub(crate) fn dispatch_line(line: &str, connection: &mut impl Write) -> Disposition {
    let command = match request::parse_command(line) {
        Ok(command) => command,
        Err(error) => {
            debug!(target: DISPATCH_TARGET, %error, "rejecting malformed request line");
            send_response(connection, &router::invalid_json_response());
            return Disposition::Continue;
        }
    };

    let router::Dispatched {
        response,
        disposition,
    } = router::route(&command);
    send_response(connection, &response);
    disposition
}

/// Writes one response with an explicit error contract: a serialization or
/// write failure is logged to the diagnostic stream and the request silently
/// receives no reply.
pub(super) fn send_response(connection: &mut impl Write, response: &Response) {
    if let Err(error) = ResponseWriter::new(connection).write_response(response) {
        warn!(target: DISPATCH_TARGET, %error, "failed to write response");
    }
}
