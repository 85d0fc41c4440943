//! Request/response logging decorator for dev mode.
//!
//! Wraps the dispatch path without changing its wire behavior: the request is
//! mirrored to the diagnostic stream before dispatch, the reply is captured
//! into a buffer, relayed to the real connection byte-for-byte, and then
//! mirrored with the elapsed wall-clock time. Enabling the decorator must
//! never change the bytes a peer receives.

use std::io::Write;
use std::time::Instant;

use tracing::{info, warn};

use super::handler::send_response;
use super::request;
use super::response::ResponseWriter;
use super::router::{self, Disposition};

const DEV_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dev");

/// Dispatches one request line with request/response mirroring.
pub(crate) fn dispatch_logged(line: &str, connection: &mut impl Write) -> Disposition {
    let started = Instant::now();
    log_request(line);

    // Parse failures answer directly with the shared invalid-JSON response;
    // the wrapped handler never runs for them.
    let command = match request::parse_command(line) {
        Ok(command) => command,
        Err(error) => {
            send_response(connection, &router::invalid_json_response());
            info!(target: DEV_TARGET, %error, "request failed JSON parsing");
            return Disposition::Continue;
        }
    };

    let router::Dispatched {
        response,
        disposition,
    } = router::route(&command);

    // Capture the reply so the connection sees exactly the bytes the plain
    // path would have written.
    let mut captured = Vec::new();
    if let Err(error) = ResponseWriter::new(&mut captured).write_response(&response) {
        warn!(target: DEV_TARGET, %error, "failed to serialize response");
        return disposition;
    }
    if let Err(error) = connection
        .write_all(&captured)
        .and_then(|()| connection.flush())
    {
        warn!(target: DEV_TARGET, %error, "failed to write response");
    }

    log_response(started, &captured);
    disposition
}

fn log_request(line: &str) {
    match pretty_json(line) {
        Some(request) => info!(target: DEV_TARGET, request = %request, "incoming request"),
        None => info!(target: DEV_TARGET, request = %line, "incoming request (raw)"),
    }
}

fn log_response(started: Instant, wire_bytes: &[u8]) {
    let elapsed = started.elapsed();
    let text = String::from_utf8_lossy(wire_bytes);
    let response = pretty_json(text.trim_end()).unwrap_or_else(|| text.into_owned());
    info!(target: DEV_TARGET, ?elapsed, response = %response, "request completed");
}

fn pretty_json(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    serde_json::to_string_pretty(&value).ok()
}
