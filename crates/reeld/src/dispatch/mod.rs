//! Request dispatch for the engine's line-oriented protocol.
//!
//! Each non-blank line a connection delivers is parsed into a
//! [`reel_protocol::Command`], routed on its `cmd` name, and answered with
//! exactly one compact-JSON [`reel_protocol::Response`] line on the same
//! connection.
//!
//! ## Protocol
//!
//! ```json
//! {"id":"1","cmd":"health"}
//! ```
//!
//! is answered with
//!
//! ```json
//! {"id":"1","status":"ok","data":"reel-engine is healthy and running","log":"Health check received"}
//! ```
//!
//! Failures never cross the connection boundary as transport errors: a
//! malformed line or an unknown command name produces a `status:"error"`
//! response and the conversation continues. The only command with a side
//! effect beyond its response is `shutdown`, which ends the whole process
//! after its reply is flushed.
//!
//! When dev logging is enabled every line flows through [`logger`], which
//! mirrors request and response to the diagnostic stream without changing
//! the bytes on the wire.

mod errors;
mod handler;
mod logger;
mod request;
mod response;
mod router;

pub(crate) use self::handler::{EngineConnectionHandler, ServeOutcome, serve};

#[cfg(test)]
pub(crate) use self::handler::dispatch_line;
#[cfg(test)]
pub(crate) use self::logger::dispatch_logged;

const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");
