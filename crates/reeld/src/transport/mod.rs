//! Transport layer feeding raw request lines to the dispatcher.
//!
//! Two channel kinds exist: the process's stdin/stdout pair (the default,
//! used when a front end spawns the engine as a child process) and a loopback
//! TCP listener that accepts any number of concurrent connections, each owned
//! by its own thread. Both deliver the same newline-delimited byte stream to
//! the dispatch loop; nothing downstream knows which channel is in use.

mod errors;
mod handler;
mod line;
mod listener;

pub(crate) use self::errors::ListenerError;
pub(crate) use self::handler::{ConnectionHandler, ConnectionStream};
pub(crate) use self::line::LineBuffer;
pub(crate) use self::listener::EngineListener;
#[cfg(test)]
pub(crate) use self::listener::ListenerHandle;

const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");
