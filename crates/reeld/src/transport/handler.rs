//! Connection abstractions shared by the stdio channel and the listener.

use std::io::{self, Read, Write};
use std::net::TcpStream;

/// A bidirectional byte channel carrying one protocol conversation.
///
/// The stdio variant locks stdin/stdout per call, so a single conversation
/// owns the process's pipes for its whole lifetime, matching the one-channel
/// stdio mode.
pub(crate) enum ConnectionStream {
    Tcp(TcpStream),
    Stdio,
}

impl ConnectionStream {
    /// Builds the fixed stdin/stdout channel.
    pub(crate) fn stdio() -> Self {
        Self::Stdio
    }
}

impl Read for ConnectionStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            Self::Stdio => io::stdin().lock().read(buf),
        }
    }
}

impl Write for ConnectionStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            Self::Stdio => io::stdout().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            Self::Stdio => io::stdout().lock().flush(),
        }
    }
}

/// Handles accepted socket connections.
///
/// Implementations own the connection until it closes and should avoid
/// panicking; each runs on its own thread and shares no mutable state with
/// other connections.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    fn handle(&self, stream: ConnectionStream);
}
