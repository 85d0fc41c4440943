use std::fmt;

/// Channel the engine serves requests on, selected at startup.
///
/// The front end either spawns the engine as a child process and talks over
/// its pipes, or connects to a loopback TCP socket when pipes are not an
/// option (for example a mobile shell driving a sidecar process).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportMode {
    /// Serve the process's stdin/stdout as a single fixed channel.
    Stdio,
    /// Listen for connections on `localhost:<port>`.
    Tcp {
        /// Loopback port to bind.
        port: u16,
    },
}

impl TransportMode {
    /// Maps the `--port` option onto a transport: 0 keeps the stdio channel,
    /// anything else selects a loopback TCP listener.
    #[must_use]
    pub fn from_port(port: u16) -> Self {
        if port == 0 {
            Self::Stdio
        } else {
            Self::Tcp { port }
        }
    }

    /// Returns the TCP port when socket mode is selected.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        match self {
            Self::Stdio => None,
            Self::Tcp { port } => Some(*port),
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdio => write!(formatter, "pipe (stdin/stdout)"),
            Self::Tcp { port } => write!(formatter, "tcp://localhost:{port}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_port_selects_stdio() {
        assert_eq!(TransportMode::from_port(0), TransportMode::Stdio);
        assert_eq!(TransportMode::from_port(0).port(), None);
    }

    #[test]
    fn nonzero_port_selects_tcp() {
        let mode = TransportMode::from_port(8090);
        assert_eq!(mode, TransportMode::Tcp { port: 8090 });
        assert_eq!(mode.port(), Some(8090));
    }

    #[test]
    fn display_names_the_channel() {
        assert_eq!(TransportMode::Stdio.to_string(), "pipe (stdin/stdout)");
        assert_eq!(
            TransportMode::Tcp { port: 8090 }.to_string(),
            "tcp://localhost:8090"
        );
    }
}
