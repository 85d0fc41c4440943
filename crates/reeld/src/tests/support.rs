//! Shared fixtures: an in-memory duplex channel and a TCP engine harness.

use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use crate::dispatch::EngineConnectionHandler;
use crate::transport::{EngineListener, ListenerHandle};

const CLIENT_TIMEOUT: Duration = Duration::from_secs(2);

/// In-memory stand-in for a connection: reads scripted input, records output.
pub(crate) struct Duplex {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl Duplex {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: Cursor::new(input.as_bytes().to_vec()),
            output: Vec::new(),
        }
    }

    /// Everything the engine wrote back, as UTF-8.
    pub(crate) fn output_str(&self) -> String {
        String::from_utf8(self.output.clone()).expect("responses should be utf8")
    }

    /// Response lines the engine wrote back.
    pub(crate) fn response_lines(&self) -> Vec<String> {
        self.output_str()
            .lines()
            .map(ToOwned::to_owned)
            .collect()
    }
}

impl Read for Duplex {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for Duplex {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A live engine listener on an ephemeral loopback port.
pub(crate) struct SocketHarness {
    addr: SocketAddr,
    handle: ListenerHandle,
}

impl SocketHarness {
    pub(crate) fn start(dev_logging: bool) -> Self {
        let listener = EngineListener::bind(0).expect("bind ephemeral listener");
        let addr = listener.local_addr();
        let handler = Arc::new(EngineConnectionHandler::new(dev_logging));
        let handle = listener.start(handler).expect("start listener");
        Self { addr, handle }
    }

    pub(crate) fn client(&self) -> EngineClient {
        EngineClient::connect(self.addr)
    }

    pub(crate) fn stop(self) {
        self.handle.shutdown();
        self.handle.join().expect("join listener");
    }
}

/// Test client speaking the newline-delimited protocol.
pub(crate) struct EngineClient {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl EngineClient {
    fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr).expect("connect to engine");
        stream
            .set_read_timeout(Some(CLIENT_TIMEOUT))
            .expect("set read timeout");
        let writer = stream.try_clone().expect("clone stream");
        Self {
            reader: BufReader::new(stream),
            writer,
        }
    }

    pub(crate) fn send_line(&mut self, line: &str) {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush())
            .expect("send request line");
    }

    pub(crate) fn read_line(&mut self) -> String {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).expect("read response");
        assert!(read > 0, "engine closed the connection unexpectedly");
        line.trim_end_matches('\n').to_owned()
    }

    /// Sends one request line and returns the matching response line.
    pub(crate) fn request(&mut self, line: &str) -> String {
        self.send_line(line);
        self.read_line()
    }
}
