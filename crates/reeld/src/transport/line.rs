//! Bounded newline splitting for protocol conversations.

use std::io::{self, Read};
use std::mem;

/// Maximum size of a single request line in bytes.
pub(crate) const MAX_LINE_BYTES: usize = 64 * 1024;

/// Accumulates bytes from a connection and yields one line at a time.
///
/// Bytes read past a newline stay buffered for the next call, so a single
/// connection can carry any number of requests. A line that grows beyond
/// [`MAX_LINE_BYTES`] without a newline is a read error, which ends the
/// owning conversation.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reads until a full line is available, the stream ends, or reading
    /// fails.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. A final partial line
    /// without a trailing newline is yielded before end-of-stream is
    /// reported. The newline delimiter is stripped from yielded lines.
    pub(crate) fn next_line(&mut self, stream: &mut impl Read) -> io::Result<Option<String>> {
        let mut chunk = [0_u8; 1024];
        loop {
            if let Some(pos) = self.pending.iter().position(|byte| *byte == b'\n') {
                if pos > MAX_LINE_BYTES {
                    return Err(oversized_line());
                }
                let rest = self.pending.split_off(pos + 1);
                let mut line = mem::replace(&mut self.pending, rest);
                line.truncate(pos);
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return Ok(Some(decode(line)));
            }
            if self.pending.len() > MAX_LINE_BYTES {
                return Err(oversized_line());
            }

            let bytes_read = read_with_retry(stream, &mut chunk)?;
            if bytes_read == 0 {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                let line = mem::take(&mut self.pending);
                return Ok(Some(decode(line)));
            }
            self.pending.extend_from_slice(&chunk[..bytes_read]);
        }
    }
}

/// Reads from the stream, retrying on interrupts.
fn read_with_retry(stream: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        }
    }
}

fn decode(line: Vec<u8>) -> String {
    // Invalid UTF-8 degrades into replacement characters and then fails JSON
    // parsing, producing the standard error response downstream.
    String::from_utf8_lossy(&line).into_owned()
}

fn oversized_line() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "request line exceeds maximum size")
}
