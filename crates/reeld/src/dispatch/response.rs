//! Response serialization for the dispatch loop.

use std::io::Write;

use reel_protocol::Response;

use super::errors::DispatchError;

/// Writes responses as compact JSON lines.
///
/// The writer owns framing (one response, one newline) and flushes after
/// every reply so a front end reading the other end of a pipe never waits on
/// a buffered line.
pub(crate) struct ResponseWriter<W> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Serializes the response and writes it newline-terminated.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails; the caller
    /// decides whether that ends the conversation. Nothing is written when
    /// serialization fails.
    pub(crate) fn write_response(&mut self, response: &Response) -> Result<(), DispatchError> {
        let payload = serde_json::to_vec(response).map_err(DispatchError::serialize)?;
        self.writer.write_all(&payload)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
