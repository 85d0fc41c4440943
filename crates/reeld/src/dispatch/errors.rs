//! Error types for request parsing and response writing.

use std::io;

use thiserror::Error;

/// Errors surfaced while turning request lines into response lines.
///
/// None of these reach the peer as transport failures: parse errors become
/// `status:"error"` responses, and write/serialize errors are logged to the
/// diagnostic stream while the request goes unanswered.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request line could not be parsed as a command.
    #[error("invalid JSON in request line: {source}")]
    MalformedRequest {
        #[source]
        source: serde_json::Error,
    },

    /// Response failed to serialize. Should not occur for well-formed
    /// response values.
    #[error("failed to serialize response: {source}")]
    SerializeResponse {
        #[source]
        source: serde_json::Error,
    },

    /// Writing the response to the connection failed.
    #[error("failed to write response: {0}")]
    Io(#[from] io::Error),
}

impl DispatchError {
    pub(crate) fn malformed(source: serde_json::Error) -> Self {
        Self::MalformedRequest { source }
    }

    pub(crate) fn serialize(source: serde_json::Error) -> Self {
        Self::SerializeResponse { source }
    }
}
