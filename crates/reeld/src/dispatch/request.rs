//! Request parsing for the dispatch loop.

use reel_protocol::Command;

use super::errors::DispatchError;

/// Parses one request line into a [`Command`].
///
/// The line arrives with its newline delimiter already stripped. Unknown
/// fields are ignored and a missing `cmd` parses as the empty name, which
/// routes to the unknown-command arm rather than failing here.
pub(crate) fn parse_command(line: &str) -> Result<Command, DispatchError> {
    serde_json::from_str(line).map_err(DispatchError::malformed)
}
