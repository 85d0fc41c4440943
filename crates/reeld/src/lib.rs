//! Core engine for the reel download manager.
//!
//! The engine is a local command-dispatch server meant to sit behind a
//! desktop or mobile front end. It reads newline-delimited JSON commands from
//! either its stdin/stdout pipes or a loopback TCP socket, routes each one to
//! a handler, and answers with one JSON response line correlated by the
//! request's optional `id`. See `reel-protocol` for the wire schemas and
//! `reel-config` for the startup options.
//!
//! The crate splits along the protocol pipeline:
//!
//! - `transport` obtains byte channels and slices them into lines: the fixed
//!   stdio pair, or one thread per accepted TCP connection.
//! - `dispatch` maps each non-blank line to exactly one response line and
//!   hosts the dev-mode logging decorator, which mirrors traffic to the
//!   diagnostic stream without altering wire bytes.
//! - [`telemetry`] pins all diagnostics to stderr so stdout stays a pure
//!   protocol stream.

mod banner;
mod dispatch;
mod process;
pub mod telemetry;
mod transport;

pub use banner::print_banner;
pub use process::{LaunchError, run_engine};

#[cfg(test)]
mod tests;
