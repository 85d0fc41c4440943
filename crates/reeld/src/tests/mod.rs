//! Behaviour tests for the engine protocol, in-memory and over TCP.

mod support;
