//! Shared helpers for unit tests.

pub mod scripted;
pub mod socket_guard;

pub use scripted::ScriptedTransport;
