//! Inputs to the session state machine.
//!
//! This module defines the [`AppEvent`] enum, covering everything the runtime
//! observes on the two sockets of a tunnel connection.

use irctun_proto::{Geometry, Message};

/// Events consumed by [`crate::App::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The client reported its terminal size.
    Resize(Geometry),

    /// The client submitted a line.
    Line(String),

    /// A line arrived from the IRC server.
    Irc(Message),

    /// About to dial the IRC server.
    Connecting,

    /// The IRC connection was established; registration should start.
    Connected,

    /// Dialing the IRC server failed.
    ConnectFailed {
        /// Human-readable failure.
        reason: String,
    },
}
