//! Side-effects requested by the session state machine.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute, in
//! order.

use irctun_proto::IrcCommand;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Redraw the full frame from current state.
    Render,

    /// Reset the scroll region and clear the client screen.
    ClearScreen,

    /// Erase the prompt row (removes the client's local echo).
    ClearPrompt,

    /// Ask the client terminal for its size.
    QuerySize,

    /// Show a recalled history entry on the prompt row.
    FlashInput {
        /// Recalled line.
        text: String,
    },

    /// Write a line to the IRC server.
    Send(IrcCommand),

    /// End the session after a short grace period.
    Quit,
}
