//! Session layer for the IRC tunnel.
//!
//! A pure state machine for one client connection, enabling deterministic
//! tests with the same code that runs in production. The runtime feeds it
//! [`AppEvent`]s from both sockets and executes the [`AppAction`]s it returns.
//!
//! # Components
//!
//! - [`App`]: session state machine (input dispatch, IRC reducer)
//! - [`SessionState`]: windows, geometry, toggles, history
//! - [`ChannelWindow`]: per-conversation transcript and roster
//! - [`Environment`]: randomness and clock abstraction

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod command;
mod env;
mod event;
pub mod format;
mod history;
mod input;
pub mod nick;
mod reducer;
pub mod roster;
mod state;
mod window;

pub use action::AppAction;
pub use app::{App, DISCONNECT_MESSAGE, QUIT_MESSAGE, REALNAME, USERNAME};
pub use command::{NICK_SCROLL_STEP, SwitchTarget, UserCommand};
pub use env::Environment;
pub use event::AppEvent;
pub use history::{History, MAX_HISTORY};
pub use input::ArrowKeys;
pub use roster::{Rank, Roster};
pub use state::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SessionState};
pub use window::{ChannelWindow, MAX_MESSAGES, STATUS_NAME, WindowKind};
