//! Terminal rendering for the IRC tunnel.
//!
//! Clients are dumb terminals on the far end of a TCP socket, so rendering
//! produces bytes rather than drawing to a local tty. Every entry point is a
//! pure function returning the sequence to write.
//!
//! # Components
//!
//! - [`View`]: owned snapshot of the session, taken under the lock
//! - [`render`]: full frame (title, panes, status bar, prompt)
//! - [`ansi`]: escape-aware width measurement and truncation
//! - [`command`]: scroll-region and cursor-report sequences

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod ansi;
pub mod command;
mod screen;
mod ui;
mod view;

pub use screen::{clear_screen, size_query, splash};
pub use ui::{
    NICK_LIST_MIN_TERMINAL, NICK_LIST_WIDTH, WINDOW_LIST_MIN_TERMINAL, WINDOW_LIST_WIDTH,
    clear_prompt, flash_input, render,
};
pub use view::{View, WindowEntry};
