//! Wire codecs for the IRC tunnel.
//!
//! Everything here is synchronous and free of I/O: the client-side telnet/ANSI
//! stream decoder, the IRC line parser, the typed classification of server
//! messages, and outbound IRC commands.
//!
//! # Components
//!
//! - [`TelnetDecoder`]: client bytes in, [`Decoded`] lines and resizes out
//! - [`Message`]: one parsed IRC line
//! - [`IrcEvent`]: closed classification of server messages
//! - [`IrcCommand`]: client-to-server lines

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
pub mod cpr;
mod decoder;
mod event;
mod message;
pub mod telnet;

pub use command::IrcCommand;
pub use decoder::{Decoded, Geometry, MAX_LINE, TelnetDecoder};
pub use event::{
    ERR_NICKNAMEINUSE, IrcEvent, RPL_CHANNELMODEIS, RPL_ENDOFNAMES, RPL_NAMREPLY, RPL_TOPIC,
    RPL_WELCOME, is_channel_name, unwrap_ctcp_action,
};
pub use message::Message;
