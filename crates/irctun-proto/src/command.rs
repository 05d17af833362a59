//! Outbound IRC commands.
//!
//! [`IrcCommand`] renders to wire text through [`std::fmt::Display`] (no line
//! terminator) and [`IrcCommand::to_wire`] (CRLF appended).

use std::fmt;

/// A client-to-server IRC line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcCommand {
    /// `NICK <nick>`
    Nick(String),

    /// `USER <user> 0 * :<realname>`
    User {
        /// Username field.
        user: String,
        /// Realname field.
        realname: String,
    },

    /// `JOIN <channel>`
    Join(String),

    /// `PART <channel>`
    Part(String),

    /// `PRIVMSG <target> :<text>`
    Privmsg {
        /// Channel or nickname.
        target: String,
        /// Message body.
        text: String,
    },

    /// `PRIVMSG <target> :\x01ACTION <text>\x01`
    Action {
        /// Channel or nickname.
        target: String,
        /// Action body.
        text: String,
    },

    /// `PONG :<token>`
    Pong(String),

    /// `MODE <target>`, a mode query.
    Mode(String),

    /// `NAMES <channel>`
    Names(String),

    /// `TOPIC <channel>` or `TOPIC <channel> :<text>`
    Topic {
        /// Channel.
        channel: String,
        /// New topic; `None` queries the current one.
        text: Option<String>,
    },

    /// `QUIT :<reason>`
    Quit(String),
}

impl IrcCommand {
    /// Wire form, CRLF-terminated.
    pub fn to_wire(&self) -> String {
        format!("{self}\r\n")
    }
}

impl fmt::Display for IrcCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nick(nick) => write!(f, "NICK {nick}"),
            Self::User { user, realname } => write!(f, "USER {user} 0 * :{realname}"),
            Self::Join(channel) => write!(f, "JOIN {channel}"),
            Self::Part(channel) => write!(f, "PART {channel}"),
            Self::Privmsg { target, text } => write!(f, "PRIVMSG {target} :{text}"),
            Self::Action { target, text } => write!(f, "PRIVMSG {target} :\x01ACTION {text}\x01"),
            Self::Pong(token) => write!(f, "PONG :{token}"),
            Self::Mode(target) => write!(f, "MODE {target}"),
            Self::Names(channel) => write!(f, "NAMES {channel}"),
            Self::Topic { channel, text: Some(text) } => write!(f, "TOPIC {channel} :{text}"),
            Self::Topic { channel, text: None } => write!(f, "TOPIC {channel}"),
            Self::Quit(reason) => write!(f, "QUIT :{reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_lines() {
        assert_eq!(IrcCommand::Nick("bob123".into()).to_wire(), "NICK bob123\r\n");
        assert_eq!(
            IrcCommand::User { user: "tunnel".into(), realname: "Tunnel User".into() }.to_wire(),
            "USER tunnel 0 * :Tunnel User\r\n"
        );
    }

    #[test]
    fn action_is_ctcp_framed() {
        let cmd = IrcCommand::Action { target: "#rust".into(), text: "waves".into() };
        assert_eq!(cmd.to_string(), "PRIVMSG #rust :\x01ACTION waves\x01");
    }

    #[test]
    fn topic_query_and_set() {
        let query = IrcCommand::Topic { channel: "#rust".into(), text: None };
        let set = IrcCommand::Topic { channel: "#rust".into(), text: Some("new topic".into()) };
        assert_eq!(query.to_string(), "TOPIC #rust");
        assert_eq!(set.to_string(), "TOPIC #rust :new topic");
    }
}
