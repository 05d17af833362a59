//! Typed view of server-originated messages.
//!
//! [`IrcEvent`] is a closed set of the server messages the session reacts to.
//! Dispatch on it is exhaustive, so adding a variant forces every consumer to
//! decide how to handle it.

use crate::Message;

/// RFC 1459 numeric: registration complete.
pub const RPL_WELCOME: u16 = 1;
/// RFC 1459 numeric: channel mode reply.
pub const RPL_CHANNELMODEIS: u16 = 324;
/// RFC 1459 numeric: channel topic reply.
pub const RPL_TOPIC: u16 = 332;
/// RFC 1459 numeric: names reply.
pub const RPL_NAMREPLY: u16 = 353;
/// RFC 1459 numeric: end of names.
pub const RPL_ENDOFNAMES: u16 = 366;
/// RFC 1459 numeric: nickname already in use.
pub const ERR_NICKNAMEINUSE: u16 = 433;

const CTCP_ACTION_OPEN: &str = "\x01ACTION ";
const CTCP_DELIM: char = '\x01';

/// Server message classified by command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrcEvent {
    /// Keepalive probe; must be answered with the same token.
    Ping {
        /// Token to echo back.
        token: String,
    },

    /// Registration completed (`001`).
    Welcome,

    /// Channel mode reply (`324`).
    ChannelMode {
        /// Channel the mode belongs to.
        channel: String,
        /// Mode string with its arguments, space-joined.
        mode: String,
    },

    /// Channel topic reply (`332`).
    Topic {
        /// Channel the topic belongs to.
        channel: String,
        /// Topic text.
        topic: String,
    },

    /// One chunk of a names reply (`353`).
    Names {
        /// Channel being listed.
        channel: String,
        /// Member entries, rank prefixes intact.
        names: Vec<String>,
    },

    /// End of a names reply (`366`).
    EndOfNames,

    /// Our requested nickname is taken (`433`).
    NickInUse,

    /// Any other numeric reply.
    Numeric {
        /// Three-digit reply code.
        code: u16,
    },

    /// A user joined a channel.
    Join {
        /// Joining nickname.
        nick: String,
        /// Channel joined.
        channel: String,
    },

    /// A user left a channel.
    Part {
        /// Departing nickname.
        nick: String,
        /// Channel left.
        channel: String,
    },

    /// A user disconnected from the network.
    Quit {
        /// Departing nickname.
        nick: String,
        /// Quit message, possibly empty.
        reason: String,
    },

    /// A user was removed from a channel.
    Kick {
        /// Channel the kick happened in.
        channel: String,
        /// Nickname that was kicked.
        nick: String,
        /// Kick reason, possibly empty.
        reason: String,
    },

    /// Chat message, with CTCP ACTION framing already unwrapped.
    Privmsg {
        /// Sender nickname.
        sender: String,
        /// Channel name or our own nickname.
        target: String,
        /// Message body.
        text: String,
        /// Whether the body was a CTCP ACTION (`/me`).
        action: bool,
    },

    /// Notice from a user or the server.
    Notice {
        /// Sender nickname or server name.
        sender: String,
        /// True when the prefix is not a user mask.
        from_server: bool,
        /// Notice text.
        text: String,
    },

    /// A nickname change.
    Nick {
        /// Previous nickname.
        old: String,
        /// New nickname.
        new: String,
    },

    /// A mode change on a channel.
    ChannelModeChange {
        /// Channel whose modes changed.
        channel: String,
    },

    /// A recognised command whose parameters are too short to act on.
    Malformed,

    /// Anything else, kept for diagnostics.
    Other {
        /// Command verb.
        command: String,
        /// Parameters, space-joined.
        params: String,
    },
}

impl IrcEvent {
    /// Classify a parsed message.
    pub fn from_message(msg: &Message) -> Self {
        if let Some(code) = msg.numeric() {
            return Self::from_numeric(code, msg);
        }

        let nick = msg.sender_nick();
        match msg.command.as_str() {
            "PING" => Self::Ping { token: msg.trailing().to_string() },
            "JOIN" => match msg.param(0) {
                Some(channel) => Self::Join { nick: nick.to_string(), channel: channel.to_string() },
                None => Self::Malformed,
            },
            "PART" => match msg.param(0) {
                Some(channel) => Self::Part { nick: nick.to_string(), channel: channel.to_string() },
                None => Self::Malformed,
            },
            "QUIT" => Self::Quit { nick: nick.to_string(), reason: msg.trailing().to_string() },
            "KICK" => match (msg.param(0), msg.param(1)) {
                (Some(channel), Some(kicked)) => Self::Kick {
                    channel: channel.to_string(),
                    nick: kicked.to_string(),
                    reason: msg.param(2).unwrap_or_default().to_string(),
                },
                _ => Self::Malformed,
            },
            "PRIVMSG" => match (msg.params.len(), msg.param(0)) {
                (2.., Some(target)) => {
                    let (text, action) = unwrap_ctcp_action(msg.trailing());
                    Self::Privmsg {
                        sender: nick.to_string(),
                        target: target.to_string(),
                        text: text.to_string(),
                        action,
                    }
                },
                _ => Self::Malformed,
            },
            "NOTICE" => Self::Notice {
                sender: nick.to_string(),
                from_server: !msg.from_user(),
                text: msg.trailing().to_string(),
            },
            "NICK" => match msg.param(0) {
                Some(new) => Self::Nick { old: nick.to_string(), new: new.to_string() },
                None => Self::Malformed,
            },
            "MODE" => match msg.param(0) {
                Some(target) if is_channel_name(target) => {
                    Self::ChannelModeChange { channel: target.to_string() }
                },
                _ => Self::Other { command: msg.command.clone(), params: msg.params.join(" ") },
            },
            _ => Self::Other { command: msg.command.clone(), params: msg.params.join(" ") },
        }
    }

    fn from_numeric(code: u16, msg: &Message) -> Self {
        match code {
            RPL_WELCOME => Self::Welcome,
            RPL_CHANNELMODEIS if msg.params.len() >= 3 => Self::ChannelMode {
                channel: msg.params[1].clone(),
                mode: msg.params[2..].join(" "),
            },
            RPL_TOPIC if msg.params.len() >= 2 => {
                Self::Topic { channel: msg.params[1].clone(), topic: msg.trailing().to_string() }
            },
            RPL_NAMREPLY => {
                // `353 me = #chan :names`, where the `=`/`*`/`@` visibility
                // marker is optional on some servers.
                match msg.params.iter().find(|p| is_channel_name(p)) {
                    Some(channel) => Self::Names {
                        channel: channel.clone(),
                        names: msg.trailing().split_whitespace().map(str::to_string).collect(),
                    },
                    None => Self::Malformed,
                }
            },
            RPL_ENDOFNAMES => Self::EndOfNames,
            ERR_NICKNAMEINUSE => Self::NickInUse,
            _ => Self::Numeric { code },
        }
    }
}

/// Whether `name` addresses a channel rather than a user.
pub fn is_channel_name(name: &str) -> bool {
    name.starts_with('#') || name.starts_with('&')
}

/// Strip `\x01ACTION ...\x01` framing.
///
/// Returns the inner text and `true` for an action, or the original text and
/// `false` otherwise.
pub fn unwrap_ctcp_action(text: &str) -> (&str, bool) {
    text.strip_prefix(CTCP_ACTION_OPEN)
        .and_then(|inner| inner.strip_suffix(CTCP_DELIM))
        .map_or((text, false), |inner| (inner, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> IrcEvent {
        IrcEvent::from_message(&Message::parse(line))
    }

    #[test]
    fn ping_carries_token() {
        assert_eq!(event("PING :irc.example.net"), IrcEvent::Ping {
            token: "irc.example.net".into()
        });
    }

    #[test]
    fn action_is_unwrapped() {
        assert_eq!(event(":bob!b@h PRIVMSG #rust :\x01ACTION waves\x01"), IrcEvent::Privmsg {
            sender: "bob".into(),
            target: "#rust".into(),
            text: "waves".into(),
            action: true,
        });
    }

    #[test]
    fn unterminated_action_is_plain_text() {
        let (text, action) = unwrap_ctcp_action("\x01ACTION waves");
        assert_eq!(text, "\x01ACTION waves");
        assert!(!action);
    }

    #[test]
    fn privmsg_without_body_is_malformed() {
        assert_eq!(event(":bob!b@h PRIVMSG #rust"), IrcEvent::Malformed);
    }

    #[test]
    fn names_reply_finds_channel_after_visibility_marker() {
        assert_eq!(event(":srv 353 me = #rust :@alice +bob carol"), IrcEvent::Names {
            channel: "#rust".into(),
            names: vec!["@alice".into(), "+bob".into(), "carol".into()],
        });
    }

    #[test]
    fn channel_mode_joins_arguments() {
        assert_eq!(event(":srv 324 me #rust +kl secret 10"), IrcEvent::ChannelMode {
            channel: "#rust".into(),
            mode: "+kl secret 10".into(),
        });
    }

    #[test]
    fn short_channel_mode_reply_is_generic_numeric() {
        assert_eq!(event(":srv 324 me #rust"), IrcEvent::Numeric { code: 324 });
    }

    #[test]
    fn kick_reason_is_optional() {
        assert_eq!(event(":op!o@h KICK #rust bob"), IrcEvent::Kick {
            channel: "#rust".into(),
            nick: "bob".into(),
            reason: String::new(),
        });
    }

    #[test]
    fn user_mode_is_not_a_channel_mode_change() {
        assert!(matches!(event(":me MODE me :+i"), IrcEvent::Other { .. }));
        assert_eq!(event(":op!o@h MODE #rust +o bob"), IrcEvent::ChannelModeChange {
            channel: "#rust".into()
        });
    }

    #[test]
    fn notice_origin_is_classified() {
        assert!(matches!(
            event(":irc.example.net NOTICE * :Looking up your hostname"),
            IrcEvent::Notice { from_server: true, .. }
        ));
        assert!(matches!(
            event(":bob!b@h NOTICE me :psst"),
            IrcEvent::Notice { from_server: false, .. }
        ));
    }
}
