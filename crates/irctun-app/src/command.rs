//! Slash-command parsing.

use irctun_proto::is_channel_name;

/// Default number of rows `/nup` and `/nd` scroll by.
pub const NICK_SCROLL_STEP: usize = 5;

/// Target of a window switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchTarget {
    /// Position in the window list.
    Index(usize),
    /// Window name.
    Name(String),
}

/// A parsed `/command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// `/quit`, `/exit`
    Quit,
    /// `/join`, `/j <channel>`
    Join(String),
    /// `/part`, `/leave [channel]`
    Part(Option<String>),
    /// `/sw`, `/switch`, `/w <index or name>`
    Switch(SwitchTarget),
    /// `/nick <name>`
    Nick(String),
    /// `/me <text>`
    Me(String),
    /// `/msg <target> [text]`
    Msg {
        /// Nickname or channel.
        target: String,
        /// Message to send, if any.
        text: Option<String>,
    },
    /// `/query`, `/q <nick>`
    Query(String),
    /// `/close`
    Close,
    /// `/topic [text]`
    Topic(Option<String>),
    /// `/nicklist`, `/nl`
    ToggleNickList,
    /// `/chanlist`, `/cl`
    ToggleWindowList,
    /// `/nup [n]`
    NickUp(usize),
    /// `/ndown`, `/nd [n]`
    NickDown(usize),
    /// `/redraw`, `/rd`
    Redraw,
    /// `/resize`
    Resize,
    /// `/help`
    Help,
    /// Anything unrecognised.
    Unknown(String),
}

impl UserCommand {
    /// Parse a line starting with `/`.
    ///
    /// Returns `None` for a known command missing its required argument;
    /// those are silently ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let (name, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();
        let first = arg.split_whitespace().next();

        let cmd = match name.to_lowercase().as_str() {
            "/quit" | "/exit" => Self::Quit,
            "/join" | "/j" => {
                let channel = first?;
                if is_channel_name(channel) {
                    Self::Join(channel.to_string())
                } else {
                    Self::Join(format!("#{channel}"))
                }
            },
            "/part" | "/leave" => Self::Part(first.map(str::to_string)),
            "/sw" | "/switch" | "/w" => {
                let target = first?;
                if target.starts_with(|c: char| c.is_ascii_digit()) {
                    Self::Switch(SwitchTarget::Index(leading_number(target)))
                } else {
                    Self::Switch(SwitchTarget::Name(target.to_string()))
                }
            },
            "/nick" => Self::Nick(first?.to_string()),
            "/me" => Self::Me(non_empty(arg)?),
            "/msg" => {
                let (target, text) = arg.split_once(' ').unwrap_or((arg, ""));
                Self::Msg { target: non_empty(target)?, text: non_empty(text.trim()) }
            },
            "/query" | "/q" => Self::Query(first?.to_string()),
            "/close" => Self::Close,
            "/topic" => Self::Topic(non_empty(arg)),
            "/nicklist" | "/nl" => Self::ToggleNickList,
            "/chanlist" | "/cl" => Self::ToggleWindowList,
            "/nup" => Self::NickUp(scroll_step(arg)),
            "/ndown" | "/nd" => Self::NickDown(scroll_step(arg)),
            "/redraw" | "/rd" => Self::Redraw,
            "/resize" => Self::Resize,
            "/help" => Self::Help,
            other => Self::Unknown(other.to_string()),
        };
        Some(cmd)
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Value of the leading digit run, saturating on overflow.
fn leading_number(s: &str) -> usize {
    s.bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0usize, |n, d| n.saturating_mul(10).saturating_add(usize::from(d - b'0')))
}

fn scroll_step(arg: &str) -> usize {
    match leading_number(arg) {
        0 => NICK_SCROLL_STEP,
        n => n,
    }
}
