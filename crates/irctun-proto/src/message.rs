//! IRC wire-line parsing.
//!
//! A [`Message`] is the structured form of one CRLF-stripped line received from
//! the upstream server:
//!
//! ```text
//! [':' prefix ' '] command { ' ' param } [' ' ':' trailing]
//! ```
//!
//! Parsing is total. There is no error type: input that does not fit the
//! grammar degrades to empty fields, so a misbehaving server can never stall
//! the session.

/// One parsed IRC protocol line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// Source of the message without the leading `:`. Empty if absent.
    pub prefix: String,
    /// Command verb, uppercased. Numeric replies keep their three digits.
    pub command: String,
    /// Ordered parameters. A `:`-introduced trailing parameter is always last.
    pub params: Vec<String>,
}

impl Message {
    /// Parse a single wire line (CR/LF already removed).
    pub fn parse(line: &str) -> Self {
        let mut msg = Self::default();
        let mut rest = line;

        if let Some(stripped) = rest.strip_prefix(':') {
            match stripped.split_once(' ') {
                Some((prefix, tail)) => {
                    msg.prefix = prefix.to_string();
                    rest = tail;
                },
                None => {
                    msg.prefix = stripped.to_string();
                    return msg;
                },
            }
        }

        let mut command: Option<&str> = None;
        while !rest.is_empty() {
            if let Some(trailing) = rest.strip_prefix(':') {
                msg.params.push(trailing.to_string());
                break;
            }

            let (token, tail) = rest.split_once(' ').unwrap_or((rest, ""));
            rest = tail;

            // Runs of spaces separate tokens; they never produce empty params.
            if token.is_empty() {
                continue;
            }

            if command.is_none() {
                command = Some(token);
            } else {
                msg.params.push(token.to_string());
            }
        }

        msg.command = command.map(str::to_ascii_uppercase).unwrap_or_default();
        msg
    }

    /// Nickname portion of the prefix (everything before `!`).
    ///
    /// Server-originated prefixes have no `!`, so the whole prefix is
    /// returned.
    pub fn sender_nick(&self) -> &str {
        self.prefix.split_once('!').map_or(self.prefix.as_str(), |(nick, _)| nick)
    }

    /// Last parameter, or `""` if there are none.
    pub fn trailing(&self) -> &str {
        self.params.last().map_or("", String::as_str)
    }

    /// Parameter at `index`, if present.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Whether the prefix is a `nick!user@host` user mask.
    pub fn from_user(&self) -> bool {
        self.prefix.contains('!')
    }

    /// Three-digit numeric reply code, if this is a numeric.
    pub fn numeric(&self) -> Option<u16> {
        let bytes = self.command.as_bytes();
        if bytes.len() == 3 && bytes.iter().all(u8::is_ascii_digit) {
            self.command.parse().ok()
        } else {
            None
        }
    }
}
