//! Transcript line formatting.
//!
//! Lines are stored pre-styled: a dim `HH:MM` stamp followed by a body with
//! embedded SGR sequences. The renderer truncates them escape-aware, so
//! styling never counts against the pane width.

use std::fmt::Display;

use crossterm::style::{Color, Stylize};

use crate::Environment;

const NICK_COLORS: [Color; 6] = [
    Color::DarkRed,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkBlue,
    Color::DarkMagenta,
    Color::DarkCyan,
];

/// `HH:MM` (UTC) for a Unix timestamp.
pub fn clock(secs: u64) -> String {
    let minutes = secs / 60;
    format!("{:02}:{:02}", (minutes / 60) % 24, minutes % 60)
}

/// Stable colour for a nickname.
pub fn nick_color(nick: &str) -> Color {
    let hash = nick.chars().fold(0u64, |h, c| h.wrapping_mul(31).wrapping_add(u64::from(c)));
    NICK_COLORS[(hash % NICK_COLORS.len() as u64) as usize]
}

/// Drop C0 control characters and DEL.
///
/// Remote text must never reach the client terminal with its own escape
/// sequences intact.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_ascii_control()).collect()
}

/// Builds timestamped transcript lines.
pub(crate) struct Lines<'a, E> {
    env: &'a E,
}

impl<'a, E: Environment> Lines<'a, E> {
    pub(crate) fn new(env: &'a E) -> Self {
        Self { env }
    }

    fn stamp(&self, body: impl Display) -> String {
        format!("{} {body}", clock(self.env.wall_clock_secs()).dark_grey())
    }

    /// Dim informational note.
    pub(crate) fn note(&self, text: &str) -> String {
        self.stamp(text.dark_grey())
    }

    /// `<nick> text`
    pub(crate) fn chat(&self, nick: &str, text: &str) -> String {
        let tag = format!("<{}>", sanitize(nick)).with(nick_color(nick));
        self.stamp(format!("{tag} {}", sanitize(text)))
    }

    /// `* nick text`
    pub(crate) fn action(&self, nick: &str, text: &str) -> String {
        self.stamp(format!("* {} {}", sanitize(nick), sanitize(text)).dark_magenta())
    }

    /// `-sender- text`
    pub(crate) fn notice(&self, sender: &str, text: &str) -> String {
        self.stamp(format!("{} {}", format!("-{}-", sanitize(sender)).dark_yellow(), sanitize(text)))
    }

    /// `[code] text` for numeric replies.
    pub(crate) fn numeric(&self, code: u16, text: &str) -> String {
        self.stamp(format!("{} {}", format!("[{code:03}]").dark_grey(), sanitize(text)))
    }

    /// Dim note with one emphasised value, e.g. `Joined #rust`.
    pub(crate) fn note_with(&self, before: &str, value: &str, after: &str) -> String {
        self.stamp(format!(
            "{}{}{}",
            before.dark_grey(),
            sanitize(value).dark_cyan().bold(),
            after.dark_grey()
        ))
    }

    /// Bold green banner.
    pub(crate) fn banner(&self, text: &str) -> String {
        self.stamp(text.dark_green().bold())
    }

    /// Bold red error.
    pub(crate) fn error(&self, label: &str, detail: &str) -> String {
        self.stamp(format!("{} {}", label.red().bold(), sanitize(detail)))
    }

    /// Help heading.
    pub(crate) fn heading(&self, text: &str) -> String {
        self.stamp(text.dark_cyan().bold())
    }

    /// Help entry: command column then description.
    pub(crate) fn help_entry(&self, usage: &str, description: &str) -> String {
        self.stamp(format!("{} {description}", format!(" {usage:<16}").dark_green()))
    }

    /// Unformatted line, used for the server diagnostics pass-through.
    pub(crate) fn plain(&self, text: &str) -> String {
        self.stamp(sanitize(text).dark_grey())
    }
}
