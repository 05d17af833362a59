//! Per-conversation state.

use std::collections::VecDeque;

use irctun_proto::is_channel_name;

use crate::Roster;

/// Most transcript lines kept per window; older lines are evicted first.
pub const MAX_MESSAGES: usize = 500;

/// Name of the server window that always sits at index 0.
pub const STATUS_NAME: &str = "*status";

/// What a window talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Server messages and diagnostics.
    Status,
    /// An IRC channel.
    Channel,
    /// A private conversation with one user.
    Query,
}

/// One entry in the window list.
#[derive(Debug, Clone)]
pub struct ChannelWindow {
    /// Name as first seen (channel or nickname).
    pub name: String,
    /// Window kind, fixed at creation.
    pub kind: WindowKind,
    /// Channel topic. Empty when unknown.
    pub topic: String,
    /// Channel mode string, e.g. `+nt`. Empty when unknown.
    pub mode: String,
    /// Channel members. Unused for status and query windows.
    pub roster: Roster,
    /// First visible row of the member pane.
    pub nick_scroll: usize,
    /// New lines arrived while the window was in the background.
    pub unread: bool,
    /// Our nickname was mentioned, or a private message arrived, while in the
    /// background.
    pub highlight: bool,
    lines: VecDeque<String>,
}

impl ChannelWindow {
    /// The status window.
    pub fn status() -> Self {
        Self::with_kind(STATUS_NAME.to_string(), WindowKind::Status)
    }

    /// A channel or query window, kind derived from the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = if is_channel_name(&name) { WindowKind::Channel } else { WindowKind::Query };
        Self::with_kind(name, kind)
    }

    fn with_kind(name: String, kind: WindowKind) -> Self {
        Self {
            name,
            kind,
            topic: String::new(),
            mode: String::new(),
            roster: Roster::default(),
            nick_scroll: 0,
            unread: false,
            highlight: false,
            lines: VecDeque::new(),
        }
    }

    /// Label shown in the window list.
    pub fn label(&self) -> &str {
        match self.kind {
            WindowKind::Status => "status",
            WindowKind::Channel | WindowKind::Query => &self.name,
        }
    }

    /// Append a rendered line, evicting the oldest beyond [`MAX_MESSAGES`].
    pub fn push_line(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > MAX_MESSAGES {
            self.lines.pop_front();
        }
    }

    /// All stored lines, oldest first.
    pub fn lines(&self) -> &VecDeque<String> {
        &self.lines
    }

    /// The last `n` lines, oldest first.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = &str> {
        let skip = self.lines.len().saturating_sub(n);
        self.lines.iter().skip(skip).map(String::as_str)
    }

    /// Clear the unread and highlight flags.
    pub fn mark_seen(&mut self) {
        self.unread = false;
        self.highlight = false;
    }
}
