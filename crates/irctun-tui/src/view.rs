//! Render snapshot.
//!
//! [`View`] holds exactly what one frame needs, copied out of
//! [`SessionState`] while the session lock is held. Rendering then runs on
//! the copy with the lock released.

use irctun_app::{SessionState, WindowKind};

/// One row of the window list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowEntry {
    /// Display label (`status` for the status window).
    pub label: String,
    /// New lines arrived while in the background.
    pub unread: bool,
    /// Our nick was mentioned while in the background.
    pub highlight: bool,
}

/// Owned copy of the state visible in one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Our nickname.
    pub nick: String,
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
    /// Rows between the title and status bars.
    pub main_height: usize,
    /// Active window name.
    pub name: String,
    /// Active window kind.
    pub kind: WindowKind,
    /// Active channel mode, possibly empty.
    pub mode: String,
    /// Active channel topic, possibly empty.
    pub topic: String,
    /// Last `main_height` transcript lines of the active window.
    pub lines: Vec<String>,
    /// Every window, in list order.
    pub entries: Vec<WindowEntry>,
    /// Index of the active window in `entries`.
    pub active: usize,
    /// Active channel roster in display order. Empty for non-channels.
    pub members: Vec<String>,
    /// Active window's roster scroll offset.
    pub nick_scroll: usize,
    /// Nick pane toggle.
    pub show_nick_list: bool,
    /// Window list toggle.
    pub show_window_list: bool,
}

impl View {
    /// Copy the visible parts of `state`.
    pub fn capture(state: &SessionState) -> Self {
        let geometry = state.geometry();
        let main_height = state.main_height();
        let window = state.active_window();

        let members = if window.kind == WindowKind::Channel {
            window.roster.sorted().into_iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        Self {
            nick: state.nick().to_string(),
            width: geometry.width,
            height: geometry.height,
            main_height,
            name: window.name.clone(),
            kind: window.kind,
            mode: window.mode.clone(),
            topic: window.topic.clone(),
            lines: window.tail(main_height).map(str::to_string).collect(),
            entries: state
                .windows()
                .iter()
                .map(|w| WindowEntry {
                    label: w.label().to_string(),
                    unread: w.unread,
                    highlight: w.highlight,
                })
                .collect(),
            active: state.active_index(),
            members,
            nick_scroll: window.nick_scroll,
            show_nick_list: state.show_nick_list(),
            show_window_list: state.show_window_list(),
        }
    }
}
