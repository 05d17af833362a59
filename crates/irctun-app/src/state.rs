//! Observable session state.
//!
//! [`SessionState`] is the view model of one tunnel connection: identity,
//! terminal geometry, the ordered window list with its active pointer, pane
//! toggles, and input history. The renderer reads it; only [`crate::App`]
//! mutates it.
//!
//! # Invariants
//!
//! - `windows[0]` is the status window and is never removed
//! - `active < windows.len()`

use irctun_proto::Geometry;

use crate::{ChannelWindow, History, WindowKind, roster::fold_case};

/// Width assumed until the client reports its size.
pub const DEFAULT_WIDTH: u16 = 80;
/// Height assumed until the client reports its size.
pub const DEFAULT_HEIGHT: u16 = 24;

/// Per-connection session state.
#[derive(Debug, Clone)]
pub struct SessionState {
    nick: String,
    geometry: Geometry,
    geometry_known: bool,
    windows: Vec<ChannelWindow>,
    active: usize,
    show_nick_list: bool,
    show_window_list: bool,
    history: History,
}

impl SessionState {
    /// Fresh state with a single status window and default geometry.
    pub fn new(nick: impl Into<String>) -> Self {
        Self {
            nick: nick.into(),
            geometry: Geometry { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT },
            geometry_known: false,
            windows: vec![ChannelWindow::status()],
            active: 0,
            show_nick_list: true,
            show_window_list: true,
            history: History::default(),
        }
    }

    /// Our current nickname.
    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// Replace our nickname.
    pub fn set_nick(&mut self, nick: impl Into<String>) {
        self.nick = nick.into();
    }

    /// Whether `name` is our nickname (case-insensitive).
    pub fn is_self(&self, name: &str) -> bool {
        fold_case(name) == fold_case(&self.nick)
    }

    /// Terminal size in use.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Whether the client has reported its size at least once.
    pub fn geometry_known(&self) -> bool {
        self.geometry_known
    }

    /// Record a reported size. Returns `true` if it differs from the current
    /// one.
    pub fn set_geometry(&mut self, geometry: Geometry) -> bool {
        self.geometry_known = true;
        if self.geometry == geometry {
            return false;
        }
        self.geometry = geometry;
        true
    }

    /// Rows available to the transcript pane.
    pub fn main_height(&self) -> usize {
        usize::from(self.geometry.height).saturating_sub(3).max(1)
    }

    /// All windows, status first.
    pub fn windows(&self) -> &[ChannelWindow] {
        &self.windows
    }

    /// Index of the active window.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The active window.
    pub fn active_window(&self) -> &ChannelWindow {
        &self.windows[self.active]
    }

    /// The active window, mutably.
    pub fn active_window_mut(&mut self) -> &mut ChannelWindow {
        &mut self.windows[self.active]
    }

    /// Whether the status window is active.
    pub fn status_active(&self) -> bool {
        self.active == 0
    }

    /// Whether a new status line is visible without switching: status is
    /// active or the window list shows its unread flag.
    pub fn status_visible(&self) -> bool {
        self.status_active() || self.show_window_list
    }

    /// Index of the window called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        let key = fold_case(name);
        self.windows.iter().position(|w| fold_case(&w.name) == key)
    }

    /// The window called `name`.
    pub fn window(&self, name: &str) -> Option<&ChannelWindow> {
        self.position(name).map(|i| &self.windows[i])
    }

    /// The window called `name`, mutably.
    pub fn window_mut(&mut self, name: &str) -> Option<&mut ChannelWindow> {
        self.position(name).map(|i| &mut self.windows[i])
    }

    /// Window at `index`, mutably.
    pub fn window_at_mut(&mut self, index: usize) -> Option<&mut ChannelWindow> {
        self.windows.get_mut(index)
    }

    /// Index of the window called `name`, appending a new one if absent.
    pub fn ensure_window(&mut self, name: &str) -> usize {
        if let Some(index) = self.position(name) {
            return index;
        }
        self.windows.push(ChannelWindow::new(name));
        self.windows.len() - 1
    }

    /// Activate the window called `name`. Unknown names are a no-op.
    pub fn switch_to_name(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => self.switch_to_index(index),
            None => false,
        }
    }

    /// Activate the window at `index`. Out-of-range indexes are a no-op.
    pub fn switch_to_index(&mut self, index: usize) -> bool {
        let Some(window) = self.windows.get_mut(index) else {
            return false;
        };
        window.mark_seen();
        self.active = index;
        true
    }

    /// Remove the window called `name`.
    ///
    /// The status window cannot be removed. If a window before the active one
    /// goes, the active pointer follows its window; if the active window
    /// itself goes, the pointer is clamped into range.
    pub fn remove_window(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        if index == 0 {
            return false;
        }

        self.windows.remove(index);
        if self.active > index {
            self.active -= 1;
        } else if self.active == index {
            self.active = index.min(self.windows.len() - 1);
            self.windows[self.active].mark_seen();
        }
        true
    }

    /// Indexes of every window whose roster contains `nick`.
    pub fn windows_with_nick(&self, nick: &str) -> Vec<usize> {
        self.windows
            .iter()
            .enumerate()
            .filter(|(_, w)| w.roster.contains(nick))
            .map(|(i, _)| i)
            .collect()
    }

    /// Append a line to the window at `index`, flagging it unread if it is in
    /// the background.
    pub fn add_line(&mut self, index: usize, line: String) {
        let active = self.active;
        if let Some(window) = self.windows.get_mut(index) {
            window.push_line(line);
            if index != active {
                window.unread = true;
            }
        }
    }

    /// Append a line to the status window.
    pub fn add_status_line(&mut self, line: String) {
        self.add_line(0, line);
    }

    /// Append a line to the active window.
    pub fn add_active_line(&mut self, line: String) {
        self.add_line(self.active, line);
    }

    /// Whether the member pane is enabled.
    pub fn show_nick_list(&self) -> bool {
        self.show_nick_list
    }

    /// Flip the member pane toggle, returning the new value.
    pub fn toggle_nick_list(&mut self) -> bool {
        self.show_nick_list = !self.show_nick_list;
        self.show_nick_list
    }

    /// Whether the window-list pane is enabled.
    pub fn show_window_list(&self) -> bool {
        self.show_window_list
    }

    /// Flip the window-list pane toggle, returning the new value.
    pub fn toggle_window_list(&mut self) -> bool {
        self.show_window_list = !self.show_window_list;
        self.show_window_list
    }

    /// Scroll the active window's member pane up by `n` rows.
    pub fn scroll_nicks_up(&mut self, n: usize) {
        let window = self.active_window_mut();
        window.nick_scroll = window.nick_scroll.saturating_sub(n);
    }

    /// Scroll the active window's member pane down by `n` rows, clamped so
    /// the last member stays on screen.
    pub fn scroll_nicks_down(&mut self, n: usize) {
        let max = self.max_nick_scroll();
        let window = self.active_window_mut();
        window.nick_scroll = window.nick_scroll.saturating_add(n).min(max);
    }

    fn max_nick_scroll(&self) -> usize {
        (self.active_window().roster.len() + 2).saturating_sub(self.main_height())
    }

    /// Submitted-line history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Submitted-line history, mutably.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Kind of the active window.
    pub fn active_kind(&self) -> WindowKind {
        self.active_window().kind
    }
}
