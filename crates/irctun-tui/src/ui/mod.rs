//! Frame rendering.
//!
//! Pure functions from a [`View`] to terminal bytes. Nothing here touches a
//! socket; the caller writes the returned buffer.
//!
//! ```text
//! row 0          title bar
//! rows 1..=main  [windows │] chat [│ nicks]
//! row h-2        status bar
//! row h-1        prompt
//! ```

mod chat;
mod nicks;
mod prompt;
mod status;
mod title;
mod windows;

use std::io;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    terminal::{Clear, ClearType, DisableLineWrap},
};
use irctun_app::WindowKind;

pub use self::prompt::{clear_prompt, flash_input};
use crate::{View, command::ResetScrollRegion, command::SetScrollRegion};

/// Width of the window list pane, separator excluded.
pub const WINDOW_LIST_WIDTH: u16 = 14;
/// Width of the nick list pane, separator excluded.
pub const NICK_LIST_WIDTH: u16 = 22;
/// Narrowest terminal that shows the window list.
pub const WINDOW_LIST_MIN_TERMINAL: u16 = 50;
/// Narrowest terminal that shows the nick list.
pub const NICK_LIST_MIN_TERMINAL: u16 = 60;
const MIN_CHAT_WIDTH: u16 = 5;

/// Column and row arithmetic for one frame. All coordinates are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) main_height: u16,
    pub(crate) list_width: u16,
    pub(crate) nick_width: u16,
    pub(crate) chat_col: u16,
    pub(crate) chat_width: u16,
}

impl Layout {
    pub(crate) fn of(view: &View) -> Self {
        let width = view.width;
        let list_width = if view.show_window_list && width >= WINDOW_LIST_MIN_TERMINAL {
            WINDOW_LIST_WIDTH
        } else {
            0
        };
        let nick_width = if view.show_nick_list
            && width >= NICK_LIST_MIN_TERMINAL
            && view.kind == WindowKind::Channel
        {
            NICK_LIST_WIDTH
        } else {
            0
        };

        let separators = u16::from(list_width > 0) + u16::from(nick_width > 0);
        let chat_width =
            width.saturating_sub(list_width + nick_width + separators).max(MIN_CHAT_WIDTH);
        let chat_col = if list_width > 0 { list_width + 1 } else { 0 };

        Self {
            width,
            height: view.height,
            main_height: view.height.saturating_sub(3).max(1),
            list_width,
            nick_width,
            chat_col,
            chat_width,
        }
    }

    /// Column of the separator left of the nick list.
    pub(crate) fn nick_separator(&self) -> u16 {
        self.chat_col + self.chat_width
    }

    pub(crate) fn status_row(&self) -> u16 {
        self.height.saturating_sub(2)
    }

    pub(crate) fn prompt_row(&self) -> u16 {
        self.height.saturating_sub(1)
    }
}

/// Render a complete frame.
///
/// The scroll region is reset for drawing and then confined to every row
/// above the prompt, so a newline typed on the prompt row cannot scroll the
/// frame. Autowrap stays disabled so over-long input cannot spill.
pub fn render(view: &View) -> io::Result<Vec<u8>> {
    let layout = Layout::of(view);
    let mut out = Vec::with_capacity(16 * 1024);

    queue!(out, ResetScrollRegion, DisableLineWrap, Hide)?;
    title::render(&mut out, view, &layout)?;

    let nicks = nicks::NickPane::new(view, &layout);
    for row in 0..layout.main_height {
        let y = row + 1;
        queue!(out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
        if layout.list_width > 0 {
            windows::render_row(&mut out, view, &layout, row)?;
        }
        chat::render_row(&mut out, view, &layout, row)?;
        if layout.nick_width > 0 {
            nicks.render_row(&mut out, &layout, row)?;
        }
    }

    status::render(&mut out, view, &layout)?;
    prompt::render(&mut out, view, layout.prompt_row())?;

    if view.height > 2 {
        queue!(out, SetScrollRegion { top: 1, bottom: view.height - 1 })?;
    }
    queue!(out, MoveTo(prompt::width(&view.nick), layout.prompt_row()), Show)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use irctun_app::SessionState;
    use irctun_proto::Geometry;

    use super::*;

    fn view(width: u16, height: u16, channel: bool) -> View {
        let mut state = SessionState::new("me");
        state.set_geometry(Geometry { width, height });
        if channel {
            state.ensure_window("#c");
            state.switch_to_name("#c");
        }
        View::capture(&state)
    }

    #[test]
    fn narrow_terminal_hides_both_panes() {
        let layout = Layout::of(&view(49, 24, true));
        assert_eq!((layout.list_width, layout.nick_width), (0, 0));
        assert_eq!((layout.chat_col, layout.chat_width), (0, 49));
    }

    #[test]
    fn medium_terminal_shows_window_list_only() {
        let layout = Layout::of(&view(59, 24, true));
        assert_eq!((layout.list_width, layout.nick_width), (14, 0));
        assert_eq!((layout.chat_col, layout.chat_width), (15, 44));
    }

    #[test]
    fn wide_channel_shows_both_panes() {
        let layout = Layout::of(&view(60, 24, true));
        assert_eq!((layout.list_width, layout.nick_width), (14, 22));
        assert_eq!(layout.chat_width, 22);
        assert_eq!(layout.nick_separator(), 37);
        assert_eq!((layout.main_height, layout.status_row(), layout.prompt_row()), (21, 22, 23));
    }

    #[test]
    fn nick_list_needs_a_channel() {
        let layout = Layout::of(&view(120, 24, false));
        assert_eq!(layout.nick_width, 0);
    }

    #[test]
    fn toggles_hide_panes() {
        let mut v = view(120, 24, true);
        v.show_window_list = false;
        v.show_nick_list = false;
        let layout = Layout::of(&v);
        assert_eq!((layout.list_width, layout.nick_width, layout.chat_width), (0, 0, 120));
    }
}
