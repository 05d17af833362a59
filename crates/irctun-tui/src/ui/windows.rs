//! Window list pane.

use std::io;

use crossterm::{cursor::MoveTo, queue, style::Print, style::Stylize};

use super::Layout;
use crate::{View, ansi::clip};

pub(super) fn render_row(
    out: &mut Vec<u8>,
    view: &View,
    layout: &Layout,
    row: u16,
) -> io::Result<()> {
    let index = usize::from(row);
    if let Some(entry) = view.entries.get(index) {
        let tag = format!("{index} {}", entry.label);
        let tag = format!(" {}", clip(&tag, usize::from(layout.list_width) - 1));
        let styled = if index == view.active {
            tag.white().bold()
        } else if entry.highlight {
            tag.yellow().bold()
        } else if entry.unread {
            tag.cyan()
        } else {
            tag.dark_grey()
        };
        queue!(out, Print(styled))?;
    }
    queue!(out, MoveTo(layout.list_width, row + 1), Print("│".dark_grey()))
}
