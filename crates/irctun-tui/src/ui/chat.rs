//! Transcript pane.

use std::io;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Print, SetAttribute},
};

use super::Layout;
use crate::{View, ansi::truncate_visible};

/// Draw transcript line `row`, clipped to the pane by visible width.
pub(super) fn render_row(
    out: &mut Vec<u8>,
    view: &View,
    layout: &Layout,
    row: u16,
) -> io::Result<()> {
    queue!(out, MoveTo(layout.chat_col, row + 1))?;
    if let Some(line) = view.lines.get(usize::from(row)) {
        let clipped = truncate_visible(line, usize::from(layout.chat_width));
        queue!(out, Print(clipped), SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}
