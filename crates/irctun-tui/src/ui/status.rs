//! Status bar: active window, mode, geometry.

use std::io;

use crossterm::{cursor::MoveTo, queue, style::Print, style::Stylize};

use super::Layout;
use crate::{View, ansi::fit};

pub(super) fn render(out: &mut Vec<u8>, view: &View, layout: &Layout) -> io::Result<()> {
    let text = format!(" {} │ {} │ {}x{} ", view.name, view.mode, view.width, view.height);
    let bar = fit(&text, usize::from(layout.width));
    queue!(out, MoveTo(0, layout.status_row()), Print(bar.black().on_dark_green().bold()))
}
