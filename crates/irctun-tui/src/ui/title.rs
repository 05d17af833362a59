//! Title bar: active window, mode, topic.

use std::io;

use crossterm::{cursor::MoveTo, queue, style::Print, style::Stylize};

use super::Layout;
use crate::{View, ansi::fit};

pub(super) fn render(out: &mut Vec<u8>, view: &View, layout: &Layout) -> io::Result<()> {
    let mut text = format!(" {}", view.name);
    if !view.mode.is_empty() {
        text = format!("{text} [{}]", view.mode);
    }
    if !view.topic.is_empty() {
        text = format!("{text} │ {}", view.topic);
    }

    let bar = fit(&text, usize::from(layout.width));
    queue!(out, MoveTo(0, 0), Print(bar.white().on_dark_blue().bold()))
}
