//! Prompt row.

use std::io;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};

use crate::{View, ansi::clip};

/// Nicknames longer than this are cut on the prompt.
pub(crate) const PROMPT_NICK_MAX: usize = 15;
const SEPARATOR: &str = " » ";

/// Columns the prompt occupies before the cursor.
pub(super) fn width(nick: &str) -> u16 {
    let chars = clip(nick, PROMPT_NICK_MAX).chars().count() + SEPARATOR.chars().count();
    u16::try_from(chars).unwrap_or(u16::MAX)
}

pub(super) fn render(out: &mut Vec<u8>, view: &View, row: u16) -> io::Result<()> {
    let nick = clip(&view.nick, PROMPT_NICK_MAX).to_string();
    queue!(
        out,
        MoveTo(0, row),
        Clear(ClearType::CurrentLine),
        Print(nick.green().bold()),
        Print(SEPARATOR)
    )
}

/// Blank the prompt row, erasing the client's local echo of a submitted line.
pub fn clear_prompt(height: u16) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    queue!(out, MoveTo(0, height.saturating_sub(1)), Clear(ClearType::CurrentLine))?;
    Ok(out)
}

/// Show a recalled history entry on the prompt row.
pub fn flash_input(view: &View, text: &str) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    render(&mut out, view, view.height.saturating_sub(1))?;
    queue!(out, Print(text.yellow()))?;
    Ok(out)
}
