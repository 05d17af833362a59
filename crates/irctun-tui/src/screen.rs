//! Whole-screen sequences outside the regular frame.

use std::io;

use crossterm::{
    cursor::{MoveTo, RestorePosition, SavePosition},
    queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};

use crate::command::{RequestCursorPosition, ResetScrollRegion};

/// Park the cursor at the far corner and ask where it landed.
///
/// The terminal clamps the move, so the reported position is its size.
/// The cursor is restored afterwards.
pub fn size_query() -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    queue!(out, SavePosition, MoveTo(998, 998), RequestCursorPosition, RestorePosition)?;
    Ok(out)
}

/// Reset the scroll region and wipe the screen.
pub fn clear_screen() -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    queue!(out, ResetScrollRegion, Clear(ClearType::All), MoveTo(0, 0))?;
    Ok(out)
}

/// Greeting shown while waiting for a client that has not reported its size.
pub fn splash() -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print("  IRC Tunnel".cyan().bold()),
        Print("\r\n"),
        Print("  ─────────────────────────────".dark_grey()),
        Print("\r\n\r\n"),
        Print("  Press ".dark_grey()),
        Print("Enter".white().bold()),
        Print(" to begin...".dark_grey()),
        Print("\r\n")
    )?;
    Ok(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn size_query_requests_cursor_report() {
        let bytes = size_query().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let park = text.find("\x1b[999;999H").unwrap();
        let ask = text.find("\x1b[6n").unwrap();
        assert!(park < ask);
    }

    #[test]
    fn clear_screen_resets_region_first() {
        let text = String::from_utf8(clear_screen().unwrap()).unwrap();
        assert!(text.starts_with("\x1b[r"));
        assert!(text.contains("\x1b[2J"));
    }

    #[test]
    fn splash_mentions_enter() {
        let text = crate::ansi::strip(&String::from_utf8(splash().unwrap()).unwrap());
        assert!(text.contains("IRC Tunnel"));
        assert!(text.contains("Press Enter to begin..."));
    }
}
