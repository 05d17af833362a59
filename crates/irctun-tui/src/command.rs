//! Terminal commands crossterm does not provide.

use std::fmt;

use crossterm::Command;

/// `DECSTBM`: restrict scrolling to rows `top..=bottom` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetScrollRegion {
    /// First row of the region.
    pub top: u16,
    /// Last row of the region.
    pub bottom: u16,
}

impl Command for SetScrollRegion {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[{};{}r", self.top, self.bottom)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::other("scroll regions require ANSI support"))
    }

    #[cfg(windows)]
    fn is_ansi_code_supported(&self) -> bool {
        true
    }
}

/// Reset the scroll region to the full screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetScrollRegion;

impl Command for ResetScrollRegion {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[r")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::other("scroll regions require ANSI support"))
    }

    #[cfg(windows)]
    fn is_ansi_code_supported(&self) -> bool {
        true
    }
}

/// `DSR 6`: ask the terminal to report the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestCursorPosition;

impl Command for RequestCursorPosition {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[6n")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> std::io::Result<()> {
        Err(std::io::Error::other("cursor reports require ANSI support"))
    }

    #[cfg(windows)]
    fn is_ansi_code_supported(&self) -> bool {
        true
    }
}
