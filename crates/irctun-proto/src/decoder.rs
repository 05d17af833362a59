//! Client byte-stream decoding.
//!
//! [`TelnetDecoder`] turns arbitrary reads from a telnet or raw TCP client into
//! a sequence of [`Decoded`] items: window-size changes and trimmed input
//! lines. It owns the pending-byte buffer, so telnet units and cursor-position
//! reports split across reads are reassembled transparently.
//!
//! ```text
//! read ──► IacFilter ──► pending buffer ──► extract_reports ──► line split
//!              │                                  │
//!              └──────── Geometry ◄───────────────┘
//! ```

use bytes::BytesMut;
use tracing::warn;

use crate::{cpr, telnet::IacFilter};

/// Longest input line kept; longer lines are discarded whole.
pub const MAX_LINE: usize = 8 * 1024;

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Columns.
    pub width: u16,
    /// Rows.
    pub height: u16,
}

impl Geometry {
    /// Geometry if it clears the noise floor (`width > 10`, `height > 5`).
    pub fn plausible(width: u16, height: u16) -> Option<Self> {
        (width > 10 && height > 5).then_some(Self { width, height })
    }
}

/// One unit of decoded client input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The client reported a new terminal size.
    Resize(Geometry),
    /// A complete, whitespace-trimmed input line.
    Line(String),
}

/// Stateful client stream decoder.
#[derive(Debug, Default)]
pub struct TelnetDecoder {
    iac: IacFilter,
    pending: BytesMut,
    resizes: Vec<Geometry>,
    // Set while discarding the remainder of an over-long line.
    overflowed: bool,
}

impl TelnetDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk read from the client.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.iac.filter(chunk, &mut self.pending, &mut self.resizes);
        cpr::extract_reports(&mut self.pending, &mut self.resizes);
    }

    /// Next decoded item, if one is complete.
    ///
    /// Geometry changes are yielded before lines.
    pub fn next_item(&mut self) -> Option<Decoded> {
        if !self.resizes.is_empty() {
            return Some(Decoded::Resize(self.resizes.remove(0)));
        }

        loop {
            let Some(newline) = memchr::memchr(b'\n', &self.pending) else {
                if self.pending.len() > MAX_LINE {
                    warn!(len = self.pending.len(), "discarding over-long client line");
                    self.pending.clear();
                    self.overflowed = true;
                }
                return None;
            };

            let raw = self.pending.split_to(newline + 1);
            if std::mem::take(&mut self.overflowed) {
                continue;
            }

            let raw = &raw[..newline];
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            return Some(Decoded::Line(String::from_utf8_lossy(raw).trim().to_string()));
        }
    }

    /// Bytes buffered but not yet part of a complete line.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
