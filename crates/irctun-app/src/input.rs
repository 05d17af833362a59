//! Input line pre-processing.
//!
//! Line-buffered clients deliver arrow keys as raw `ESC [ A`/`ESC [ B`
//! sequences inside the submitted line. [`ArrowKeys::parse`] pulls them out
//! so a line made only of arrows can drive history recall.

const ESC: u8 = 0x1b;

/// A submitted line with cursor-key sequences removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrowKeys {
    /// The line without any three-byte CSI sequences, trimmed.
    pub text: String,
    /// Number of up-arrow presses.
    pub ups: usize,
    /// Number of down-arrow presses.
    pub downs: usize,
}

impl ArrowKeys {
    /// Strip `ESC [ x` sequences, counting up and down arrows. Other
    /// three-byte sequences (left, right) are dropped.
    pub fn parse(line: &str) -> Self {
        let raw = line.as_bytes();
        let mut text = Vec::with_capacity(raw.len());
        let (mut ups, mut downs) = (0, 0);

        let mut i = 0;
        while i < raw.len() {
            if raw[i] == ESC && raw.get(i + 1) == Some(&b'[') {
                if let Some(&key) = raw.get(i + 2) {
                    match key {
                        b'A' => ups += 1,
                        b'B' => downs += 1,
                        _ => {},
                    }
                    i += 3;
                    continue;
                }
            }
            text.push(raw[i]);
            i += 1;
        }

        let text = String::from_utf8_lossy(&text).trim().to_string();
        Self { text, ups, downs }
    }

    /// Net steps back through history (positive is older).
    pub fn recall_steps(&self) -> isize {
        self.ups as isize - self.downs as isize
    }

    /// Whether the line is nothing but arrow keys.
    pub fn is_navigation(&self) -> bool {
        self.text.is_empty() && (self.ups > 0 || self.downs > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_arrows() {
        let keys = ArrowKeys::parse("\x1b[A\x1b[A\x1b[B");
        assert_eq!(keys, ArrowKeys { text: String::new(), ups: 2, downs: 1 });
        assert!(keys.is_navigation());
        assert_eq!(keys.recall_steps(), 1);
    }

    #[test]
    fn other_cursor_keys_are_dropped() {
        let keys = ArrowKeys::parse("hel\x1b[Dlo\x1b[C");
        assert_eq!(keys.text, "hello");
        assert!(!keys.is_navigation());
    }

    #[test]
    fn plain_text_is_untouched() {
        let keys = ArrowKeys::parse("  /join #rust ");
        assert_eq!(keys.text, "/join #rust");
        assert_eq!((keys.ups, keys.downs), (0, 0));
    }

    #[test]
    fn trailing_partial_escape_is_kept() {
        let keys = ArrowKeys::parse("x\x1b[");
        assert_eq!(keys.text, "x\x1b[");
    }
}
