//! Submitted-line history with recall.

use std::collections::VecDeque;

/// Most entries kept.
pub const MAX_HISTORY: usize = 100;

/// Deduplicated input history.
///
/// Re-submitting an existing entry moves it to the end. The recall cursor
/// rests one past the newest entry after every submission.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<String>,
    cursor: usize,
}

impl History {
    /// Record a submitted line.
    pub fn push(&mut self, line: &str) {
        if let Some(pos) = self.entries.iter().position(|e| e == line) {
            self.entries.remove(pos);
        }
        self.entries.push_back(line.to_string());
        while self.entries.len() > MAX_HISTORY {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len();
    }

    /// Move the cursor `back` entries towards the oldest (negative moves
    /// forward) and return the entry under it.
    ///
    /// The cursor is clamped to the stored range. Returns `None` when empty.
    pub fn recall(&mut self, back: isize) -> Option<String> {
        let last = self.entries.len().checked_sub(1)?;
        let target = self.cursor.saturating_add_signed(-back).min(last);
        self.cursor = target;
        self.entries.get(target).cloned()
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &VecDeque<String> {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been submitted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
