//! Escape-aware text measurement.
//!
//! Stored transcript lines carry SGR styling inline. Width budgets apply to
//! printable glyphs only, so every operation here first splits a string into
//! [`Unit`]s and then works on that classification.

const ESC: char = '\x1b';

/// One classified piece of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit<'a> {
    /// An escape sequence: `ESC` through the first ASCII letter, or to the end
    /// of the string if unterminated. Zero width.
    Control(&'a str),
    /// A printable character occupying one cell.
    Visible(char),
}

/// Iterator over the [`Unit`]s of a string.
#[derive(Debug, Clone)]
pub struct Units<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.rest.char_indices();
        let (_, first) = chars.next()?;

        if first != ESC {
            self.rest = &self.rest[first.len_utf8()..];
            return Some(Unit::Visible(first));
        }

        let end = chars
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map_or(self.rest.len(), |(i, c)| i + c.len_utf8());
        let (control, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Unit::Control(control))
    }
}

/// Classify `s` into control and visible units.
pub fn units(s: &str) -> Units<'_> {
    Units { rest: s }
}

/// Number of visible cells in `s`.
pub fn visible_width(s: &str) -> usize {
    units(s).filter(|u| matches!(u, Unit::Visible(_))).count()
}

/// Keep at most `max` visible characters of `s`.
///
/// Escape sequences are kept wherever they appear, including after the cut,
/// so trailing style resets survive truncation.
pub fn truncate_visible(s: &str, max: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut budget = max;
    for unit in units(s) {
        match unit {
            Unit::Control(seq) => out.push_str(seq),
            Unit::Visible(c) if budget > 0 => {
                out.push(c);
                budget -= 1;
            },
            Unit::Visible(_) => {},
        }
    }
    out
}

/// Visible characters of `s` with every escape sequence removed.
pub fn strip(s: &str) -> String {
    units(s)
        .filter_map(|u| match u {
            Unit::Visible(c) => Some(c),
            Unit::Control(_) => None,
        })
        .collect()
}

/// First `max` characters of a plain string.
pub(crate) fn clip(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(i, _)| &s[..i])
}

/// `s` clipped or right-padded with spaces to exactly `width` characters.
pub(crate) fn fit(s: &str, width: usize) -> String {
    let clipped = clip(s, width);
    format!("{clipped:<width$}")
}
