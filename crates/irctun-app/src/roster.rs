//! Channel membership.
//!
//! A [`Roster`] maps case-folded bare nicknames to their display form, which
//! keeps any rank prefix characters (`~&@%+`) the server reported. Every
//! identity comparison goes through [`fold_case`].

use std::collections::HashMap;

/// Rank prefix characters, highest tier first.
pub const RANK_PREFIXES: &[char] = &['~', '&', '@', '%', '+'];

/// Case-fold a nickname or channel name for identity comparison.
pub fn fold_case(name: &str) -> String {
    name.to_lowercase()
}

/// Split a display entry into its rank prefix and bare nickname.
pub fn split_prefix(display: &str) -> (&str, &str) {
    let bare = display.trim_start_matches(RANK_PREFIXES);
    display.split_at(display.len() - bare.len())
}

/// Channel privilege tier, ordered highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// `~`
    Owner,
    /// `&`
    Admin,
    /// `@`
    Op,
    /// `%`
    HalfOp,
    /// `+`
    Voice,
    /// No prefix.
    None,
}

impl Rank {
    /// Highest tier among the display entry's prefix characters.
    pub fn of(display: &str) -> Self {
        let (prefix, _) = split_prefix(display);
        prefix.chars().map(Self::from_prefix).min().unwrap_or(Self::None)
    }

    fn from_prefix(c: char) -> Self {
        match c {
            '~' => Self::Owner,
            '&' => Self::Admin,
            '@' => Self::Op,
            '%' => Self::HalfOp,
            '+' => Self::Voice,
            _ => Self::None,
        }
    }
}

/// Members of one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: HashMap<String, String>,
}

impl Roster {
    /// Add or replace an entry as reported by a names reply.
    pub fn insert(&mut self, display: &str) {
        let (_, bare) = split_prefix(display);
        if bare.is_empty() {
            return;
        }
        self.members.insert(fold_case(bare), display.to_string());
    }

    /// Remove a member, returning its display form.
    pub fn remove(&mut self, nick: &str) -> Option<String> {
        self.members.remove(&fold_case(nick))
    }

    /// Whether `nick` is a member.
    pub fn contains(&self, nick: &str) -> bool {
        self.members.contains_key(&fold_case(nick))
    }

    /// Display form of `nick`, if present.
    pub fn display(&self, nick: &str) -> Option<&str> {
        self.members.get(&fold_case(nick)).map(String::as_str)
    }

    /// Move `old` to `new`, carrying its rank prefix across.
    ///
    /// Returns `false` if `old` was not a member.
    pub fn rename(&mut self, old: &str, new: &str) -> bool {
        let Some(display) = self.remove(old) else {
            return false;
        };
        let (prefix, _) = split_prefix(&display);
        self.members.insert(fold_case(new), format!("{prefix}{new}"));
        true
    }

    /// Forget every member.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Display entries ordered by rank, then case-insensitive bare name.
    pub fn sorted(&self) -> Vec<&str> {
        let mut entries: Vec<(Rank, &String, &str)> = self
            .members
            .iter()
            .map(|(key, display)| (Rank::of(display), key, display.as_str()))
            .collect();
        entries.sort_unstable();
        entries.into_iter().map(|(_, _, display)| display).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_from_prefix() {
        assert_eq!(Rank::of("~alice"), Rank::Owner);
        assert_eq!(Rank::of("&bob"), Rank::Admin);
        assert_eq!(Rank::of("@carol"), Rank::Op);
        assert_eq!(Rank::of("%dave"), Rank::HalfOp);
        assert_eq!(Rank::of("+erin"), Rank::Voice);
        assert_eq!(Rank::of("frank"), Rank::None);
        assert_eq!(Rank::of("+@multi"), Rank::Op);
    }

    #[test]
    fn names_are_keyed_by_bare_folded_nick() {
        let mut roster = Roster::default();
        roster.insert("@Alice");

        assert!(roster.contains("alice"));
        assert!(roster.contains("ALICE"));
        assert_eq!(roster.display("alice"), Some("@Alice"));
    }

    #[test]
    fn rename_keeps_prefix() {
        let mut roster = Roster::default();
        roster.insert("+Bob");

        assert!(roster.rename("bob", "Robert"));
        assert!(!roster.contains("bob"));
        assert_eq!(roster.display("robert"), Some("+Robert"));
        assert!(!roster.rename("nobody", "x"));
    }

    #[test]
    fn sorted_by_rank_then_name() {
        let mut roster = Roster::default();
        for name in ["zed", "+amy", "@Carl", "bob", "~root", "@alf", "%hal", "&adm"] {
            roster.insert(name);
        }

        assert_eq!(roster.sorted(), vec![
            "~root", "&adm", "@alf", "@Carl", "%hal", "+amy", "bob", "zed"
        ]);
    }

    #[test]
    fn bare_prefix_is_ignored() {
        let mut roster = Roster::default();
        roster.insert("@");
        assert!(roster.is_empty());
    }
}
