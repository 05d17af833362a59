//! Property tests for escape-aware truncation.

use irctun_tui::ansi::{Unit, strip, truncate_visible, units, visible_width};
use proptest::prelude::*;

/// Text interleaved with SGR sequences.
fn styled_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 <>#@→]{0,8}",
            (0u8..110).prop_map(|n| format!("\x1b[{n}m")),
            Just("\x1b[38;5;208m".to_string()),
        ],
        0..12,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn truncation_respects_budget(s in styled_text(), max in 0usize..40) {
        let cut = truncate_visible(&s, max);
        prop_assert_eq!(visible_width(&cut), visible_width(&s).min(max));
    }

    #[test]
    fn truncation_keeps_a_visible_prefix(s in styled_text(), max in 0usize..40) {
        let expected: String = strip(&s).chars().take(max).collect();
        prop_assert_eq!(strip(&truncate_visible(&s, max)), expected);
    }

    #[test]
    fn truncation_keeps_every_escape(s in styled_text(), max in 0usize..40) {
        let controls = |t: &str| -> Vec<String> {
            units(t)
                .filter_map(|u| match u {
                    Unit::Control(c) => Some(c.to_string()),
                    Unit::Visible(_) => None,
                })
                .collect()
        };
        prop_assert_eq!(controls(&truncate_visible(&s, max)), controls(&s));
    }
}
