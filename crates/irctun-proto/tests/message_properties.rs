//! Property-based tests for IRC line parsing.
//!
//! The parser is total: any input yields a message, and well-formed lines
//! reconstruct their components exactly.

use irctun_proto::{IrcEvent, Message};
use proptest::prelude::*;

fn token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9#&!@.*=+-]{1,12}".prop_filter("no leading colon", |t| !t.starts_with(':'))
}

proptest! {
    #[test]
    fn prop_parse_never_panics(line in ".{0,200}") {
        let msg = Message::parse(&line);
        let _ = IrcEvent::from_message(&msg);
        let _ = msg.sender_nick();
        let _ = msg.trailing();
    }

    #[test]
    fn prop_well_formed_lines_round_trip(
        prefix in proptest::option::of(token()),
        command in "[A-Za-z]{1,10}",
        middle in prop::collection::vec(token(), 0..4),
        trailing in proptest::option::of("[ -~]{0,40}"),
    ) {
        let mut line = String::new();
        if let Some(prefix) = &prefix {
            line.push(':');
            line.push_str(prefix);
            line.push(' ');
        }
        line.push_str(&command);
        for param in &middle {
            line.push(' ');
            line.push_str(param);
        }
        if let Some(trailing) = &trailing {
            line.push_str(" :");
            line.push_str(trailing);
        }

        let msg = Message::parse(&line);

        prop_assert_eq!(&msg.prefix, &prefix.unwrap_or_default());
        prop_assert_eq!(&msg.command, &command.to_ascii_uppercase());

        let mut expected = middle.clone();
        expected.extend(trailing);
        prop_assert_eq!(&msg.params, &expected);
    }

    #[test]
    fn prop_command_is_uppercase(line in "[a-z]{1,8}( [a-z]{1,8}){0,3}") {
        let msg = Message::parse(&line);
        prop_assert_eq!(msg.command.clone(), msg.command.to_ascii_uppercase());
    }
}
