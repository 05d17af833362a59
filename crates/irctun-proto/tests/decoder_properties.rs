//! Property-based tests for the client stream decoder.
//!
//! The decoder must produce the same items no matter how the byte stream is
//! split across reads.

use irctun_proto::{
    Decoded, Geometry, TelnetDecoder,
    telnet::{IAC, NAWS, SB, SE, WILL},
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Newline,
    Naws(u16, u16),
    Cpr(u16, u16),
    Negotiation(u8),
}

fn piece_strategy() -> impl Strategy<Value = Piece> {
    prop_oneof![
        4 => "[a-z /#]{1,10}".prop_map(Piece::Text),
        2 => Just(Piece::Newline),
        1 => (11u16..400, 6u16..200).prop_map(|(w, h)| Piece::Naws(w, h)),
        1 => (11u16..400, 6u16..200).prop_map(|(w, h)| Piece::Cpr(w, h)),
        1 => any::<u8>().prop_map(Piece::Negotiation),
    ]
}

fn encode(pieces: &[Piece]) -> Vec<u8> {
    let mut out = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Text(text) => out.extend_from_slice(text.as_bytes()),
            Piece::Newline => out.extend_from_slice(b"\r\n"),
            Piece::Naws(w, h) => {
                out.extend_from_slice(&[IAC, SB, NAWS]);
                for byte in w.to_be_bytes().into_iter().chain(h.to_be_bytes()) {
                    out.push(byte);
                    if byte == IAC {
                        out.push(IAC);
                    }
                }
                out.extend_from_slice(&[IAC, SE]);
            },
            Piece::Cpr(w, h) => out.extend_from_slice(format!("\x1b[{h};{w}R").as_bytes()),
            Piece::Negotiation(opt) => out.extend_from_slice(&[IAC, WILL, *opt]),
        }
    }
    out
}

fn decode_in_chunks(bytes: &[u8], chunk: usize) -> (Vec<Geometry>, Vec<String>) {
    let mut decoder = TelnetDecoder::new();
    let mut resizes = Vec::new();
    let mut lines = Vec::new();

    for part in bytes.chunks(chunk) {
        decoder.feed(part);
        while let Some(item) = decoder.next_item() {
            match item {
                Decoded::Resize(g) => resizes.push(g),
                Decoded::Line(l) => lines.push(l),
            }
        }
    }
    (resizes, lines)
}

proptest! {
    #[test]
    fn prop_chunking_does_not_change_output(
        pieces in prop::collection::vec(piece_strategy(), 0..30),
        chunk in 1usize..16,
    ) {
        let bytes = encode(&pieces);
        let whole = decode_in_chunks(&bytes, bytes.len().max(1));
        let split = decode_in_chunks(&bytes, chunk);
        prop_assert_eq!(whole, split);
    }

    #[test]
    fn prop_lines_never_contain_control_framing(
        pieces in prop::collection::vec(piece_strategy(), 0..30),
    ) {
        let bytes = encode(&pieces);
        let (resizes, lines) = decode_in_chunks(&bytes, 7);

        let expected_resizes = pieces
            .iter()
            .filter(|p| matches!(p, Piece::Naws(..) | Piece::Cpr(..)))
            .count();
        prop_assert_eq!(resizes.len(), expected_resizes);

        for line in lines {
            prop_assert!(!line.contains('\n'));
            prop_assert!(!line.contains('\x1b'));
            prop_assert_eq!(line.trim(), line.as_str());
        }
    }
}
