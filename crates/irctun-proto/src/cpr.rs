//! ANSI cursor-position reports.
//!
//! Clients without NAWS still answer `ESC[6n` with `ESC[<row>;<col>R`. After
//! the cursor has been parked at the far corner, that reply is the terminal
//! size. Replies may arrive anywhere in the stream, including between typed
//! characters, so the whole pending buffer is scanned.

use bytes::BytesMut;

use crate::Geometry;

const ESC: u8 = 0x1b;

/// Remove every complete cursor-position report from `buf`.
///
/// Matched bytes are always excised. Reports that do not carry exactly two
/// numbers, or that fall below the noise floor, produce no geometry. An
/// incomplete report at the end of the buffer is left for the next read.
pub fn extract_reports(buf: &mut BytesMut, resizes: &mut Vec<Geometry>) {
    let mut i = 0;
    while let Some(offset) = memchr::memchr(ESC, &buf[i..]) {
        let start = i + offset;
        let Some(end) = report_end(&buf[start..]) else {
            i = start + 1;
            continue;
        };

        let body = &buf[start + 2..start + end];
        resizes.extend(parse_report(body));

        let len = buf.len();
        buf.copy_within(start + end + 1.., start);
        buf.truncate(len - (end + 1));
        i = start;
    }
}

/// Offset of the terminating `R` if `bytes` starts with `ESC [ [0-9;]* R`.
fn report_end(bytes: &[u8]) -> Option<usize> {
    if bytes.get(1) != Some(&b'[') {
        return None;
    }
    let digits = bytes[2..].iter().take_while(|b| b.is_ascii_digit() || **b == b';').count();
    let end = 2 + digits;
    (bytes.get(end) == Some(&b'R')).then_some(end)
}

fn parse_report(body: &[u8]) -> Option<Geometry> {
    let mut parts = body.split(|b| *b == b';');
    let row = decimal(parts.next()?)?;
    let col = decimal(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Geometry::plausible(col, row)
}

fn decimal(digits: &[u8]) -> Option<u16> {
    if digits.is_empty() {
        return Some(0);
    }
    std::str::from_utf8(digits).ok()?.parse().ok()
}
