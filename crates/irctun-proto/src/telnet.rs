//! Telnet IAC filtering.
//!
//! Strips negotiation units from the client byte stream. Only the window-size
//! subnegotiation (NAWS) is interpreted; every other unit is discarded without
//! a reply. Units split across reads are carried in the parser state.

use bytes::BytesMut;

use crate::Geometry;

/// Interpret As Command.
pub const IAC: u8 = 255;
/// Negotiation: refuse to perform an option.
pub const DONT: u8 = 254;
/// Negotiation: request that the peer perform an option.
pub const DO: u8 = 253;
/// Negotiation: refuse to perform an option ourselves.
pub const WONT: u8 = 252;
/// Negotiation: offer to perform an option.
pub const WILL: u8 = 251;
/// Subnegotiation begin.
pub const SB: u8 = 250;
/// Subnegotiation end.
pub const SE: u8 = 240;
/// Negotiate About Window Size option code.
pub const NAWS: u8 = 31;

/// `IAC DO NAWS`, sent once when a client connects.
pub const DO_NAWS: [u8; 3] = [IAC, DO, NAWS];

// Longest subnegotiation payload retained; anything beyond is dropped.
const MAX_SUBNEG: usize = 64;

#[derive(Debug, Default)]
enum State {
    #[default]
    Data,
    Iac,
    Negotiate,
    Subneg {
        opt: Option<u8>,
        iac_seen: bool,
        payload: Vec<u8>,
    },
}

/// Incremental IAC stripper.
#[derive(Debug, Default)]
pub struct IacFilter {
    state: State,
}

impl IacFilter {
    /// Create a filter in the data state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `chunk`, appending plain data to `out`.
    ///
    /// Window-size reports above the noise floor are pushed to `resizes` in
    /// arrival order.
    pub fn filter(&mut self, chunk: &[u8], out: &mut BytesMut, resizes: &mut Vec<Geometry>) {
        for &b in chunk {
            match &mut self.state {
                State::Data => {
                    if b == IAC {
                        self.state = State::Iac;
                    } else {
                        out.extend_from_slice(&[b]);
                    }
                },
                State::Iac => {
                    self.state = match b {
                        IAC => {
                            out.extend_from_slice(&[IAC]);
                            State::Data
                        },
                        DO | DONT | WILL | WONT => State::Negotiate,
                        SB => State::Subneg { opt: None, iac_seen: false, payload: Vec::new() },
                        // NOP, GA, AYT and friends are two bytes long.
                        _ => State::Data,
                    };
                },
                State::Negotiate => {
                    self.state = State::Data;
                },
                State::Subneg { opt, iac_seen, payload } => {
                    if opt.is_none() {
                        *opt = Some(b);
                        continue;
                    }

                    if *iac_seen {
                        *iac_seen = false;
                        match b {
                            SE => {
                                if *opt == Some(NAWS) {
                                    resizes.extend(naws_geometry(payload));
                                }
                                self.state = State::Data;
                            },
                            IAC if payload.len() < MAX_SUBNEG => payload.push(IAC),
                            _ => {},
                        }
                        continue;
                    }

                    if b == IAC {
                        *iac_seen = true;
                    } else if payload.len() < MAX_SUBNEG {
                        payload.push(b);
                    }
                },
            }
        }
    }
}

/// Decode a NAWS payload: width then height, both big-endian `u16`.
fn naws_geometry(payload: &[u8]) -> Option<Geometry> {
    match payload {
        [w_hi, w_lo, h_hi, h_lo, ..] => {
            let width = u16::from_be_bytes([*w_hi, *w_lo]);
            let height = u16::from_be_bytes([*h_hi, *h_lo]);
            Geometry::plausible(width, height)
        },
        _ => None,
    }
}
