//! TSIP frame synchronization.
//!
//! On the wire a TSIP packet is delimited as
//! `DLE, <code>, [<subcode>], <payload>, DLE, ETX` where any literal `DLE`
//! byte inside the packet is doubled. `DLE` is both the start delimiter and
//! the escape byte; `ETX` only terminates a frame when preceded by an
//! unescaped `DLE`.
//!
//! [Framer] removes the framing and escaping, turning a raw serial byte
//! stream into complete unescaped packets. [encode_frame] is its exact
//! inverse.

use tracing::{debug, warn};

/// Frame start delimiter and escape byte.
pub const DLE: u8 = 0x10;
/// Frame end byte. Only significant directly after an unescaped [DLE].
pub const ETX: u8 = 0x03;

/// Maximum unescaped packet length (code, optional subcode, and payload).
///
/// The receive side of the link is exposed to line noise, so the packet
/// buffer is bounded; bytes past the bound are dropped.
pub const MAX_PACKET_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Hunting for a start delimiter; all other bytes are noise.
    Idle,
    /// Start delimiter seen, waiting for the packet code.
    FrameStarted,
    /// Accumulating packet bytes.
    InPayload,
    /// `DLE` seen inside the packet; the next byte disambiguates
    /// escaped-data from end-of-frame.
    PayloadEscape,
}

/// Collects a raw serial byte stream into unescaped TSIP packets.
///
/// The framer never fails: mis-framed sequences are discarded and the
/// machine returns to the hunt state for the next frame, which is how the
/// protocol recovers from noise on the line.
pub struct Framer {
    state: State,
    buf: Vec<u8>,
}

impl Default for Framer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framer {
    #[must_use]
    pub fn new() -> Self {
        Framer {
            state: State::Idle,
            buf: Vec::with_capacity(MAX_PACKET_LEN),
        }
    }

    /// Discard any partial frame and return to the hunt state.
    pub fn reset(&mut self) {
        self.state = State::Idle;
        self.buf.clear();
    }

    /// Feed one byte from the stream.
    ///
    /// Returns the complete unescaped packet (code, optional subcode, and
    /// payload) when this byte closes a frame, otherwise `None`.
    pub fn push(&mut self, byte: u8) -> Option<Vec<u8>> {
        match self.state {
            State::Idle => {
                // skip inter-frame noise
                if byte == DLE {
                    self.state = State::FrameStarted;
                }
                None
            }
            State::FrameStarted => {
                if byte == DLE || byte == ETX {
                    debug!(byte, "mis-framed start sequence, discarding");
                    self.state = State::Idle;
                } else {
                    self.buf.clear();
                    self.buf.push(byte);
                    self.state = State::InPayload;
                }
                None
            }
            State::InPayload => {
                if byte == DLE {
                    self.state = State::PayloadEscape;
                } else {
                    self.append(byte);
                }
                None
            }
            State::PayloadEscape => match byte {
                // doubled DLE collapses to one literal data byte
                DLE => {
                    self.append(DLE);
                    self.state = State::InPayload;
                    None
                }
                ETX => {
                    self.state = State::Idle;
                    Some(std::mem::take(&mut self.buf))
                }
                _ => {
                    debug!(byte, "mis-framed end sequence, discarding frame");
                    self.state = State::Idle;
                    None
                }
            },
        }
    }

    fn append(&mut self, byte: u8) {
        if self.buf.len() < MAX_PACKET_LEN {
            self.buf.push(byte);
        } else {
            warn!(len = self.buf.len(), "packet buffer full, dropping byte");
        }
    }
}

/// Build the framed wire bytes for one packet.
///
/// Every literal [DLE] in `payload` is doubled. The code and subcode bytes
/// are written as-is; no defined TSIP code or subcode collides with the
/// frame markers. [ETX] never needs escaping since it only terminates a
/// frame when preceded by an unescaped [DLE].
#[must_use]
pub fn encode_frame(code: u8, subcode: Option<u8>, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 6);
    out.push(DLE);
    out.push(code);
    if let Some(subcode) = subcode {
        out.push(subcode);
    }
    for &b in payload {
        out.push(b);
        if b == DLE {
            out.push(b);
        }
    }
    out.push(DLE);
    out.push(ETX);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(framer: &mut Framer, dat: &[u8]) -> Vec<Vec<u8>> {
        dat.iter().filter_map(|&b| framer.push(b)).collect()
    }

    #[test]
    fn frame_round_trips() {
        let payload = [0x01, 0x02, 0xfe];
        let frame = encode_frame(0x8f, Some(0xab), &payload);

        let mut framer = Framer::new();
        let packets = feed(&mut framer, &frame);
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0], [0x8f, 0xab, 0x01, 0x02, 0xfe]);
    }

    #[test]
    fn doubled_dle_collapses_to_one() {
        let payload = [0x10, 0x00, 0x10, 0x10, 0x42];
        let frame = encode_frame(0x55, None, &payload);
        // one extra byte on the wire per literal DLE
        assert_eq!(frame.len(), 2 + payload.len() + 3 + 2);

        let mut framer = Framer::new();
        let packets = feed(&mut framer, &frame);
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0][0], 0x55);
        assert_eq!(&packets[0][1..], payload);
    }

    #[test]
    fn noise_before_frame_is_skipped() {
        let mut dat = vec![0x00, 0x42, 0x99, 0xfe];
        dat.extend(encode_frame(0x45, None, &[1, 2, 3]));

        let mut framer = Framer::new();
        let packets = feed(&mut framer, &dat);
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0], [0x45, 1, 2, 3]);
    }

    #[test]
    fn stray_dle_dle_returns_to_idle() {
        let mut framer = Framer::new();
        assert!(feed(&mut framer, &[DLE, DLE]).is_empty());
        assert!(feed(&mut framer, &[DLE, ETX]).is_empty());

        // next well-formed frame decodes with no lingering buffer
        let packets = feed(&mut framer, &encode_frame(0x45, None, &[9]));
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0], [0x45, 9]);
    }

    #[test]
    fn garbage_after_payload_escape_discards_frame() {
        let mut framer = Framer::new();
        // open a frame then break the end sequence
        assert!(feed(&mut framer, &[DLE, 0x41, 0x01, DLE, 0x41]).is_empty());

        let packets = feed(&mut framer, &encode_frame(0x42, None, &[7, 8]));
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0], [0x42, 7, 8]);
    }

    #[test]
    fn oversized_payload_is_truncated_not_grown() {
        let payload = vec![0x20u8; MAX_PACKET_LEN + 64];
        let frame = encode_frame(0x99, None, &payload);

        let mut framer = Framer::new();
        let packets = feed(&mut framer, &frame);
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0].len(), MAX_PACKET_LEN);
        assert_eq!(packets[0][0], 0x99);
    }

    #[test]
    fn back_to_back_frames_all_decode() {
        let mut dat = Vec::new();
        for code in [0x41u8, 0x42, 0x43] {
            dat.extend(encode_frame(code, None, &[code ^ 0xff]));
        }

        let mut framer = Framer::new();
        let packets = feed(&mut framer, &dat);
        assert_eq!(packets.len(), 3);
        for (i, code) in [0x41u8, 0x42, 0x43].iter().enumerate() {
            assert_eq!(packets[i], [*code, code ^ 0xff]);
        }
    }

    #[test]
    fn reset_drops_partial_frame() {
        let mut framer = Framer::new();
        assert!(feed(&mut framer, &[DLE, 0x41, 0x01, 0x02]).is_empty());
        framer.reset();

        let packets = feed(&mut framer, &encode_frame(0x45, None, &[]));
        assert_eq!(packets.len(), 1);
        assert_eq!(packets[0], [0x45]);
    }
}
