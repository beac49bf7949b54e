use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};

/// Frame header: start marker (1) + message id (1) + length (1) = 3 bytes.
pub const HEADER_SIZE: usize = 3;

/// Start marker byte: 0x55 (alternating bit pattern).
pub const START_BYTE: u8 = 0x55;

/// Maximum payload size, bounded by the one-byte length field.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// A complete protocol frame: header, payload, and checksum trailer.
///
/// The wire-level length field is derived from `payload.len()`, so a frame
/// can never disagree with its own payload about length. The checksum is
/// stored as received (or as computed at construction); whether it matches
/// the contents is answered by [`Frame::verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Application-defined message identifier.
    pub message_id: u8,
    /// The message payload, at most [`MAX_PAYLOAD`] bytes.
    pub payload: Bytes,
    /// XOR checksum over message id, length, and payload.
    pub checksum: u8,
}

impl Frame {
    /// Build a frame for transmission, computing its checksum.
    ///
    /// Returns [`WireError::PayloadTooLarge`] if the payload does not fit the
    /// one-byte length field.
    pub fn new(message_id: u8, payload: impl Into<Bytes>) -> Result<Self> {
        let payload = payload.into();
        if payload.len() > MAX_PAYLOAD {
            return Err(WireError::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD,
            });
        }
        let checksum = checksum(message_id, payload.len() as u8, &payload);
        Ok(Self {
            message_id,
            payload,
            checksum,
        })
    }

    /// The wire-level length byte.
    pub fn length(&self) -> u8 {
        self.payload.len() as u8
    }

    /// The total wire size of this frame (header + payload + checksum).
    pub fn wire_size(&self) -> usize {
        HEADER_SIZE + self.payload.len() + 1
    }

    /// Recompute the checksum over this frame's contents and compare it to
    /// the stored one.
    pub fn verify(&self) -> bool {
        checksum(self.message_id, self.length(), &self.payload) == self.checksum
    }

    /// Error-typed variant of [`Frame::verify`].
    pub fn ensure_valid(&self) -> Result<()> {
        let computed = checksum(self.message_id, self.length(), &self.payload);
        if computed == self.checksum {
            Ok(())
        } else {
            Err(WireError::ChecksumMismatch {
                stored: self.checksum,
                computed,
            })
        }
    }
}

/// XOR-fold over `[message_id, length, payload...]`, seeded with zero.
///
/// The byte order is the wire contract: encoder and verifier must feed the
/// same sequence. The start marker is excluded. Bytes are folded as they
/// stream through, no combined buffer is materialized.
pub fn checksum(message_id: u8, length: u8, payload: &[u8]) -> u8 {
    payload
        .iter()
        .fold(message_id ^ length, |acc, byte| acc ^ byte)
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌────────────┬────────────┬──────────┬──────────────────┬──────────┐
/// │ Start (1B) │ MsgId (1B) │ Len (1B) │ Payload          │ Cksum    │
/// │ 0x55       │            │          │ (Len bytes)      │ (1B)     │
/// └────────────┴────────────┴──────────┴──────────────────┴──────────┘
/// ```
pub fn encode_frame(frame: &Frame, dst: &mut BytesMut) {
    dst.reserve(frame.wire_size());
    dst.put_u8(START_BYTE);
    dst.put_u8(frame.message_id);
    dst.put_u8(frame.length());
    dst.put_slice(&frame.payload);
    dst.put_u8(frame.checksum);
}

/// Decode a frame from a buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// On success, consumes the frame bytes from the buffer. The decode is
/// structural only: the returned frame carries whatever checksum the wire
/// held, and [`Frame::verify`] judges it.
///
/// This path expects the buffer to begin at a frame boundary; a leading
/// non-marker byte is an error, not a resync. For inputs with garbage or
/// unknown alignment, use [`crate::parser::Parser`].
pub fn decode_frame(src: &mut BytesMut) -> Result<Option<Frame>> {
    if src.is_empty() {
        return Ok(None);
    }

    if src[0] != START_BYTE {
        return Err(WireError::InvalidStartByte { found: src[0] });
    }

    if src.len() < HEADER_SIZE {
        return Ok(None); // Need more data
    }

    let message_id = src[1];
    let length = src[2] as usize;

    let total = HEADER_SIZE + length + 1;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    src.advance(HEADER_SIZE);
    let payload = src.split_to(length).freeze();
    let checksum = src.get_u8();

    Ok(Some(Frame {
        message_id,
        payload,
        checksum,
    }))
}
