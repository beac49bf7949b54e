use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::codec::{Frame, MAX_PAYLOAD, START_BYTE};

/// Per-byte parse result.
///
/// Completed frames are handed over by value — valid or not — and the parser
/// is already reset for the next frame when the event is returned. The caller
/// decides whether to drop, log, or forward a corrupted frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
    /// The frame in progress needs more bytes.
    Incomplete,
    /// A frame completed and its checksum matches.
    Valid(Frame),
    /// A frame completed but its checksum does not match its contents.
    Corrupted(Frame),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    WaitStart,
    ReadHeader,
    ReadPayload,
    VerifyChecksum,
}

/// Incremental frame parser.
///
/// A byte-at-a-time state machine: feed it bytes as they arrive — one per
/// network read if that's how they come — and it reconstructs frames without
/// ever buffering more than the frame in progress. One parser serves one
/// logical stream; independent streams get independent parsers.
///
/// While waiting for a frame, any byte that is not the start marker is
/// discarded and scanning continues. There is no resync beyond that: a
/// corrupted length byte makes the parser consume the declared number of
/// bytes as payload, possibly swallowing a following frame's start marker.
/// The checksum then fails and the stream recovers at the next marker. This
/// is the accepted limitation of a no-escaping framing scheme.
#[derive(Debug)]
pub struct Parser {
    state: State,
    message_id: u8,
    length: u8,
    payload: BytesMut,
    header_bytes: u8,
}

impl Parser {
    /// Create a parser ready to scan for a start marker.
    pub fn new() -> Self {
        Self {
            state: State::WaitStart,
            message_id: 0,
            length: 0,
            payload: BytesMut::with_capacity(MAX_PAYLOAD),
            header_bytes: 0,
        }
    }

    /// Discard any frame in progress and scan for the next start marker.
    pub fn reset(&mut self) {
        self.state = State::WaitStart;
        self.message_id = 0;
        self.length = 0;
        self.payload.clear();
        self.header_bytes = 0;
    }

    /// Consume one byte and report what it completed.
    pub fn push_byte(&mut self, byte: u8) -> ParseEvent {
        match self.state {
            State::WaitStart => {
                if byte == START_BYTE {
                    self.header_bytes = 1;
                    self.state = State::ReadHeader;
                } else {
                    trace!(byte, "discarding byte while scanning for start marker");
                }
                ParseEvent::Incomplete
            }
            State::ReadHeader => {
                if self.header_bytes == 1 {
                    self.message_id = byte;
                    self.header_bytes = 2;
                } else {
                    self.length = byte;
                    self.payload.clear();
                    self.header_bytes = 3;
                    // A zero-length frame carries no payload bytes: the next
                    // byte on the wire is already the checksum.
                    self.state = if byte == 0 {
                        State::VerifyChecksum
                    } else {
                        State::ReadPayload
                    };
                }
                ParseEvent::Incomplete
            }
            State::ReadPayload => {
                self.payload.put_u8(byte);
                if self.payload.len() == self.length as usize {
                    self.state = State::VerifyChecksum;
                }
                ParseEvent::Incomplete
            }
            State::VerifyChecksum => {
                let frame = Frame {
                    message_id: self.message_id,
                    payload: self.payload.split().freeze(),
                    checksum: byte,
                };
                self.reset();
                if frame.verify() {
                    ParseEvent::Valid(frame)
                } else {
                    trace!(
                        message_id = frame.message_id,
                        length = frame.length(),
                        "frame failed checksum verification"
                    );
                    ParseEvent::Corrupted(frame)
                }
            }
        }
    }

    /// Feed a slice of bytes, collecting every completed frame.
    ///
    /// Convenience over [`Parser::push_byte`] for callers that receive input
    /// in chunks; the parser state carries over between calls, so a frame may
    /// span any number of chunks.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<ParseEvent> {
        bytes
            .iter()
            .map(|byte| self.push_byte(*byte))
            .filter(|event| !matches!(event, ParseEvent::Incomplete))
            .collect()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
