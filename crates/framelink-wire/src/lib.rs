//! Sentinel-delimited frame codec with XOR checksum and incremental parser.
//!
//! This is the core value-add layer of framelink. Every frame on the wire is:
//! - A 1-byte start marker (0x55) for stream synchronization
//! - A 1-byte message id, opaque to this layer
//! - A 1-byte payload length (0-255)
//! - The payload bytes
//! - A 1-byte XOR checksum over id, length, and payload
//!
//! Frames can be decoded two ways: [`decode_frame`] over a buffered byte
//! sequence, or [`Parser`] fed one byte at a time from a source that delivers
//! input at arbitrary, uneven intervals. Both paths agree on every verdict.

pub mod codec;
pub mod error;
pub mod fault;
pub mod parser;
pub mod reader;
pub mod writer;

pub use codec::{checksum, decode_frame, encode_frame, Frame, HEADER_SIZE, MAX_PAYLOAD, START_BYTE};
pub use error::{Result, WireError};
pub use fault::{Corruption, FaultInjector};
pub use parser::{ParseEvent, Parser};
pub use reader::FrameReader;
pub use writer::FrameWriter;
