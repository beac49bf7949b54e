//! Sentinel-framed byte protocol with XOR checksum and incremental parsing.
//!
//! framelink frames carry a one-byte message id and up to 255 payload bytes
//! behind a fixed 0x55 start marker, trailed by a one-byte XOR checksum.
//!
//! # Crate Structure
//!
//! - [`stream`] — File-backed byte sink/source collaborator
//! - [`wire`] — Frame codec, incremental parser, reader/writer, fault injector

/// Re-export stream types.
pub mod stream {
    pub use framelink_stream::*;
}

/// Re-export wire types.
pub mod wire {
    pub use framelink_wire::*;
}
