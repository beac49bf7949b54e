/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The first byte of a frame is not the start marker.
    #[error("invalid start byte (expected 0x55, found {found:#04x})")]
    InvalidStartByte { found: u8 },

    /// The payload exceeds the one-byte length field's range.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The stored checksum does not match the frame contents.
    #[error("checksum mismatch (stored {stored:#04x}, computed {computed:#04x})")]
    ChecksumMismatch { stored: u8, computed: u8 },

    /// The input ended inside a frame.
    #[error("input ended inside a frame ({got} of {needed} bytes)")]
    Truncated { needed: usize, got: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink stopped accepting bytes before a complete frame was written.
    #[error("sink closed (incomplete frame)")]
    SinkClosed,
}

pub type Result<T> = std::result::Result<T, WireError>;
