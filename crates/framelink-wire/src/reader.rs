use std::io::{ErrorKind, Read};
use std::path::Path;

use bytes::BytesMut;
use framelink_stream::FileSource;

use crate::codec::{decode_frame, Frame, HEADER_SIZE};
use crate::error::{Result, WireError};

const INITIAL_BUFFER_CAPACITY: usize = 512;
const READ_CHUNK_SIZE: usize = 512;

/// Reads complete frames from any `Read` stream.
///
/// Partial reads are buffered internally, so callers only ever see whole
/// frames. The stream must begin at a frame boundary; for inputs with
/// garbage or unknown alignment, feed bytes into [`crate::parser::Parser`]
/// instead.
pub struct FrameReader<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Read> FrameReader<T> {
    /// Create a frame reader over a byte source.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Ok(None)` when the source ends cleanly at a frame boundary,
    /// and [`WireError::Truncated`] when it ends inside a frame. Checksum
    /// validity is not judged here — the caller runs [`Frame::verify`] and
    /// decides what a corrupted frame means.
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            if let Some(frame) = decode_frame(&mut self.buf)? {
                return Ok(Some(frame));
            }

            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = match self.inner.read(&mut chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(WireError::Io(err)),
            };

            if read == 0 {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(WireError::Truncated {
                    needed: self.needed_bytes(),
                    got: self.buf.len(),
                });
            }

            self.buf.extend_from_slice(&chunk[..read]);
        }
    }

    /// Total wire size of the frame in progress, as far as the header says.
    fn needed_bytes(&self) -> usize {
        if self.buf.len() >= HEADER_SIZE {
            HEADER_SIZE + self.buf[2] as usize + 1
        } else {
            // Header still incomplete; the smallest possible frame is the
            // three header bytes plus the checksum.
            HEADER_SIZE + 1
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl FrameReader<FileSource> {
    /// Open a frame file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let source = FileSource::open(path).map_err(stream_to_wire_error)?;
        Ok(Self::new(source))
    }
}

fn stream_to_wire_error(err: framelink_stream::StreamError) -> WireError {
    match err {
        framelink_stream::StreamError::Io(io) => WireError::Io(io),
        framelink_stream::StreamError::Create { source, .. }
        | framelink_stream::StreamError::Open { source, .. } => WireError::Io(source),
    }
}
