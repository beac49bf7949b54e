use std::io::{ErrorKind, Write};
use std::path::Path;

use bytes::{Bytes, BytesMut};
use framelink_stream::FileSink;

use crate::codec::{encode_frame, Frame};
use crate::error::{Result, WireError};

const INITIAL_BUFFER_CAPACITY: usize = 512;

/// Writes complete frames to any `Write` stream.
pub struct FrameWriter<T> {
    inner: T,
    buf: BytesMut,
}

impl<T: Write> FrameWriter<T> {
    /// Create a frame writer over a byte sink.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
        }
    }

    /// Serialize and write a complete frame (blocking).
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        self.buf.clear();
        encode_frame(frame, &mut self.buf);

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(WireError::SinkClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
        }

        self.flush()
    }

    /// Build a frame from a payload and write it.
    pub fn send(&mut self, message_id: u8, payload: &[u8]) -> Result<()> {
        let frame = Frame::new(message_id, Bytes::copy_from_slice(payload))?;
        self.write_frame(&frame)
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(WireError::Io(err)),
            }
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

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl FrameWriter<FileSink> {
    /// Create a frame file and a writer over it.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let sink = FileSink::create(path).map_err(stream_to_wire_error)?;
        Ok(Self::new(sink))
    }

    /// Force written frames to disk.
    pub fn sync(&mut self) -> Result<()> {
        self.inner.sync().map_err(stream_to_wire_error)
    }
}

fn stream_to_wire_error(err: framelink_stream::StreamError) -> WireError {
    match err {
        framelink_stream::StreamError::Io(io) => WireError::Io(io),
        framelink_stream::StreamError::Create { source, .. }
        | framelink_stream::StreamError::Open { source, .. } => WireError::Io(source),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use bytes::BytesMut;

    use super::*;
    use crate::codec::{decode_frame, Frame, MAX_PAYLOAD};
    use crate::reader::FrameReader;

    #[test]
    fn write_single_frame() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(7, b"Hi").unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire, vec![0x55, 0x07, 0x02, 0x48, 0x69, 0x24]);
    }

    #[test]
    fn write_multiple_frames() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(1, b"one").unwrap();
        writer.send(2, b"two").unwrap();

        let mut wire = BytesMut::from(writer.into_inner().into_inner().as_slice());
        let f1 = decode_frame(&mut wire).unwrap().unwrap();
        let f2 = decode_frame(&mut wire).unwrap().unwrap();

        assert_eq!((f1.message_id, f1.payload.as_ref()), (1, b"one".as_ref()));
        assert_eq!((f2.message_id, f2.payload.as_ref()), (2, b"two".as_ref()));
        assert!(wire.is_empty());
    }

    #[test]
    fn oversized_payload_rejected_before_any_write() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        let err = writer.send(1, &vec![0u8; MAX_PAYLOAD + 1]).unwrap_err();
        assert!(matches!(err, WireError::PayloadTooLarge { .. }));

        // Nothing reached the sink.
        assert!(writer.into_inner().into_inner().is_empty());
    }

    #[test]
    fn written_bytes_read_back() {
        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.send(3, b"z").unwrap();

        let wire = writer.into_inner().into_inner();
        let mut reader = FrameReader::new(Cursor::new(wire));
        let frame = reader.read_frame().unwrap().unwrap();
        assert_eq!(frame.message_id, 3);
        assert_eq!(frame.payload.as_ref(), b"z");
        assert!(frame.verify());
    }

    #[test]
    fn sink_closed_when_write_returns_zero() {
        let mut writer = FrameWriter::new(ZeroWriter);
        let err = writer.send(1, b"x").unwrap_err();
        assert!(matches!(err, WireError::SinkClosed));
    }

    #[test]
    fn handles_interrupted_write_and_flush() {
        let sink = InterruptedWriteThenFlush {
            wrote_once: false,
            flush_interrupted: false,
            data: Vec::new(),
        };

        let mut writer = FrameWriter::new(sink);
        writer.send(5, b"retry").unwrap();

        let sink = writer.into_inner();
        assert_eq!(sink.data.len(), 3 + 5 + 1);
    }

    #[test]
    fn write_frame_preserves_stored_checksum() {
        // A frame carrying a deliberately wrong checksum goes out as-is; the
        // writer does not recompute.
        let mut frame = Frame::new(7, &b"Hi"[..]).unwrap();
        frame.checksum ^= 0xFF;

        let mut writer = FrameWriter::new(Cursor::new(Vec::<u8>::new()));
        writer.write_frame(&frame).unwrap();

        let wire = writer.into_inner().into_inner();
        assert_eq!(wire[5], 0x24 ^ 0xFF);
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct InterruptedWriteThenFlush {
        wrote_once: bool,
        flush_interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedWriteThenFlush {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.wrote_once {
                self.wrote_once = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            if !self.flush_interrupted {
                self.flush_interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            Ok(())
        }
    }
}
