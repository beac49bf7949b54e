use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StreamError};

/// File-backed byte sink.
///
/// Created with truncation: each sink starts from an empty file. A failed
/// create is reported to the caller and leaves no partial state behind.
pub struct FileSink {
    file: File,
    path: PathBuf,
}

impl FileSink {
    /// Create (or truncate) the destination file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| StreamError::Create {
            path: path.clone(),
            source: e,
        })?;
        debug!(?path, "opened frame sink");
        Ok(Self { file, path })
    }

    /// Force buffered bytes to disk.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all().map_err(StreamError::Io)
    }

    /// The path this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl std::fmt::Debug for FileSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSink").field("path", &self.path).finish()
    }
}

/// File-backed byte source.
///
/// Reports end of input through the standard zero-length read. Whether an EOF
/// lands on a frame boundary or inside one is the frame layer's call — only
/// it knows the declared length.
pub struct FileSource {
    file: File,
    path: PathBuf,
}

impl FileSource {
    /// Open the source file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| StreamError::Open {
            path: path.clone(),
            source: e,
        })?;
        debug!(?path, "opened frame source");
        Ok(Self { file, path })
    }

    /// The path this source reads from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.file.read(buf)
    }
}

impl std::fmt::Debug for FileSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSource")
            .field("path", &self.path)
            .finish()
    }
}
