use std::borrow::Cow;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::time::SystemTime;

use crate::error::AssetError;
use crate::info::{EmbeddedFile, default_file_timestamp};

/// File handle served to an HTTP static-file server.
///
/// Files and directories share this interface so that a server can treat
/// every [`AssetFs::open`](crate::AssetFs::open) result uniformly.
pub trait WebFile: Read + Seek {
    /// List up to `count` children of a directory.
    ///
    /// See [`AssetDirectory::read_dir`](crate::AssetDirectory::read_dir) for
    /// the pagination rules. Plain files always fail with
    /// [`AssetError::NotADirectory`].
    fn read_dir(&mut self, count: isize) -> Result<Vec<EmbeddedFile>, AssetError>;

    /// Size of the content in bytes.
    fn size(&self) -> u64;

    /// Metadata of this handle.
    fn stat(&self) -> &EmbeddedFile;
}

/// A non-directory asset with its content.
#[derive(Debug, Clone)]
pub struct HttpFile {
    reader: Cursor<Cow<'static, [u8]>>,
    info: EmbeddedFile,
}

impl HttpFile {
    /// Create a file handle. Without a `timestamp`, the file reports
    /// [`default_file_timestamp`].
    pub fn new(
        name: impl Into<String>,
        content: impl Into<Cow<'static, [u8]>>,
        timestamp: Option<SystemTime>,
    ) -> Self {
        let content = content.into();
        let modified = timestamp.unwrap_or_else(default_file_timestamp);
        let info = EmbeddedFile::new(name, false, content.len() as u64, Some(modified));
        Self {
            reader: Cursor::new(content),
            info,
        }
    }

    /// Directory handles have no content and no resolved timestamp.
    pub(crate) fn empty_dir(name: impl Into<String>) -> Self {
        Self {
            reader: Cursor::new(Cow::Borrowed(&[][..])),
            info: EmbeddedFile::new(name, true, 0, None),
        }
    }

    /// The entire content, regardless of the read position.
    pub fn content(&self) -> &[u8] {
        self.reader.get_ref()
    }
}

impl Read for HttpFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Seek for HttpFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.reader.seek(pos)
    }
}

impl WebFile for HttpFile {
    fn read_dir(&mut self, _count: isize) -> Result<Vec<EmbeddedFile>, AssetError> {
        Err(AssetError::NotADirectory)
    }

    fn size(&self) -> u64 {
        self.info.size()
    }

    fn stat(&self) -> &EmbeddedFile {
        &self.info
    }
}
