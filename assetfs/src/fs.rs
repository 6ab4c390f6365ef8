use std::io::{self, Read, Seek, SeekFrom};

use crate::config::AssetFsConfig;
use crate::directory::AssetDirectory;
use crate::error::AssetError;
use crate::file::{HttpFile, WebFile};
use crate::info::EmbeddedFile;
use crate::path;
use crate::source::AssetSource;

/// Serves the assets of an [`AssetSource`] as [`WebFile`] handles.
///
/// ## Resolution
///
/// [`open`](AssetFs::open) joins the prefix with the requested path, then
/// tries, in order:
///
/// 1. the path as a file,
/// 2. the path as a directory,
/// 3. the fallback path, if one is configured.
///
/// A fallback is useful for single-page applications which do client-side
/// routing: unknown paths are answered with `index.html`.
#[derive(Debug, Clone)]
pub struct AssetFs<S> {
    source: S,
    prefix: String,
    fallback: String,
}

impl<S: AssetSource> AssetFs<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            prefix: String::new(),
            fallback: String::new(),
        }
    }

    /// Create an [`AssetFs`] with the prefix and fallback from `config`.
    pub fn from_config(source: S, config: AssetFsConfig) -> Self {
        Self {
            source,
            prefix: config.prefix,
            fallback: config.fallback,
        }
    }

    /// Prepend `prefix` to every requested path, e.g. `"dist"` serves the asset
    /// `dist/index.html` for the request `/index.html`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Serve `fallback` for paths which are neither files nor directories.
    /// An empty string disables the fallback.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Open the file or directory at `request_path`.
    ///
    /// ## Errors
    ///
    /// - [`AssetError::NotExist`] if nothing was found and the directory
    ///   lookup failed with a "not found" message.
    /// - [`AssetError::Source`] with the unchanged error of the directory
    ///   lookup otherwise.
    ///
    /// The fallback is attempted at most once per call. A fallback which does
    /// not resolve itself produces the error of its own lookup.
    pub fn open(&self, request_path: &str) -> Result<AssetHandle, AssetError> {
        self.open_impl(request_path, !self.fallback.is_empty())
    }

    fn open_impl(
        &self,
        request_path: &str,
        use_fallback: bool,
    ) -> Result<AssetHandle, AssetError> {
        let name = path::normalize(&self.prefix, request_path);
        if let Ok(content) = self.source.content(&name) {
            tracing::debug!(path = name, "serving embedded file");
            let timestamp = self.modified_time(&name);
            return Ok(AssetHandle::File(HttpFile::new(name, content, timestamp)));
        }
        match self.source.list_children(&name) {
            Ok(children) => {
                tracing::debug!(
                    path = name,
                    children = children.len(),
                    "serving embedded directory"
                );
                Ok(AssetHandle::Directory(AssetDirectory::new(name, children, self)))
            }
            Err(_) if use_fallback => {
                tracing::debug!(
                    path = name,
                    fallback = self.fallback,
                    "asset not found, using fallback"
                );
                self.open_impl(&self.fallback, false)
            }
            Err(e) => Err(AssetError::classify(e)),
        }
    }

    fn modified_time(&self, name: &str) -> Option<std::time::SystemTime> {
        match self.source.metadata(name) {
            Ok(info) => info.modified(),
            Err(e) => {
                tracing::trace!(path = name, error = %e, "no metadata for embedded file");
                None
            }
        }
    }
}

/// A file or directory opened by [`AssetFs::open`].
#[derive(Debug, Clone)]
pub enum AssetHandle {
    File(HttpFile),
    Directory(AssetDirectory),
}

impl AssetHandle {
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    pub fn into_file(self) -> Option<HttpFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    pub fn into_directory(self) -> Option<AssetDirectory> {
        match self {
            Self::File(_) => None,
            Self::Directory(dir) => Some(dir),
        }
    }
}

impl Read for AssetHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(file) => file.read(buf),
            Self::Directory(dir) => dir.read(buf),
        }
    }
}

impl Seek for AssetHandle {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            Self::File(file) => file.seek(pos),
            Self::Directory(dir) => dir.seek(pos),
        }
    }
}

impl WebFile for AssetHandle {
    fn read_dir(&mut self, count: isize) -> Result<Vec<EmbeddedFile>, AssetError> {
        match self {
            Self::File(file) => file.read_dir(count),
            Self::Directory(dir) => WebFile::read_dir(dir, count),
        }
    }

    fn size(&self) -> u64 {
        match self {
            Self::File(file) => file.size(),
            Self::Directory(dir) => dir.size(),
        }
    }

    fn stat(&self) -> &EmbeddedFile {
        match self {
            Self::File(file) => file.stat(),
            Self::Directory(dir) => dir.stat(),
        }
    }
}
