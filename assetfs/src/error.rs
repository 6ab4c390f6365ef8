//! Error types of asset resolution.

use std::io;

/// Opaque error produced by an [`AssetSource`](crate::AssetSource) accessor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures surfaced by [`AssetFs::open`](crate::AssetFs::open) and by file handles.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// Directory listing was requested from a plain file.
    #[error("not a directory")]
    NotADirectory,
    /// The path resolved to neither a file nor a directory.
    ///
    /// HTTP servers should answer with `404 Not Found`.
    #[error("file does not exist")]
    NotExist,
    /// Directory listing failed for a reason other than absence. The accessor's
    /// error is kept as-is.
    ///
    /// HTTP servers should answer with `500 Internal Server Error`.
    #[error(transparent)]
    Source(BoxError),
}

impl AssetError {
    /// Classify a failed directory lookup.
    ///
    /// Accessors signal absence only through their error message, so any error
    /// whose text mentions "not found" becomes [`AssetError::NotExist`].
    pub(crate) fn classify(error: BoxError) -> Self {
        if error.to_string().contains("not found") {
            Self::NotExist
        } else {
            Self::Source(error)
        }
    }

    /// Whether this error should be reported to HTTP clients as a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotExist)
    }
}

impl From<AssetError> for io::Error {
    fn from(value: AssetError) -> Self {
        match value {
            AssetError::NotADirectory => {
                io::Error::new(io::ErrorKind::NotADirectory, AssetError::NotADirectory)
            }
            AssetError::NotExist => io::Error::new(io::ErrorKind::NotFound, AssetError::NotExist),
            AssetError::Source(e) => io::Error::other(e),
        }
    }
}

/// Errors reported by the built-in asset sources.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// No asset or directory exists at the path.
    #[error("asset {0:?} not found")]
    NotFound(String),
    /// The source keeps no metadata for the path.
    #[error("no metadata for asset {0:?}")]
    NoMetadata(String),
}
