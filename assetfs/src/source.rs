//! Accessors to the embedded asset store.

use std::borrow::Cow;

use crate::error::{BoxError, SourceError};
use crate::info::EmbeddedFile;

#[cfg(feature = "bundle")]
mod bundle;
#[cfg(feature = "include_dir")]
mod embedded_dir;

#[cfg(feature = "bundle")]
pub use bundle::{AssetBundle, BundleFile};

/// Read-only access to assets embedded at build time.
///
/// Paths are slash-separated and relative, without a leading `/`. The root
/// directory is the empty path.
///
/// Implementations signal a missing path by failing with an error whose
/// message contains `"not found"`, e.g. [`SourceError::NotFound`]. Any other
/// failure of [`list_children`](AssetSource::list_children) is treated as an
/// internal error by [`AssetFs`](crate::AssetFs).
pub trait AssetSource {
    /// Full content of the file at `path`.
    fn content(&self, path: &str) -> Result<Cow<'static, [u8]>, BoxError>;

    /// Names of the immediate children of the directory at `path`.
    fn list_children(&self, path: &str) -> Result<Vec<String>, BoxError>;

    /// Metadata of the file at `path`. Only the modification time is used.
    ///
    /// Sources without metadata can rely on the default, which always fails.
    fn metadata(&self, path: &str) -> Result<EmbeddedFile, BoxError> {
        Err(SourceError::NoMetadata(path.to_string()).into())
    }
}

impl<S: AssetSource + ?Sized> AssetSource for &S {
    fn content(&self, path: &str) -> Result<Cow<'static, [u8]>, BoxError> {
        (**self).content(path)
    }

    fn list_children(&self, path: &str) -> Result<Vec<String>, BoxError> {
        (**self).list_children(path)
    }

    fn metadata(&self, path: &str) -> Result<EmbeddedFile, BoxError> {
        (**self).metadata(path)
    }
}

/// Signature of the optional metadata accessor of [`FnSource`].
pub type MetadataFn = fn(&str) -> Result<EmbeddedFile, BoxError>;

/// An [`AssetSource`] made of plain functions, e.g. the ones emitted by an
/// asset code generator.
///
/// ```
/// use std::borrow::Cow;
/// use assetfs::{AssetFs, FnSource, SourceError};
///
/// let source = FnSource::new(
///     |path: &str| match path {
///         "index.html" => Ok(Cow::Borrowed(&b"<h1>hi</h1>"[..])),
///         _ => Err(SourceError::NotFound(path.to_string()).into()),
///     },
///     |path: &str| match path {
///         "" => Ok(vec!["index.html".to_string()]),
///         _ => Err(SourceError::NotFound(path.to_string()).into()),
///     },
/// );
/// let fs = AssetFs::new(source);
/// assert!(fs.open("/index.html").is_ok());
/// assert!(fs.open("/missing").unwrap_err().is_not_found());
/// ```
pub struct FnSource<C, L, M = MetadataFn> {
    content: C,
    list_children: L,
    metadata: Option<M>,
}

impl<C, L> FnSource<C, L>
where
    C: Fn(&str) -> Result<Cow<'static, [u8]>, BoxError>,
    L: Fn(&str) -> Result<Vec<String>, BoxError>,
{
    /// Create a source without a metadata accessor.
    pub fn new(content: C, list_children: L) -> Self {
        Self {
            content,
            list_children,
            metadata: None,
        }
    }
}

impl<C, L, M> FnSource<C, L, M> {
    /// Add an accessor for file modification times.
    pub fn with_metadata<F>(self, metadata: F) -> FnSource<C, L, F>
    where
        F: Fn(&str) -> Result<EmbeddedFile, BoxError>,
    {
        FnSource {
            content: self.content,
            list_children: self.list_children,
            metadata: Some(metadata),
        }
    }
}

impl<C, L, M> AssetSource for FnSource<C, L, M>
where
    C: Fn(&str) -> Result<Cow<'static, [u8]>, BoxError>,
    L: Fn(&str) -> Result<Vec<String>, BoxError>,
    M: Fn(&str) -> Result<EmbeddedFile, BoxError>,
{
    fn content(&self, path: &str) -> Result<Cow<'static, [u8]>, BoxError> {
        (self.content)(path)
    }

    fn list_children(&self, path: &str) -> Result<Vec<String>, BoxError> {
        (self.list_children)(path)
    }

    fn metadata(&self, path: &str) -> Result<EmbeddedFile, BoxError> {
        match &self.metadata {
            Some(metadata) => metadata(path),
            None => Err(SourceError::NoMetadata(path.to_string()).into()),
        }
    }
}
