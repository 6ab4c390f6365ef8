//! A flat map of files, in the style of `include_webdir` bundles.
//!
//! Only files are stored. Directories exist implicitly as the prefixes of the
//! file paths, e.g. the bundle `{"assets/app.js", "index.html"}` has the root
//! directory `""` with children `["assets", "index.html"]` and the directory
//! `"assets"` with the child `["app.js"]`.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::time::SystemTime;

use super::AssetSource;
use crate::error::{BoxError, SourceError};
use crate::info::EmbeddedFile;

/// File content with an optional modification time.
#[derive(Copy, Clone, Debug)]
pub struct BundleFile<'a> {
    /// File content
    pub body: &'a [u8],
    /// Last-Modified date
    pub last_modified: Option<SystemTime>,
}

impl<'a> BundleFile<'a> {
    pub const fn new(body: &'a [u8]) -> Self {
        Self {
            body,
            last_modified: None,
        }
    }

    pub const fn with_last_modified(self, last_modified: SystemTime) -> Self {
        Self {
            body: self.body,
            last_modified: Some(last_modified),
        }
    }
}

/// Map of paths to files, kept sorted by path.
///
/// ```
/// use assetfs::{AssetBundle, BundleFile};
///
/// let bundle: AssetBundle = [
///     ("index.html", BundleFile::new(b"<html></html>")),
///     ("assets/app.js", BundleFile::new(b"alert(1)")),
/// ]
/// .into_iter()
/// .collect();
/// assert_eq!(bundle.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct AssetBundle<'a> {
    files: litemap::LiteMap<&'a str, BundleFile<'a>>,
}

impl<'a> AssetBundle<'a> {
    pub fn new() -> Self {
        Self {
            files: litemap::LiteMap::new(),
        }
    }

    /// Add a file, replacing any file previously stored at `path`.
    pub fn insert(&mut self, path: &'a str, file: BundleFile<'a>) -> Option<BundleFile<'a>> {
        self.files.insert(path, file)
    }

    pub fn get(&self, path: &str) -> Option<&BundleFile<'a>> {
        self.files.get(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Distinct next path segments below `dir`, in sorted order.
    fn children_of(&self, dir: &str) -> Vec<String> {
        let mut children = BTreeSet::new();
        for path in self.files.iter_keys() {
            let rest = if dir.is_empty() {
                Some(*path)
            } else {
                path.strip_prefix(dir).and_then(|p| p.strip_prefix('/'))
            };
            if let Some(rest) = rest
                && let Some(child) = rest.split('/').next()
                && !child.is_empty()
            {
                children.insert(child);
            }
        }
        children.into_iter().map(str::to_string).collect()
    }
}

impl Default for AssetBundle<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<(&'a str, BundleFile<'a>)> for AssetBundle<'a> {
    fn from_iter<T: IntoIterator<Item = (&'a str, BundleFile<'a>)>>(iter: T) -> Self {
        Self {
            files: iter.into_iter().collect(),
        }
    }
}

impl AssetSource for AssetBundle<'static> {
    fn content(&self, path: &str) -> Result<Cow<'static, [u8]>, BoxError> {
        self.get(path)
            .map(|file| Cow::Borrowed(file.body))
            .ok_or_else(|| SourceError::NotFound(path.to_string()).into())
    }

    fn list_children(&self, path: &str) -> Result<Vec<String>, BoxError> {
        let children = self.children_of(path);
        if children.is_empty() {
            Err(SourceError::NotFound(path.to_string()).into())
        } else {
            Ok(children)
        }
    }

    fn metadata(&self, path: &str) -> Result<EmbeddedFile, BoxError> {
        let file = self
            .get(path)
            .ok_or_else(|| SourceError::NotFound(path.to_string()))?;
        let modified = file
            .last_modified
            .ok_or_else(|| SourceError::NoMetadata(path.to_string()))?;
        Ok(EmbeddedFile::new(
            path,
            false,
            file.body.len() as u64,
            Some(modified),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn bundle() -> AssetBundle<'static> {
        [
            ("index.html", BundleFile::new(b"<html></html>")),
            ("assets/app.js", BundleFile::new(b"alert(1)")),
            ("assets/app.css", BundleFile::new(b"body {}")),
            ("assets/fonts/a.woff2", BundleFile::new(b"\0")),
            ("assets-old/app.js", BundleFile::new(b"")),
        ]
        .into_iter()
        .collect()
    }

    #[rstest]
    #[case("", &["assets", "assets-old", "index.html"])]
    #[case("assets", &["app.css", "app.js", "fonts"])]
    #[case("assets/fonts", &["a.woff2"])]
    fn test_list_children(
        bundle: AssetBundle<'static>,
        #[case] dir: &str,
        #[case] expected: &[&str],
    ) {
        assert_eq!(bundle.list_children(dir).unwrap(), expected)
    }

    #[rstest]
    #[case("missing")]
    #[case("index.html")]
    #[case("asset")]
    fn test_list_children_not_found(bundle: AssetBundle<'static>, #[case] dir: &str) {
        let error = bundle.list_children(dir).unwrap_err();
        assert!(error.to_string().contains("not found"))
    }

    #[rstest]
    fn test_content(bundle: AssetBundle<'static>) {
        assert_eq!(bundle.content("assets/app.js").unwrap().as_ref(), b"alert(1)");
        assert!(bundle.content("assets").is_err());
    }

    #[rstest]
    fn test_metadata(mut bundle: AssetBundle<'static>) {
        assert!(bundle.metadata("index.html").is_err());
        let then = SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_645_561_220);
        bundle.insert(
            "index.html",
            BundleFile::new(b"<html></html>").with_last_modified(then),
        );
        let info = bundle.metadata("index.html").unwrap();
        assert_eq!(info.modified(), Some(then));
        assert_eq!(info.size(), 13);
    }
}
