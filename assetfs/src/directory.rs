use std::io::{self, Read, Seek, SeekFrom};

use crate::error::AssetError;
use crate::file::{HttpFile, WebFile};
use crate::fs::AssetFs;
use crate::info::EmbeddedFile;
use crate::path;
use crate::source::AssetSource;

/// A directory of embedded assets.
///
/// Reading yields no bytes. Children are enumerated with
/// [`read_dir`](AssetDirectory::read_dir).
#[derive(Debug, Clone)]
pub struct AssetDirectory {
    file: HttpFile,
    children_read: usize,
    children: Vec<EmbeddedFile>,
}

impl AssetDirectory {
    /// Create a directory handle for `name`.
    ///
    /// Each child is probed through `fs` to tell directories from files. Size
    /// and modification time of children are not resolved.
    pub fn new<S: AssetSource>(
        name: impl Into<String>,
        children: impl IntoIterator<Item = String>,
        fs: &AssetFs<S>,
    ) -> Self {
        let name = name.into();
        let children = children
            .into_iter()
            .map(|child| {
                let is_dir = fs.source().list_children(&path::join(&name, &child)).is_ok();
                EmbeddedFile::new(child, is_dir, 0, None)
            })
            .collect();
        Self {
            file: HttpFile::empty_dir(name),
            children_read: 0,
            children,
        }
    }

    /// List children of this directory.
    ///
    /// With `count > 0`, returns the next page of at most `count` children and
    /// advances the cursor. Once every child was read, the result is empty.
    ///
    /// With `count <= 0`, returns every child. The cursor is neither consulted
    /// nor advanced, so children already paged through are listed again.
    pub fn read_dir(&mut self, count: isize) -> Vec<EmbeddedFile> {
        if count <= 0 {
            return self.children.clone();
        }
        let start = self.children_read;
        let end = start.saturating_add(count.unsigned_abs()).min(self.children.len());
        self.children_read = end;
        self.children[start..end].to_vec()
    }

    /// Every child, in listing order.
    pub fn children(&self) -> &[EmbeddedFile] {
        &self.children
    }
}

impl Read for AssetDirectory {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for AssetDirectory {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl WebFile for AssetDirectory {
    fn read_dir(&mut self, count: isize) -> Result<Vec<EmbeddedFile>, AssetError> {
        Ok(AssetDirectory::read_dir(self, count))
    }

    fn size(&self) -> u64 {
        self.file.size()
    }

    fn stat(&self) -> &EmbeddedFile {
        self.file.stat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoxError, SourceError};
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::borrow::Cow;

    /// Only directories: `docs` with children `[a, b, c]`, and an empty `docs/b`.
    struct Tree;

    impl AssetSource for Tree {
        fn content(&self, path: &str) -> Result<Cow<'static, [u8]>, BoxError> {
            Err(SourceError::NotFound(path.to_string()).into())
        }

        fn list_children(&self, path: &str) -> Result<Vec<String>, BoxError> {
            match path {
                "docs" => Ok(vec!["a".into(), "b".into(), "c".into()]),
                "docs/b" => Ok(vec![]),
                _ => Err(SourceError::NotFound(path.to_string()).into()),
            }
        }
    }

    fn names(infos: &[EmbeddedFile]) -> Vec<&str> {
        infos.iter().map(|i| i.name()).collect()
    }

    #[fixture]
    fn dir() -> AssetDirectory {
        let fs = AssetFs::new(Tree);
        AssetDirectory::new("docs", ["a", "b", "c"].map(String::from), &fs)
    }

    #[rstest]
    fn test_stat(dir: AssetDirectory) {
        let info = dir.stat();
        assert_eq!(info.name(), "docs");
        assert!(info.is_dir());
        assert_eq!(info.size(), 0);
        assert_eq!(info.modified(), None);
    }

    #[rstest]
    fn test_children_are_probed(dir: AssetDirectory) {
        let kinds: Vec<_> = dir.children().iter().map(|c| c.is_dir()).collect();
        assert_eq!(kinds, vec![false, true, false]);
        assert!(dir.children().iter().all(|c| c.size() == 0 && c.modified().is_none()));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn test_read_dir_everything(mut dir: AssetDirectory, #[case] count: isize) {
        assert_eq!(names(&dir.read_dir(count)), vec!["a", "b", "c"]);
        assert_eq!(names(&dir.read_dir(count)), vec!["a", "b", "c"]);
    }

    #[rstest]
    fn test_read_dir_pages(mut dir: AssetDirectory) {
        assert_eq!(names(&dir.read_dir(2)), vec!["a", "b"]);
        assert_eq!(names(&dir.read_dir(2)), vec!["c"]);
        assert!(dir.read_dir(2).is_empty());
        assert!(dir.read_dir(1).is_empty());
    }

    #[rstest]
    fn test_read_dir_everything_ignores_cursor(mut dir: AssetDirectory) {
        assert_eq!(names(&dir.read_dir(1)), vec!["a"]);
        assert_eq!(names(&dir.read_dir(0)), vec!["a", "b", "c"]);
        assert_eq!(names(&dir.read_dir(5)), vec!["b", "c"]);
    }

    #[rstest]
    fn test_read_dir_large_count(mut dir: AssetDirectory) {
        assert_eq!(dir.read_dir(isize::MAX).len(), 3);
        assert!(dir.read_dir(isize::MAX).is_empty());
    }

    #[rstest]
    fn test_read_yields_nothing(mut dir: AssetDirectory) {
        let mut buf = Vec::new();
        assert_eq!(dir.read_to_end(&mut buf).unwrap(), 0);
        assert_eq!(WebFile::size(&dir), 0);
    }

    #[test]
    fn test_children_of_root() {
        let fs = AssetFs::new(Tree);
        let dir = AssetDirectory::new("", ["docs", "x"].map(String::from), &fs);
        let kinds: Vec<_> = dir.children().iter().map(|c| c.is_dir()).collect();
        assert_eq!(kinds, vec![true, false]);
    }
}
