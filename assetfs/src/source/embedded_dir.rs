use std::borrow::Cow;

use include_dir::{Dir, DirEntry};

use super::AssetSource;
use crate::error::{BoxError, SourceError};
use crate::info::EmbeddedFile;

/// Assets embedded with [`include_dir!`](include_dir::include_dir).
///
/// Children are listed in lexicographic order. Modification times are
/// available when `include_dir` was compiled with its `metadata` feature.
impl AssetSource for Dir<'static> {
    fn content(&self, path: &str) -> Result<Cow<'static, [u8]>, BoxError> {
        self.get_file(path)
            .map(|file| Cow::Borrowed(file.contents()))
            .ok_or_else(|| SourceError::NotFound(path.to_string()).into())
    }

    fn list_children(&self, path: &str) -> Result<Vec<String>, BoxError> {
        let dir = if path.is_empty() {
            self
        } else {
            self.get_dir(path)
                .ok_or_else(|| SourceError::NotFound(path.to_string()))?
        };
        let mut names: Vec<_> = dir.entries().iter().map(entry_name).collect();
        names.sort_unstable();
        Ok(names)
    }

    fn metadata(&self, path: &str) -> Result<EmbeddedFile, BoxError> {
        let file = self
            .get_file(path)
            .ok_or_else(|| SourceError::NotFound(path.to_string()))?;
        let modified = file
            .metadata()
            .map(|m| m.modified())
            .ok_or_else(|| SourceError::NoMetadata(path.to_string()))?;
        Ok(EmbeddedFile::new(
            path,
            false,
            file.contents().len() as u64,
            Some(modified),
        ))
    }
}

fn entry_name(entry: &DirEntry) -> String {
    entry
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
