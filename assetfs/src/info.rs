use std::sync::LazyLock;
use std::time::SystemTime;

static DEFAULT_FILE_TIMESTAMP: LazyLock<SystemTime> = LazyLock::new(SystemTime::now);

/// Modification time reported by assets which do not carry one.
///
/// The value is taken once per process, so every untimed asset reports the
/// same `Last-Modified` for as long as the server runs.
pub fn default_file_timestamp() -> SystemTime {
    *DEFAULT_FILE_TIMESTAMP
}

/// Metadata of an embedded file or directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedFile {
    name: String,
    is_dir: bool,
    size: u64,
    modified: Option<SystemTime>,
}

impl EmbeddedFile {
    pub fn new(
        name: impl Into<String>,
        is_dir: bool,
        size: u64,
        modified: Option<SystemTime>,
    ) -> Self {
        Self {
            name: name.into(),
            is_dir,
            size,
            modified,
        }
    }

    /// Logical path (for opened handles) or base name (for directory children).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Length of the content in bytes. Always 0 for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Modification time, if it was resolved.
    ///
    /// Directory children are listed without one.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }
}
