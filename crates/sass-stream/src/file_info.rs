//! File descriptors flowing through a pipeline.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use camino::{Utf8Path, Utf8PathBuf};

/// Opaque identity of one logical file in a pipeline run.
///
/// Two descriptors describe the same file iff their tokens are equal,
/// whatever their names say.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileToken(u64);

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

impl FileToken {
    /// Allocate a token never handed out before in this process.
    pub fn next() -> Self {
        FileToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a runner-assigned identifier.
    pub fn from_raw(raw: u64) -> Self {
        FileToken(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FileToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Metadata for one file travelling through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    token: FileToken,
    /// Base file name, e.g. `main.scss`
    pub name: String,
    /// Directory component of the file's current location
    pub path: Utf8PathBuf,
    /// Directory the file was read from. Imports resolve relative to it.
    pub original_path: Utf8PathBuf,
}

impl FileInfo {
    /// Describe the file at `path` under a fresh token.
    pub fn new(path: impl AsRef<Utf8Path>) -> Self {
        Self::with_token(FileToken::next(), path)
    }

    /// Describe the file at `path` under a token chosen by the caller.
    pub fn with_token(token: FileToken, path: impl AsRef<Utf8Path>) -> Self {
        let path = path.as_ref();
        let name = path.file_name().unwrap_or_default().to_string();
        let dir = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent.to_owned(),
            _ => Utf8PathBuf::from("."),
        };

        Self {
            token,
            name,
            path: dir.clone(),
            original_path: dir,
        }
    }

    pub fn token(&self) -> FileToken {
        self.token
    }

    /// Whether `other` describes the same logical file.
    pub fn is_same_file(&self, other: &FileInfo) -> bool {
        self.token == other.token
    }

    /// Text after the last dot of `name`. A dot-file such as `.scss` has
    /// extension `scss`.
    pub fn extension(&self) -> Option<&str> {
        self.name.rfind('.').map(|i| &self.name[i + 1..])
    }

    /// A copy of this descriptor under a different name, same identity.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// `path` joined with `name`
    pub fn display_path(&self) -> Utf8PathBuf {
        self.path.join(&self.name)
    }
}
