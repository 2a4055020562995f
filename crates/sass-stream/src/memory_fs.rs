//! In-memory filesystem for the grass compiler

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Stylesheets held in memory, keyed by path.
///
/// Lets a [`crate::GrassCompiler`] resolve `@import`s without touching disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryFs {
    files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), content.into());
    }

    /// Builder form of [`MemoryFs::insert`].
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl<P: Into<PathBuf>, C: Into<Vec<u8>>> FromIterator<(P, C)> for MemoryFs {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let files = iter
            .into_iter()
            .map(|(path, content)| (path.into(), content.into()))
            .collect();
        Self { files }
    }
}

impl grass::Fs for MemoryFs {
    fn is_dir(&self, path: &Path) -> bool {
        // A directory exists if any file lives under it
        self.files
            .keys()
            .any(|f| f != path && f.starts_with(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })
    }
}
