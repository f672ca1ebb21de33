//! In-memory mock filesystem.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// In-memory filesystem for testing.
///
/// Clones share the same storage, so a test can keep one handle and rewrite
/// files while a collector reads through another.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Map from path to file contents.
    files: HashMap<PathBuf, Vec<u8>>,
    /// Every ancestor directory of a stored file.
    directories: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file with the given content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());

        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                inner.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }

        inner.files.insert(path, content.into());
    }

    /// Removes a file, if present.
    pub fn remove_file(&self, path: impl AsRef<Path>) {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.files.remove(path.as_ref());
    }
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        String::from_utf8(self.read(path)?)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}
