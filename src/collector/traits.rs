//! Seams between the collectors and the outside world.
//!
//! `FileSystem` lets file-backed readers run against the real disk or an
//! in-memory mock; `SystemSampler` hides how host resource figures are obtained.

use std::io;
use std::path::Path;

use crate::collector::CollectError;
use crate::model::SystemSnapshot;

/// Abstraction for filesystem operations.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Reads the entire contents of a file as raw bytes.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// A source of host CPU, memory and load readings.
///
/// Implementations may parse whatever platform format they like; callers only
/// ever see the typed [`SystemSnapshot`].
pub trait SystemSampler {
    /// Takes one reading.
    fn sample(&mut self) -> Result<SystemSnapshot, CollectError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_real_fs_read_to_string() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{\"totalMessages\": 1}}").unwrap();

        let fs = RealFs::new();
        let content = fs.read_to_string(file.path()).unwrap();
        assert!(content.contains("totalMessages"));
    }

    #[test]
    fn test_real_fs_read_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\xff\n").unwrap();

        let fs = RealFs::new();
        assert_eq!(fs.read(file.path()).unwrap(), b"ok\xff\n");
        assert!(fs.read_to_string(file.path()).is_err());
    }

    #[test]
    fn test_real_fs_exists() {
        let dir = tempfile::tempdir().unwrap();
        let fs = RealFs::new();
        assert!(fs.exists(dir.path()));
        assert!(!fs.exists(&dir.path().join("missing.json")));
    }
}
