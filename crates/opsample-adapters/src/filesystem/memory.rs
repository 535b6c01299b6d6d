//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use opsample_core::{
    application::{ApplicationError, ports::Filesystem},
    error::SampleResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same tree.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

const LOCK: &str = "memory filesystem";

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Number of files stored.
    pub fn file_count(&self) -> usize {
        self.inner.read().map(|i| i.files.len()).unwrap_or(0)
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> SampleResult<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|e| ApplicationError::io(path, "read file", e).into())
    }

    fn write_file(&self, path: &Path, content: &str) -> SampleResult<()> {
        self.write_bytes(path, content.as_bytes())
    }

    fn read_bytes(&self, path: &Path) -> SampleResult<Vec<u8>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned { what: LOCK })?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::io(path, "read file", "No such file").into())
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> SampleResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned { what: LOCK })?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(
                    ApplicationError::io(path, "write file", "Parent directory does not exist")
                        .into(),
                );
            }
        }
        if inner.directories.contains(path) {
            return Err(ApplicationError::io(path, "write file", "Is a directory").into());
        }

        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> SampleResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned { what: LOCK })?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(
                    ApplicationError::io(path, "create directory", "File exists").into(),
                );
            }
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> SampleResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned { what: LOCK })?;

        if inner.files.contains_key(path) {
            return Err(ApplicationError::io(path, "remove directory", "Not a directory").into());
        }

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|i| i.files.contains_key(path) || i.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|i| i.directories.contains(path))
            .unwrap_or(false)
    }

    fn list_files(&self, root: &Path) -> SampleResult<Vec<PathBuf>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned { what: LOCK })?;
        Ok(inner
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(root).ok())
            .map(Path::to_path_buf)
            .collect())
    }
}
