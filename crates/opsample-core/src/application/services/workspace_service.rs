//! Workspace Service - reset and snapshot the generation directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{application::ports::Filesystem, error::SampleResult};

/// Every regular file under a directory, captured as bytes.
///
/// Empty directories are not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    root: PathBuf,
    files: Vec<(PathBuf, Vec<u8>)>,
}

impl WorkspaceSnapshot {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Prepares the directory a sample is generated into.
pub struct WorkspacePreparer {
    fs: Arc<dyn Filesystem>,
}

impl WorkspacePreparer {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self { fs }
    }

    /// Remove `dir` if present, then recreate it empty.
    ///
    /// Idempotent: two calls in a row leave the same empty directory.
    #[instrument(skip_all, fields(dir = %dir.display()))]
    pub fn prepare(&self, dir: &Path) -> SampleResult<()> {
        info!("Removing directory `{}` if it exists", dir.display());
        if self.fs.exists(dir) {
            self.fs.remove_dir_all(dir)?;
        }

        info!("Recreating directory `{}`", dir.display());
        self.fs.create_dir_all(dir)
    }

    /// Capture `dir` so it can be put back later. `None` when `dir` is not
    /// an existing directory.
    pub fn snapshot(&self, dir: &Path) -> SampleResult<Option<WorkspaceSnapshot>> {
        if !self.fs.is_dir(dir) {
            return Ok(None);
        }

        let mut files = Vec::new();
        for rel in self.fs.list_files(dir)? {
            let bytes = self.fs.read_bytes(&dir.join(&rel))?;
            files.push((rel, bytes));
        }
        debug!(files = files.len(), dir = %dir.display(), "Workspace snapshot taken");

        Ok(Some(WorkspaceSnapshot {
            root: dir.to_path_buf(),
            files,
        }))
    }

    /// Replace whatever is at the snapshot root with the captured tree.
    #[instrument(skip_all, fields(dir = %snapshot.root.display()))]
    pub fn restore(&self, snapshot: &WorkspaceSnapshot) -> SampleResult<()> {
        self.prepare(&snapshot.root)?;
        for (rel, bytes) in &snapshot.files {
            let path = snapshot.root.join(rel);
            if let Some(parent) = path.parent() {
                self.fs.create_dir_all(parent)?;
            }
            self.fs.write_bytes(&path, bytes)?;
        }
        info!(files = snapshot.files.len(), "Workspace restored");
        Ok(())
    }
}
