//! Scoped change of the process working directory.
//!
//! The working directory is process-global. `ProcessScope` is the only place
//! opsample changes it: entering a scope takes a process-wide lock, and
//! dropping the scope restores the previous directory before releasing the
//! lock. Restoration happens on every exit path, unwinding included.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use opsample_core::{application::ApplicationError, error::SampleResult};

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Guard that keeps the working directory at a given path while alive.
#[must_use = "the working directory is restored as soon as the scope is dropped"]
pub struct ProcessScope {
    previous: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl ProcessScope {
    /// Change into `dir`, blocking while another scope is active.
    pub fn enter(dir: &Path) -> SampleResult<Self> {
        // A panic inside a previous scope has already restored the directory.
        let lock = CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let previous = std::env::current_dir().map_err(|e| ApplicationError::WorkingDirectory {
            path: dir.to_path_buf(),
            reason: format!("cannot read current directory: {}", e),
        })?;

        std::env::set_current_dir(dir).map_err(|e| ApplicationError::WorkingDirectory {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(dir = %dir.display(), previous = %previous.display(), "Changed working directory");

        Ok(Self {
            previous,
            _lock: lock,
        })
    }

    /// Directory that will be restored on drop.
    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for ProcessScope {
    fn drop(&mut self) {
        match std::env::set_current_dir(&self.previous) {
            Ok(()) => debug!(dir = %self.previous.display(), "Restored working directory"),
            Err(e) => warn!(
                dir = %self.previous.display(),
                error = %e,
                "Could not change back to the previous working directory"
            ),
        }
    }
}
