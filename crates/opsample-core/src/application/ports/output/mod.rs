//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `opsample-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::application::context::ExecutionContext;
use crate::domain::CommandSpec;
use crate::error::SampleResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `opsample_adapters::filesystem::LocalFilesystem` (production)
/// - `opsample_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `write_file` / `write_bytes` replace the target as a whole: readers
///   observe either the old or the new content, never a truncated file.
/// - `remove_dir_all` on a missing path succeeds; on a regular file it fails.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Read a UTF-8 text file.
    fn read_to_string(&self, path: &Path) -> SampleResult<String>;

    /// Replace a file's content.
    fn write_file(&self, path: &Path, content: &str) -> SampleResult<()>;

    /// Read raw bytes.
    fn read_bytes(&self, path: &Path) -> SampleResult<Vec<u8>>;

    /// Replace a file's content with raw bytes.
    fn write_bytes(&self, path: &Path, content: &[u8]) -> SampleResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SampleResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> SampleResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// All regular files under `root`, as paths relative to `root`, sorted.
    fn list_files(&self, root: &Path) -> SampleResult<Vec<PathBuf>>;
}

/// Port for the external scaffold producer.
///
/// Implemented by:
/// - `opsample_adapters::scaffold::ExternalScaffolder` (subprocess)
/// - `opsample_adapters::scaffold::InProcessScaffolder` (entry point needing ambient cwd)
/// - `opsample_adapters::scaffold::BuiltinScaffolder` (bundled Quarkus templates)
///
/// The engine generates files into `ctx.working_dir()` as directed by
/// `ctx.args()`. Success or failure is all the core looks at.
#[cfg_attr(test, mockall::automock)]
pub trait ScaffoldEngine: Send + Sync {
    fn run(&self, ctx: &ExecutionContext) -> SampleResult<()>;
}

/// Outcome of an external command that was started successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when terminated by a signal.
    pub status: Option<i32>,
    /// Captured stdout followed by stderr.
    pub combined: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Port for running external build tooling.
///
/// Implemented by:
/// - `opsample_adapters::command::ProcessRunner`
///
/// Returns `Ok` whenever the process ran to completion, whatever its exit
/// status. `Err` means it could not be started or hit the context timeout.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandSpec, ctx: &ExecutionContext) -> SampleResult<CommandOutput>;
}
