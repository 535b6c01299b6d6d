//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the external
//! collaborators (filesystem, scaffold engine, build tools). Validation
//! failures are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::{ErrorCategory, SampleError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    /// An expected marker is missing from a generated file.
    #[error("anchor {anchor:?} not found in {path}")]
    AnchorNotFound {
        path: PathBuf,
        anchor: String,
        near_miss_line: Option<usize>,
    },

    /// The scaffold engine reported a failure.
    #[error("scaffolding with the `{subcommand}` subcommand failed: {reason}")]
    Scaffold { subcommand: String, reason: String },

    /// The build command failed or could not be started.
    #[error("`{command}` failed ({})", describe_status(.status))]
    Build {
        command: String,
        status: Option<i32>,
        output: String,
    },

    /// The packaging command failed or could not be started.
    #[error("`{command}` failed ({})", describe_status(.status))]
    Package {
        command: String,
        status: Option<i32>,
        output: String,
    },

    /// An external command exceeded its time limit and was killed.
    #[error("`{command}` timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    /// A named pipeline step failed; `cause` is the underlying error.
    #[error("step {index} '{step}' ({label}) failed: {cause}")]
    StepFailed {
        index: usize,
        step: String,
        label: String,
        #[source]
        cause: Box<SampleError>,
    },

    /// The working directory could not be changed or restored.
    #[error("cannot change working directory to {path}: {reason}")]
    WorkingDirectory { path: PathBuf, reason: String },

    /// A shared lock was poisoned by a panicking holder.
    #[error("internal lock poisoned: {what}")]
    LockPoisoned { what: &'static str },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {}", code),
        None => "no exit status".to_string(),
    }
}

impl ApplicationError {
    /// Construct an I/O error for `path` with the operation that failed.
    pub fn io(path: impl Into<PathBuf>, operation: &str, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            reason: format!("Failed to {}: {}", operation, err),
        }
    }

    /// Captured command output attached to a build/package failure.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            Self::Build { output, .. } | Self::Package { output, .. } => Some(output),
            Self::StepFailed { cause, .. } => match cause.as_ref() {
                SampleError::Application(inner) => inner.captured_output(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Io { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure no other process holds the workspace".into(),
            ],
            Self::AnchorNotFound {
                path,
                near_miss_line,
                ..
            } => {
                let mut out = vec![format!(
                    "The generated file {} no longer contains the expected marker",
                    path.display()
                )];
                if let Some(line) = near_miss_line {
                    out.push(format!(
                        "Line {} looks similar but differs in whitespace or case",
                        line
                    ));
                }
                out.push(
                    "The scaffold templates may have changed; update the sample anchors".into(),
                );
                out
            }
            Self::Scaffold { subcommand, .. } => vec![
                format!("The scaffold engine failed while running `{}`", subcommand),
                "Check that the scaffolding tool is installed and supports the plugin".into(),
                "Regenerate from a fresh workspace; scaffolding is not idempotent".into(),
            ],
            Self::Build { command, .. } | Self::Package { command, .. } => vec![
                format!("`{}` did not succeed in the generated workspace", command),
                "Ensure the command is installed and in your PATH".into(),
                "Re-run with --skip-verify to inspect the generated sources".into(),
            ],
            Self::Timeout { command, seconds } => vec![
                format!("`{}` ran longer than {}s", command, seconds),
                "Raise the limit with --timeout or disable it in the config".into(),
            ],
            Self::StepFailed { cause, .. } => cause.suggestions(),
            Self::WorkingDirectory { path, .. } => vec![
                format!("Could not enter {}", path.display()),
                "Check the directory exists and is readable".into(),
            ],
            Self::LockPoisoned { .. } => {
                vec!["A previous operation panicked; restart the process".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Io { .. } | Self::WorkingDirectory { .. } | Self::LockPoisoned { .. } => {
                ErrorCategory::Internal
            }
            Self::AnchorNotFound { .. } => ErrorCategory::NotFound,
            Self::Scaffold { .. }
            | Self::Build { .. }
            | Self::Package { .. }
            | Self::Timeout { .. } => ErrorCategory::External,
            Self::StepFailed { cause, .. } => cause.category(),
        }
    }
}
