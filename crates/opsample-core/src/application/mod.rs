//! Application layer for opsample.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerationService, StepPipeline)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Context**: The explicit working directory / argument vector handed to
//!   external collaborators
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. The splice rule and plan validation live in
//! `crate::domain`.

pub mod context;
pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AnchorInserter, GenerateOptions, GenerationReport, GenerationService, PipelineReport,
    ScaffoldInvoker, StepPipeline, Verifier, WorkspacePreparer, WorkspaceSnapshot,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandOutput, CommandRunner, Filesystem, ScaffoldEngine};

pub use context::ExecutionContext;
pub use error::ApplicationError;
