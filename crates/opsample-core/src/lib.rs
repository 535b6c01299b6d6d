//! Opsample Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the operator
//! sample generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           opsample-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (GenerationService, StepPipeline, ...) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, ScaffoldEngine, Commands)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     opsample-adapters (Infrastructure)  │
//! │ (LocalFilesystem, BuiltinScaffolder...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (AnchorInsertion, StepPlan, Sample)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use opsample_core::application::{GenerateOptions, GenerationService};
//!
//! # fn demo(
//! #     fs: std::sync::Arc<dyn opsample_core::application::Filesystem>,
//! #     engine: std::sync::Arc<dyn opsample_core::application::ScaffoldEngine>,
//! #     runner: std::sync::Arc<dyn opsample_core::application::CommandRunner>,
//! #     sample: &opsample_core::domain::SampleDefinition,
//! # ) -> opsample_core::error::SampleResult<()> {
//! let service = GenerationService::new(fs, engine, runner);
//! let report = service.generate(sample, Path::new("testdata"), &GenerateOptions::default())?;
//! println!("generated {}", report.workspace.display());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ExecutionContext, GenerateOptions, GenerationReport, GenerationService,
        ports::{CommandOutput, CommandRunner, Filesystem, ScaffoldEngine},
    };
    pub use crate::domain::{
        AnchorInsertion, CommandSpec, CreateApiConfig, GenerationStep, GroupVersionKind,
        InitConfig, InsertionEntry, RelativePath, SampleDefinition, SampleSummary,
        ScaffoldConfiguration, StepAction, StepPlan, splice_after_anchor,
    };
    pub use crate::error::{SampleError, SampleResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
