// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for opsample.
//!
//! This module contains pure logic with no I/O. Filesystem access, scaffold
//! engines and subprocesses are reached through ports defined in the
//! application layer.
//!
//! ## What lives here
//!
//! - **Value objects**: `Subcommand`, `GroupVersionKind`, `CommandSpec`
//! - **Entities**: scaffold configurations, anchor insertions, steps, plans,
//!   sample definitions
//! - **The splice algorithm**: `splice_after_anchor`
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    AnchorInsertion, CreateApiConfig, GenerationStep, InitConfig, InsertionEntry,
    SampleDefinition, SampleSummary, ScaffoldConfiguration, Spliced, StepAction, StepPlan,
    common::RelativePath, splice_after_anchor,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{CommandSpec, GroupVersionKind, Subcommand};

pub use validation::DomainValidator;
