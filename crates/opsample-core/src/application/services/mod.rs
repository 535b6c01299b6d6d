//! Application services - orchestrate domain logic through ports.

pub mod generate_service;
pub mod insert_service;
pub mod pipeline_service;
pub mod scaffold_service;
pub mod verify_service;
pub mod workspace_service;

pub use generate_service::{GenerateOptions, GenerationReport, GenerationService};
pub use insert_service::AnchorInserter;
pub use pipeline_service::{PipelineReport, StepPipeline};
pub use scaffold_service::{DEFAULT_PROGRAM, ScaffoldInvoker};
pub use verify_service::Verifier;
pub use workspace_service::{WorkspacePreparer, WorkspaceSnapshot};
