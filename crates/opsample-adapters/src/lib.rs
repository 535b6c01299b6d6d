//! Infrastructure adapters for opsample.
//!
//! This crate implements the ports defined in `opsample-core::application::ports`.
//! It contains all external dependencies and I/O operations, plus the
//! built-in sample catalog.

pub mod command;
pub mod filesystem;
pub mod process_scope;
pub mod samples;
pub mod scaffold;

// Re-export commonly used adapters
pub use command::ProcessRunner;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process_scope::ProcessScope;
pub use samples::SampleCatalog;
pub use scaffold::{BuiltinScaffolder, ExternalScaffolder, InProcessScaffolder};
