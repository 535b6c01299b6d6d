//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `opsample-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ScaffoldEngine`: Project skeleton generation
//!   - `CommandRunner`: External build and packaging commands

pub mod output;

pub use output::{CommandOutput, CommandRunner, Filesystem, ScaffoldEngine};

#[cfg(test)]
pub use output::{MockCommandRunner, MockFilesystem, MockScaffoldEngine};
