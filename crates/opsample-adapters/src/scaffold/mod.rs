//! Scaffold engine adapters.

mod builtin;
mod external;
mod in_process;
pub mod quarkus_templates;

pub use builtin::{BuiltinScaffolder, PROGRAM as BUILTIN_PROGRAM};
pub use external::{DEFAULT_BINARY, ExternalScaffolder};
pub use in_process::InProcessScaffolder;
