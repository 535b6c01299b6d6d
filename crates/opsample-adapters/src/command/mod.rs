//! External command adapters.

mod process;

pub use process::ProcessRunner;
