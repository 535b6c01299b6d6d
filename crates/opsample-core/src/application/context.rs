//! Explicit execution context for external invocations.
//!
//! Scaffold engines and command runners receive the working directory and
//! argument vector as a value instead of reading process-global state.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where and how an external collaborator should run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    working_dir: PathBuf,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl ExecutionContext {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    /// Full argument vector, program name first.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Arguments after the program name.
    pub fn arguments(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }

    /// Leading non-flag arguments, e.g. `"create api"` for
    /// `cli create api --group cache`.
    pub fn subcommand(&self) -> String {
        self.arguments()
            .iter()
            .take_while(|a| !a.starts_with('-'))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_skip_program() {
        let ctx = ExecutionContext::new("/ws").with_args(vec!["cli".into(), "init".into()]);
        assert_eq!(ctx.arguments(), &["init".to_string()]);
        assert_eq!(ExecutionContext::new("/ws").arguments().len(), 0);
    }

    #[test]
    fn subcommand_stops_at_first_flag() {
        let args = argv(&["cli", "create", "api", "--group", "cache", "--version", "v1"]);
        let ctx = ExecutionContext::new("/ws").with_args(args);
        assert_eq!(ctx.subcommand(), "create api");

        let ctx = ExecutionContext::new("/ws").with_args(argv(&["cli", "init", "--plugins"]));
        assert_eq!(ctx.subcommand(), "init");
        assert_eq!(ExecutionContext::new("/ws").subcommand(), "");
    }

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }
}
