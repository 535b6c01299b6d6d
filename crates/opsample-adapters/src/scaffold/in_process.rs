//! Scaffold engine for entry points that read the ambient working directory.

use opsample_core::{
    application::{ApplicationError, ExecutionContext, ports::ScaffoldEngine},
    error::{SampleError, SampleResult},
};
use tracing::instrument;

use crate::process_scope::ProcessScope;

type EntryPoint = dyn Fn(&[String]) -> SampleResult<()> + Send + Sync;

/// Runs an in-process entry point inside the context's working directory.
///
/// The entry point receives the full argument vector and resolves relative
/// paths against the process working directory, which is held at
/// `ctx.working_dir()` for the duration of the call.
pub struct InProcessScaffolder {
    name: String,
    entry: Box<EntryPoint>,
}

impl InProcessScaffolder {
    pub fn new<F>(name: impl Into<String>, entry: F) -> Self
    where
        F: Fn(&[String]) -> SampleResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            entry: Box::new(entry),
        }
    }
}

impl ScaffoldEngine for InProcessScaffolder {
    #[instrument(skip_all, fields(engine = %self.name, dir = %ctx.working_dir().display()))]
    fn run(&self, ctx: &ExecutionContext) -> SampleResult<()> {
        let _scope = ProcessScope::enter(ctx.working_dir())?;
        (self.entry)(ctx.args()).map_err(|e| match e {
            SampleError::Application(ApplicationError::Scaffold { .. }) => e,
            other => ApplicationError::Scaffold {
                subcommand: ctx.subcommand(),
                reason: other.to_string(),
            }
            .into(),
        })
    }
}
