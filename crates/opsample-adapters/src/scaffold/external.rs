//! Scaffold engine that shells out to a scaffolding binary.

use std::path::PathBuf;
use std::sync::Arc;

use opsample_core::{
    application::{
        ApplicationError, ExecutionContext,
        ports::{CommandRunner, ScaffoldEngine},
    },
    domain::CommandSpec,
    error::SampleResult,
};
use tracing::{info, instrument};

/// Default scaffolding binary.
pub const DEFAULT_BINARY: &str = "operator-sdk";

/// Runs `<binary> <args...>` with the workspace as current directory.
///
/// argv[0] of the context is replaced by the configured binary.
pub struct ExternalScaffolder {
    binary: PathBuf,
    runner: Arc<dyn CommandRunner>,
}

impl ExternalScaffolder {
    pub fn new(binary: impl Into<PathBuf>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }
}

impl ScaffoldEngine for ExternalScaffolder {
    #[instrument(skip_all, fields(binary = %self.binary.display()))]
    fn run(&self, ctx: &ExecutionContext) -> SampleResult<()> {
        let command = CommandSpec::new(
            self.binary.to_string_lossy(),
            ctx.arguments().iter().cloned(),
        );
        info!("Running `{}`", command);

        let output = self
            .runner
            .run(&command, ctx)
            .map_err(|e| ApplicationError::Scaffold {
                subcommand: ctx.subcommand(),
                reason: e.to_string(),
            })?;

        if output.success() {
            Ok(())
        } else {
            Err(ApplicationError::Scaffold {
                subcommand: ctx.subcommand(),
                reason: format!(
                    "`{}` exited with {:?}: {}",
                    command,
                    output.status,
                    output.combined.trim()
                ),
            }
            .into())
        }
    }
}
