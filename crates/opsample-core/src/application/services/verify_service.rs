//! Verify Service - build and package the generated project.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use crate::{
    application::{ApplicationError, ExecutionContext, ports::CommandRunner},
    domain::CommandSpec,
    error::{SampleError, SampleResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Build,
    Package,
}

impl Stage {
    fn failure(
        self,
        command: &CommandSpec,
        status: Option<i32>,
        output: String,
    ) -> ApplicationError {
        let command = command.to_string();
        match self {
            Self::Build => ApplicationError::Build {
                command,
                status,
                output,
            },
            Self::Package => ApplicationError::Package {
                command,
                status,
                output,
            },
        }
    }
}

/// Runs the build then the packaging command inside a workspace.
pub struct Verifier {
    runner: Arc<dyn CommandRunner>,
    build: CommandSpec,
    package: CommandSpec,
    timeout: Option<Duration>,
}

impl Verifier {
    pub fn new(runner: Arc<dyn CommandRunner>, build: CommandSpec, package: CommandSpec) -> Self {
        Self {
            runner,
            build,
            package,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Packaging only runs once the build has succeeded.
    #[instrument(skip_all, fields(workspace = %workspace.display()))]
    pub fn verify(&self, workspace: &Path) -> SampleResult<()> {
        self.run_stage(Stage::Build, &self.build, workspace)?;
        self.run_stage(Stage::Package, &self.package, workspace)
    }

    fn run_stage(&self, stage: Stage, command: &CommandSpec, workspace: &Path) -> SampleResult<()> {
        info!("Running `{}`", command);
        let ctx = ExecutionContext::new(workspace).with_timeout(self.timeout);

        match self.runner.run(command, &ctx) {
            Ok(out) if out.success() => Ok(()),
            Ok(out) => {
                warn!(command = %command, status = ?out.status, "Command failed");
                Err(stage.failure(command, out.status, out.combined).into())
            }
            Err(e @ SampleError::Application(ApplicationError::Timeout { .. })) => Err(e),
            Err(e) => Err(stage.failure(command, None, e.to_string()).into()),
        }
    }
}
