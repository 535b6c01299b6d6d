//! Scaffold Service - drive the scaffold engine with fixed configurations.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{ApplicationError, ExecutionContext, ports::ScaffoldEngine},
    domain::{CreateApiConfig, DomainValidator, InitConfig, ScaffoldConfiguration},
    error::{SampleError, SampleResult},
};

/// Program name placed first in synthetic argument vectors.
pub const DEFAULT_PROGRAM: &str = "operator-sdk";

/// Turns scaffold configurations into engine invocations.
pub struct ScaffoldInvoker {
    engine: Arc<dyn ScaffoldEngine>,
    program: String,
}

impl ScaffoldInvoker {
    pub fn new(engine: Arc<dyn ScaffoldEngine>) -> Self {
        Self {
            engine,
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn run_init(&self, workspace: &Path, config: &InitConfig) -> SampleResult<()> {
        self.run(workspace, &ScaffoldConfiguration::Init(config.clone()))
    }

    pub fn run_create_api(&self, workspace: &Path, config: &CreateApiConfig) -> SampleResult<()> {
        self.run(workspace, &ScaffoldConfiguration::CreateApi(config.clone()))
    }

    /// Validate `config`, then run the engine inside `workspace`.
    #[instrument(skip_all, fields(subcommand = %config.subcommand()))]
    pub fn run(&self, workspace: &Path, config: &ScaffoldConfiguration) -> SampleResult<()> {
        DomainValidator::validate_configuration(config)?;

        let args = config.to_args(&self.program);
        info!(args = ?args, "Setting scaffold arguments");

        let ctx = ExecutionContext::new(workspace).with_args(args);
        self.engine.run(&ctx).map_err(|e| match e {
            SampleError::Application(ApplicationError::Scaffold { .. }) => e,
            other => ApplicationError::Scaffold {
                subcommand: config.subcommand().to_string(),
                reason: other.to_string(),
            }
            .into(),
        })
    }
}
