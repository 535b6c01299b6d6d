//! Generation Service - end-to-end generation of one sample.
//!
//! Prepare workspace, run the step plan, then optionally verify the result
//! with the sample's build and packaging commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{CommandRunner, Filesystem, ScaffoldEngine},
        services::{
            insert_service::AnchorInserter,
            pipeline_service::StepPipeline,
            scaffold_service::{DEFAULT_PROGRAM, ScaffoldInvoker},
            verify_service::Verifier,
            workspace_service::WorkspacePreparer,
        },
    },
    domain::{CommandSpec, DomainValidator, SampleDefinition, StepPlan},
    error::SampleResult,
};

/// Knobs for a single generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Stop after the last insertion.
    pub skip_verify: bool,
    /// Put back the previous workspace if anything fails.
    pub keep_previous_on_failure: bool,
    /// Limit for each verification command.
    pub timeout: Option<Duration>,
    /// Override the sample's build command.
    pub build: Option<CommandSpec>,
    /// Override the sample's packaging command.
    pub package: Option<CommandSpec>,
}

/// Outcome of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub sample: String,
    pub workspace: PathBuf,
    pub steps: Vec<String>,
    pub verified: bool,
}

/// Drives a sample definition to a finished workspace.
pub struct GenerationService {
    fs: Arc<dyn Filesystem>,
    engine: Arc<dyn ScaffoldEngine>,
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl GenerationService {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        engine: Arc<dyn ScaffoldEngine>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            fs,
            engine,
            runner,
            program: DEFAULT_PROGRAM.to_string(),
        }
    }

    /// Program name handed to the scaffold engine as argv[0].
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// The validated plan a sample would execute, without touching disk.
    pub fn plan(&self, sample: &SampleDefinition) -> SampleResult<StepPlan> {
        Ok(DomainValidator::validate_sample(sample)?)
    }

    /// Where `sample` is generated under `output_root`.
    pub fn workspace_for(&self, sample: &SampleDefinition, output_root: &Path) -> PathBuf {
        sample.workspace_dir.under(output_root)
    }

    #[instrument(skip_all, fields(sample = %sample.name))]
    pub fn generate(
        &self,
        sample: &SampleDefinition,
        output_root: &Path,
        options: &GenerateOptions,
    ) -> SampleResult<GenerationReport> {
        let plan = self.plan(sample)?;
        let workspace = self.workspace_for(sample, output_root);
        let preparer = WorkspacePreparer::new(self.fs.clone());

        let snapshot = if options.keep_previous_on_failure {
            preparer.snapshot(&workspace)?
        } else {
            None
        };

        let result = self.execute(sample, &plan, &workspace, &preparer, options);

        if let (Err(e), Some(snapshot)) = (&result, snapshot) {
            warn!(
                error = %e,
                dir = %snapshot.root().display(),
                files = snapshot.file_count(),
                "Generation failed, restoring previous workspace"
            );
            if let Err(restore_err) = preparer.restore(&snapshot) {
                warn!(error = %restore_err, "Could not restore previous workspace");
            }
        }

        result
    }

    fn execute(
        &self,
        sample: &SampleDefinition,
        plan: &StepPlan,
        workspace: &Path,
        preparer: &WorkspacePreparer,
        options: &GenerateOptions,
    ) -> SampleResult<GenerationReport> {
        preparer.prepare(workspace)?;

        let pipeline = StepPipeline::new(
            AnchorInserter::new(self.fs.clone()),
            ScaffoldInvoker::new(self.engine.clone()).with_program(self.program.clone()),
        );
        let report = pipeline.run(workspace, plan)?;

        let verified = if options.skip_verify {
            info!("Skipping build verification");
            false
        } else {
            let build = options
                .build
                .clone()
                .unwrap_or_else(|| sample.build.clone());
            let package = options
                .package
                .clone()
                .unwrap_or_else(|| sample.package.clone());
            Verifier::new(self.runner.clone(), build, package)
                .with_timeout(options.timeout)
                .verify(workspace)?;
            true
        };

        info!(workspace = %workspace.display(), "Sample generated");
        Ok(GenerationReport {
            sample: sample.name.clone(),
            workspace: report.workspace,
            steps: report.completed,
            verified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError, ExecutionContext,
        ports::{CommandOutput, MockCommandRunner},
        services::test_support::FakeFs,
    };
    use crate::domain::{
        AnchorInsertion, CreateApiConfig, GroupVersionKind, InitConfig, InsertionEntry,
        RelativePath,
    };
    use crate::error::SampleError;

    /// Writes one file containing the anchor on `init`.
    struct TouchEngine {
        fs: Arc<FakeFs>,
    }

    impl ScaffoldEngine for TouchEngine {
        fn run(&self, ctx: &ExecutionContext) -> SampleResult<()> {
            if ctx.arguments().first().map(String::as_str) == Some("init") {
                self.fs.write_file(
                    &ctx.working_dir().join("Spec.java"),
                    "class Spec {\n// Add Spec information here\n}\n",
                )?;
            }
            Ok(())
        }
    }

    fn sample() -> SampleDefinition {
        SampleDefinition {
            name: "demo".into(),
            description: "demo".into(),
            workspace_dir: RelativePath::from_segments("quarkus/demo").unwrap(),
            init: InitConfig {
                plugin: "quarkus".into(),
                domain: "example.com".into(),
                project_name: "demo".into(),
            },
            create_api: CreateApiConfig {
                plugin: "quarkus".into(),
                gvk: GroupVersionKind::new("cache", "v1", "Demo").unwrap(),
            },
            insertions: vec![InsertionEntry {
                name: "implement-spec",
                label: "implementing spec",
                insertion: AnchorInsertion::new(
                    "Spec.java",
                    "// Add Spec information here",
                    "\n    private Integer size;",
                )
                .unwrap(),
            }],
            build: CommandSpec::new("mvn", ["clean", "install"]),
            package: CommandSpec::new("make", ["bundle"]),
        }
    }

    fn service(fs: Arc<FakeFs>, runner: MockCommandRunner) -> GenerationService {
        GenerationService::new(fs.clone(), Arc::new(TouchEngine { fs }), Arc::new(runner))
    }

    #[test]
    fn skip_verify_generates_without_running_commands() {
        let fs = Arc::new(FakeFs::default());
        fs.seed("/out/quarkus/demo/leftover.txt", "old");
        let mut runner = MockCommandRunner::new();
        runner.expect_run().times(0);

        let options = GenerateOptions {
            skip_verify: true,
            ..Default::default()
        };
        let report = service(fs.clone(), runner)
            .generate(&sample(), Path::new("/out"), &options)
            .unwrap();

        assert!(!report.verified);
        assert_eq!(report.steps, ["init", "create-api", "implement-spec"]);
        assert_eq!(report.workspace, PathBuf::from("/out/quarkus/demo"));
        assert!(!fs.exists(Path::new("/out/quarkus/demo/leftover.txt")));
        assert_eq!(
            fs.read_to_string(Path::new("/out/quarkus/demo/Spec.java"))
                .unwrap(),
            "class Spec {\n// Add Spec information here\n    private Integer size;\n}\n"
        );
    }

    #[test]
    fn verification_uses_overrides() {
        let fs = Arc::new(FakeFs::default());
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|cmd, ctx| {
                (cmd.program() == "true" || cmd.program() == "make")
                    && ctx.working_dir() == Path::new("/out/quarkus/demo")
            })
            .times(2)
            .returning(|_, _| {
                Ok(CommandOutput {
                    status: Some(0),
                    combined: String::new(),
                })
            });

        let options = GenerateOptions {
            build: Some(CommandSpec::new("true", Vec::<String>::new())),
            ..Default::default()
        };
        let report = service(fs, runner)
            .generate(&sample(), Path::new("/out"), &options)
            .unwrap();
        assert!(report.verified);
    }

    #[test]
    fn failure_restores_previous_workspace_when_asked() {
        let fs = Arc::new(FakeFs::default());
        fs.seed("/out/quarkus/demo/keep.txt", "previous run");
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| {
            Ok(CommandOutput {
                status: Some(1),
                combined: "BUILD FAILURE".into(),
            })
        });

        let options = GenerateOptions {
            keep_previous_on_failure: true,
            ..Default::default()
        };
        let err = service(fs.clone(), runner)
            .generate(&sample(), Path::new("/out"), &options)
            .unwrap_err();

        assert!(matches!(
            err,
            SampleError::Application(ApplicationError::Build { .. })
        ));
        assert_eq!(
            fs.read_to_string(Path::new("/out/quarkus/demo/keep.txt"))
                .unwrap(),
            "previous run"
        );
        assert!(!fs.exists(Path::new("/out/quarkus/demo/Spec.java")));
    }

    #[test]
    fn failure_without_snapshot_leaves_partial_workspace() {
        let fs = Arc::new(FakeFs::default());
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| {
            Ok(CommandOutput {
                status: Some(1),
                combined: String::new(),
            })
        });

        let result = service(fs.clone(), runner).generate(
            &sample(),
            Path::new("/out"),
            &GenerateOptions::default(),
        );
        assert!(result.is_err());
        assert!(fs.exists(Path::new("/out/quarkus/demo/Spec.java")));
    }
}
