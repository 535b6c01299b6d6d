//! Pipeline Service - execute a step plan in order, stopping at the first
//! failure.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        services::{insert_service::AnchorInserter, scaffold_service::ScaffoldInvoker},
    },
    domain::{StepAction, StepPlan},
    error::SampleResult,
};

/// What a successful pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub workspace: PathBuf,
    /// Step names in execution order.
    pub completed: Vec<String>,
}

pub struct StepPipeline {
    inserter: AnchorInserter,
    invoker: ScaffoldInvoker,
}

impl StepPipeline {
    pub fn new(inserter: AnchorInserter, invoker: ScaffoldInvoker) -> Self {
        Self { inserter, invoker }
    }

    /// Run every step of `plan` against `workspace`.
    ///
    /// A failure is returned as `StepFailed` carrying the 1-based index and
    /// name of the step. Steps after it never run and nothing is rolled back.
    #[instrument(skip_all, fields(workspace = %workspace.display(), steps = plan.len()))]
    pub fn run(&self, workspace: &Path, plan: &StepPlan) -> SampleResult<PipelineReport> {
        let mut completed = Vec::with_capacity(plan.len());

        for (i, step) in plan.iter().enumerate() {
            info!(step = step.name(), "{}", step.label());

            let outcome = match step.action() {
                StepAction::Scaffold(config) => self.invoker.run(workspace, config),
                StepAction::Insert(insertion) => self.inserter.apply(workspace, insertion),
            };

            if let Err(cause) = outcome {
                warn!(step = step.name(), error = %cause, "Step failed");
                return Err(ApplicationError::StepFailed {
                    index: i + 1,
                    step: step.name().to_string(),
                    label: step.label().to_string(),
                    cause: Box::new(cause),
                }
                .into());
            }

            completed.push(step.name().to_string());
        }

        Ok(PipelineReport {
            workspace: workspace.to_path_buf(),
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{Filesystem, MockScaffoldEngine};
    use crate::application::services::test_support::FakeFs;
    use crate::domain::{
        AnchorInsertion, GenerationStep, InitConfig, ScaffoldConfiguration,
    };
    use crate::error::SampleError;
    use std::sync::Arc;

    fn pipeline(fs: Arc<FakeFs>, engine: MockScaffoldEngine) -> StepPipeline {
        StepPipeline::new(
            AnchorInserter::new(fs),
            ScaffoldInvoker::new(Arc::new(engine)),
        )
    }

    fn insert(name: &str, anchor: &str, payload: &str) -> GenerationStep {
        GenerationStep::insert(
            name,
            format!("applying {name}"),
            AnchorInsertion::new("Main.java", anchor, payload).unwrap(),
        )
    }

    #[test]
    fn later_steps_see_earlier_edits() {
        let fs = Arc::new(FakeFs::default());
        fs.seed("/ws/Main.java", "class Main {\n// A\n}\n");

        let plan = StepPlan::new(vec![
            insert("first", "// A", "\n// B"),
            insert("second", "// B", "\nint x;"),
        ])
        .unwrap();

        let report = pipeline(fs.clone(), MockScaffoldEngine::new())
            .run(Path::new("/ws"), &plan)
            .unwrap();

        assert_eq!(report.completed, ["first", "second"]);
        assert_eq!(
            fs.read_to_string(Path::new("/ws/Main.java")).unwrap(),
            "class Main {\n// A\n// B\nint x;\n}\n"
        );
    }

    #[test]
    fn stops_at_first_failure_and_reports_index() {
        let fs = Arc::new(FakeFs::default());
        fs.seed("/ws/Main.java", "// A\n");

        let plan = StepPlan::new(vec![
            insert("first", "// A", "\n// B"),
            insert("missing", "// nowhere", "x"),
            insert("third", "// B", "\nnever"),
        ])
        .unwrap();

        let err = pipeline(fs.clone(), MockScaffoldEngine::new())
            .run(Path::new("/ws"), &plan)
            .unwrap_err();

        match &err {
            SampleError::Application(ApplicationError::StepFailed { index, step, .. }) => {
                assert_eq!(*index, 2);
                assert_eq!(step, "missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            err.root_cause(),
            SampleError::Application(ApplicationError::AnchorNotFound { .. })
        ));
        // first step stays applied, third never ran
        assert_eq!(
            fs.read_to_string(Path::new("/ws/Main.java")).unwrap(),
            "// A\n// B\n"
        );
    }

    #[test]
    fn scaffold_steps_go_to_engine() {
        let fs = Arc::new(FakeFs::default());
        let mut engine = MockScaffoldEngine::new();
        engine
            .expect_run()
            .withf(|ctx| ctx.arguments().first().map(String::as_str) == Some("init"))
            .times(1)
            .returning(|_| Ok(()));

        let plan = StepPlan::new(vec![GenerationStep::scaffold(ScaffoldConfiguration::Init(
            InitConfig {
                plugin: "quarkus".into(),
                domain: "example.com".into(),
                project_name: "demo".into(),
            },
        ))])
        .unwrap();

        let report = pipeline(fs, engine).run(Path::new("/ws"), &plan).unwrap();
        assert_eq!(report.completed, ["init"]);
    }
}
