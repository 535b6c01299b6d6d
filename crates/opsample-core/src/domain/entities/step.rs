use std::collections::HashSet;
use std::fmt;

use crate::domain::{
    entities::{anchor::AnchorInsertion, scaffold_config::ScaffoldConfiguration},
    error::DomainError,
    value_objects::Subcommand,
};

/// What a step does when the pipeline reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Invoke the scaffold engine with a fixed configuration.
    Scaffold(ScaffoldConfiguration),
    /// Splice a payload after an anchor in one workspace file.
    Insert(AnchorInsertion),
}

/// One named, immutable unit of the generation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationStep {
    name: String,
    label: String,
    action: StepAction,
}

impl GenerationStep {
    pub fn new(name: impl Into<String>, label: impl Into<String>, action: StepAction) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            action,
        }
    }

    pub fn scaffold(config: ScaffoldConfiguration) -> Self {
        let sub = config.subcommand();
        Self::new(
            sub.as_str().replace(' ', "-"),
            format!("running the `{}` subcommand", sub),
            StepAction::Scaffold(config),
        )
    }

    pub fn insert(
        name: impl Into<String>,
        label: impl Into<String>,
        insertion: AnchorInsertion,
    ) -> Self {
        Self::new(name, label, StepAction::Insert(insertion))
    }

    /// Stable identifier, unique within a plan.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable progress text.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action(&self) -> &StepAction {
        &self.action
    }
}

impl fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            StepAction::Scaffold(cfg) => write!(f, "{:<28} scaffold {}", self.name, cfg),
            StepAction::Insert(ins) => write!(
                f,
                "{:<28} insert into {} after {:?}",
                self.name,
                ins.file(),
                first_line(ins.anchor())
            ),
        }
    }
}

fn first_line(s: &str) -> &str {
    s.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or(s)
}

/// An ordered, validated sequence of steps.
///
/// Later steps assume the textual state left by earlier ones, so order is
/// part of the plan's identity and is never rearranged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPlan {
    steps: Vec<GenerationStep>,
}

impl StepPlan {
    pub fn new(steps: Vec<GenerationStep>) -> Result<Self, DomainError> {
        let plan = Self { steps };
        plan.validate()?;
        Ok(plan)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.steps.is_empty() {
            return Err(DomainError::EmptyPlan);
        }

        let mut seen = HashSet::new();
        let mut initialized = false;
        for step in &self.steps {
            if !seen.insert(step.name.as_str()) {
                return Err(DomainError::DuplicateStep {
                    name: step.name.clone(),
                });
            }

            match &step.action {
                StepAction::Scaffold(cfg) => {
                    cfg.validate()?;
                    match cfg.subcommand() {
                        Subcommand::Init => initialized = true,
                        Subcommand::CreateApi if !initialized => {
                            return Err(DomainError::StepOrder {
                                step: step.name.clone(),
                                reason: "`create api` requires an earlier `init` step".into(),
                            });
                        }
                        Subcommand::CreateApi => {}
                    }
                }
                StepAction::Insert(ins) => {
                    if ins.anchor().is_empty() {
                        return Err(DomainError::EmptyAnchor {
                            step: step.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    pub fn steps(&self) -> &[GenerationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GenerationStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a StepPlan {
    type Item = &'a GenerationStep;
    type IntoIter = std::slice::Iter<'a, GenerationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::scaffold_config::{CreateApiConfig, InitConfig},
        value_objects::GroupVersionKind,
    };

    fn init_step() -> GenerationStep {
        GenerationStep::scaffold(ScaffoldConfiguration::Init(InitConfig {
            plugin: "quarkus".into(),
            domain: "example.com".into(),
            project_name: "demo".into(),
        }))
    }

    fn api_step() -> GenerationStep {
        GenerationStep::scaffold(ScaffoldConfiguration::CreateApi(CreateApiConfig {
            plugin: "quarkus".into(),
            gvk: GroupVersionKind::new("cache", "v1", "Memcached").unwrap(),
        }))
    }

    fn insert_step(name: &str) -> GenerationStep {
        GenerationStep::insert(
            name,
            format!("doing {name}"),
            AnchorInsertion::new("a.txt", "anchor", "payload").unwrap(),
        )
    }

    #[test]
    fn scaffold_steps_are_named_after_subcommand() {
        assert_eq!(init_step().name(), "init");
        assert_eq!(api_step().name(), "create-api");
        assert_eq!(api_step().label(), "running the `create api` subcommand");
    }

    #[test]
    fn valid_plan_keeps_order() {
        let plan = StepPlan::new(vec![
            init_step(),
            api_step(),
            insert_step("one"),
            insert_step("two"),
        ])
        .unwrap();
        let names: Vec<_> = plan.iter().map(GenerationStep::name).collect();
        assert_eq!(names, ["init", "create-api", "one", "two"]);
    }

    #[test]
    fn empty_plan_rejected() {
        assert_eq!(StepPlan::new(vec![]), Err(DomainError::EmptyPlan));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = StepPlan::new(vec![insert_step("x"), insert_step("x")]).unwrap_err();
        assert_eq!(err, DomainError::DuplicateStep { name: "x".into() });
    }

    #[test]
    fn create_api_before_init_rejected() {
        let err = StepPlan::new(vec![api_step(), init_step()]).unwrap_err();
        assert!(matches!(err, DomainError::StepOrder { .. }));
    }

    #[test]
    fn insert_only_plan_is_valid() {
        assert!(StepPlan::new(vec![insert_step("only")]).is_ok());
    }
}
