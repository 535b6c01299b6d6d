use serde::Serialize;

use crate::domain::{
    entities::{
        anchor::AnchorInsertion,
        common::RelativePath,
        scaffold_config::{CreateApiConfig, InitConfig, ScaffoldConfiguration},
        step::{GenerationStep, StepPlan},
    },
    error::DomainError,
    value_objects::CommandSpec,
};

/// A named insertion in a sample's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionEntry {
    pub name: &'static str,
    pub label: &'static str,
    pub insertion: AnchorInsertion,
}

/// Everything needed to generate one sample project, as data.
///
/// The insertion table is applied in order after `init` and `create api`.
#[derive(Debug, Clone)]
pub struct SampleDefinition {
    pub name: String,
    pub description: String,
    /// Workspace location relative to the output root.
    pub workspace_dir: RelativePath,
    pub init: InitConfig,
    pub create_api: CreateApiConfig,
    pub insertions: Vec<InsertionEntry>,
    pub build: CommandSpec,
    pub package: CommandSpec,
}

impl SampleDefinition {
    /// Build the full step plan: scaffold steps first, then insertions.
    pub fn plan(&self) -> Result<StepPlan, DomainError> {
        let mut steps = Vec::with_capacity(self.insertions.len() + 2);
        let init = ScaffoldConfiguration::Init(self.init.clone());
        let create_api = ScaffoldConfiguration::CreateApi(self.create_api.clone());
        steps.push(GenerationStep::scaffold(init));
        steps.push(GenerationStep::scaffold(create_api));
        steps.extend(self.insertions.iter().map(|entry| {
            GenerationStep::insert(entry.name, entry.label, entry.insertion.clone())
        }));
        StepPlan::new(steps)
    }

    pub fn summary(&self) -> SampleSummary {
        SampleSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            workspace_dir: self.workspace_dir.to_string(),
            resource: self.create_api.gvk.to_string(),
            plugin: self.init.plugin.clone(),
            steps: self.insertions.len() + 2,
        }
    }
}

/// Display/serialization view of a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleSummary {
    pub name: String,
    pub description: String,
    pub workspace_dir: String,
    pub resource: String,
    pub plugin: String,
    pub steps: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{entities::step::StepAction, value_objects::GroupVersionKind};

    fn sample() -> SampleDefinition {
        SampleDefinition {
            name: "demo".into(),
            description: "demo sample".into(),
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
                insertion: AnchorInsertion::new("Spec.java", "// here", "x").unwrap(),
            }],
            build: CommandSpec::new("mvn", ["clean", "install"]),
            package: CommandSpec::new("make", ["bundle"]),
        }
    }

    #[test]
    fn plan_puts_scaffold_first() {
        let plan = sample().plan().unwrap();
        assert_eq!(plan.len(), 3);
        assert!(matches!(plan.steps()[0].action(), StepAction::Scaffold(_)));
        assert!(matches!(plan.steps()[1].action(), StepAction::Scaffold(_)));
        assert_eq!(plan.steps()[2].name(), "implement-spec");
    }

    #[test]
    fn summary_counts_all_steps() {
        let s = sample().summary();
        assert_eq!(s.steps, 3);
        assert_eq!(s.resource, "cache/v1, Kind=Demo");
    }
}
