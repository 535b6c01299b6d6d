pub mod anchor;
pub mod common;
pub mod sample;
pub mod scaffold_config;
pub mod step;

pub use anchor::{AnchorInsertion, Spliced, splice_after_anchor};
pub use sample::{InsertionEntry, SampleDefinition, SampleSummary};
pub use scaffold_config::{CreateApiConfig, InitConfig, ScaffoldConfiguration};
pub use step::{GenerationStep, StepAction, StepPlan};
