use crate::domain::{
    entities::{SampleDefinition, ScaffoldConfiguration, StepPlan},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_configuration(config: &ScaffoldConfiguration) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_plan(plan: &StepPlan) -> Result<(), DomainError> {
        plan.validate()
    }

    /// A sample is valid when its derived plan is.
    pub fn validate_sample(sample: &SampleDefinition) -> Result<StepPlan, DomainError> {
        sample.plan()
    }
}
