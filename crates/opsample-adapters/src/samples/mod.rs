//! Built-in sample definitions.
//!
//! Each sample is pure data: scaffold configurations, an ordered insertion
//! table and the commands that verify the result.

pub mod memcached;

use opsample_core::{
    domain::{DomainError, SampleDefinition, SampleSummary},
    error::SampleResult,
};
use tracing::debug;

/// Named lookup over the samples shipped with opsample.
#[derive(Debug, Clone)]
pub struct SampleCatalog {
    samples: Vec<SampleDefinition>,
}

impl SampleCatalog {
    pub fn new(samples: Vec<SampleDefinition>) -> Self {
        Self { samples }
    }

    /// Catalog of every bundled sample.
    pub fn builtin() -> SampleResult<Self> {
        let samples = vec![memcached::definition()?];
        debug!(count = samples.len(), "Loaded built-in samples");
        Ok(Self::new(samples))
    }

    pub fn list(&self) -> &[SampleDefinition] {
        &self.samples
    }

    pub fn summaries(&self) -> Vec<SampleSummary> {
        self.samples.iter().map(SampleDefinition::summary).collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.samples.iter().map(|s| s.name.clone()).collect()
    }

    pub fn find(&self, name: &str) -> Result<&SampleDefinition, DomainError> {
        self.samples
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| DomainError::UnknownSample {
                name: name.to_string(),
                available: self.names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_contains_memcached() {
        let catalog = SampleCatalog::builtin().unwrap();
        assert_eq!(catalog.names(), ["memcached"]);
        assert_eq!(catalog.find("memcached").unwrap().name, "memcached");
    }

    #[test]
    fn unknown_sample_lists_available() {
        let catalog = SampleCatalog::builtin().unwrap();
        match catalog.find("redis") {
            Err(DomainError::UnknownSample { name, available }) => {
                assert_eq!(name, "redis");
                assert_eq!(available, ["memcached"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn summaries_describe_resource() {
        let catalog = SampleCatalog::builtin().unwrap();
        let summary = &catalog.summaries()[0];
        assert_eq!(summary.resource, "cache/v1, Kind=Memcached");
        assert_eq!(summary.plugin, "quarkus");
        assert_eq!(summary.steps, 9);
    }
}
