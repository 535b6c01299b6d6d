//! Root error type of the core crate.
//!
//! Domain errors come from pure validation and splicing; application errors
//! come from running the pipeline against ports. Callers match on
//! [`SampleError::category`] rather than on individual variants.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, ErrorCategory as DomainCategory};

#[derive(Debug, Error, Clone)]
pub enum SampleError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl SampleError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                DomainCategory::Validation => ErrorCategory::Validation,
                DomainCategory::NotFound => ErrorCategory::NotFound,
                DomainCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Name of the pipeline step that failed, if the error came from one.
    pub fn failed_step(&self) -> Option<&str> {
        match self {
            Self::Application(ApplicationError::StepFailed { step, .. }) => Some(step),
            _ => None,
        }
    }

    /// Innermost cause, unwrapping step wrappers.
    pub fn root_cause(&self) -> &SampleError {
        match self {
            Self::Application(ApplicationError::StepFailed { cause, .. }) => cause.root_cause(),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    /// A scaffold engine, build or packaging command failed.
    External,
    Internal,
}

pub type SampleResult<T> = Result<T, SampleError>;
