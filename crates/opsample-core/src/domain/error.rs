// ============================================================================
// domain/error.rs - VALIDATION AND SPLICE ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports keep copies of the failing cause)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid value for '{field}': {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    #[error("anchor for step '{step}' is empty")]
    EmptyAnchor { step: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Plan Errors
    // ========================================================================
    #[error("step plan is empty")]
    EmptyPlan,

    #[error("duplicate step name in plan: {name}")]
    DuplicateStep { name: String },

    #[error("step '{step}' is out of order: {reason}")]
    StepOrder { step: String, reason: String },

    // ========================================================================
    // Splice Errors
    // ========================================================================
    /// The anchor text does not occur in the content.
    ///
    /// `near_miss_line` is a 1-based line number where a whitespace- or
    /// case-variant of the anchor's first line was seen. Matching itself is
    /// always exact; this field exists only for diagnostics.
    #[error("anchor not found: {anchor:?}")]
    AnchorNotFound {
        anchor: String,
        near_miss_line: Option<usize>,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("unknown sample '{name}'")]
    UnknownSample {
        name: String,
        available: Vec<String>,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfiguration { field, reason } => vec![
                format!("Check the value of '{}': {}", field, reason),
                "Sample configurations are fixed; this usually means the sample table was edited"
                    .into(),
            ],
            Self::AnchorNotFound {
                near_miss_line: Some(line),
                ..
            } => vec![
                format!(
                    "A similar line exists at line {} but differs in whitespace or case",
                    line
                ),
                "The scaffold templates probably changed; update the anchor to match exactly"
                    .into(),
            ],
            Self::AnchorNotFound { .. } => vec![
                "The generated file no longer contains this marker".into(),
                "Check that the scaffold engine still produces the expected template".into(),
            ],
            Self::UnknownSample { available, .. } => {
                let mut out = vec!["Available samples:".to_string()];
                out.extend(available.iter().map(|name| format!("  • {}", name)));
                out.push("Try: opsample list".into());
                out
            }
            Self::DuplicateStep { .. } | Self::StepOrder { .. } | Self::EmptyPlan => {
                vec!["The sample step table is inconsistent; this is a bug in the sample".into()]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfiguration { .. }
            | Self::EmptyAnchor { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Validation,
            Self::EmptyPlan | Self::DuplicateStep { .. } | Self::StepOrder { .. } => {
                ErrorCategory::Internal
            }
            Self::AnchorNotFound { .. } | Self::UnknownSample { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
