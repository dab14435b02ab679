//! Structural validation errors. Fatal: the build aborts before any write.

use std::fmt;

use super::error_code::{self, StandardsErrorCode};

/// A single structural problem, naming the offending rule id and field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    DuplicateId { id: String },
    UnknownCategory { id: String, category: String },
    EmptyCategories { id: String },
    MissingSupersededBy { id: String },
    InvalidSupersededBy { id: String, target: String },
    EmptyAppliesTo { id: String },
    InvalidSeverity { id: String, value: String },
    MalformedId { id: String },
    EmptyExamples { id: String },
    MissingField { id: String, field: &'static str },
}

impl ValidationIssue {
    /// The rule id this issue refers to.
    pub fn rule_id(&self) -> &str {
        match self {
            Self::DuplicateId { id }
            | Self::UnknownCategory { id, .. }
            | Self::EmptyCategories { id }
            | Self::MissingSupersededBy { id }
            | Self::InvalidSupersededBy { id, .. }
            | Self::EmptyAppliesTo { id }
            | Self::InvalidSeverity { id, .. }
            | Self::MalformedId { id }
            | Self::EmptyExamples { id }
            | Self::MissingField { id, .. } => id,
        }
    }

    /// The rule field this issue refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::DuplicateId { .. } | Self::MalformedId { .. } => "id",
            Self::UnknownCategory { .. } | Self::EmptyCategories { .. } => "category_ids",
            Self::MissingSupersededBy { .. } | Self::InvalidSupersededBy { .. } => "superseded_by",
            Self::EmptyAppliesTo { .. } => "applies_to",
            Self::InvalidSeverity { .. } => "severity",
            Self::EmptyExamples { .. } => "examples",
            Self::MissingField { field, .. } => field,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "rule {id}: duplicate id"),
            Self::UnknownCategory { id, category } => {
                write!(f, "rule {id}: category_ids references unknown category '{category}'")
            }
            Self::EmptyCategories { id } => write!(f, "rule {id}: category_ids is empty"),
            Self::MissingSupersededBy { id } => {
                write!(f, "rule {id}: deprecated without superseded_by")
            }
            Self::InvalidSupersededBy { id, target } => write!(
                f,
                "rule {id}: superseded_by '{target}' is neither an existing rule id nor a reserved placeholder"
            ),
            Self::EmptyAppliesTo { id } => write!(f, "rule {id}: applies_to is empty"),
            Self::InvalidSeverity { id, value } => {
                write!(f, "rule {id}: invalid severity '{value}'")
            }
            Self::MalformedId { id } => write!(f, "rule {id}: id does not match the id pattern"),
            Self::EmptyExamples { id } => {
                write!(f, "rule {id}: examples present but has neither bad nor good")
            }
            Self::MissingField { id, field } => write!(f, "rule {id}: missing field {field}"),
        }
    }
}

/// Aggregated validation failure.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{} validation issue(s):\n{}", .issues.len(), render_issues(.issues))]
    Failed { issues: Vec<ValidationIssue> },
}

impl ValidationError {
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Failed { issues } => issues,
        }
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl StandardsErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_FAILED
    }
}
