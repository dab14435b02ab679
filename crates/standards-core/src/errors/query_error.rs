//! Query errors for list/show/grep.

use super::error_code::{self, StandardsErrorCode};

/// Errors evaluating an index query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid severity filter: {0}")]
    InvalidSeverity(String),

    #[error("Invalid filter {field}: {message}")]
    InvalidFilter { field: &'static str, message: String },

    #[error("Rule not found: {0}")]
    RuleNotFound(String),
}

impl StandardsErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::RuleNotFound(_) => error_code::RULE_NOT_FOUND,
            _ => error_code::INVALID_FILTER,
        }
    }

    fn exit_code(&self) -> u8 {
        match self {
            Self::RuleNotFound(_) => error_code::EXIT_NOT_FOUND,
            _ => error_code::EXIT_FAILURE,
        }
    }
}
