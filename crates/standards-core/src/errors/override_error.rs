//! Override errors. Fatal, same as structural validation.

use super::error_code::{self, StandardsErrorCode};

/// Errors applying the overrides document.
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("Overrides parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Override for rule {id} references unknown category '{category}'")]
    UnknownCategory { id: String, category: String },

    #[error("Override for rule {id} has invalid {field}: {message}")]
    InvalidField {
        id: String,
        field: &'static str,
        message: String,
    },
}

impl StandardsErrorCode for OverrideError {
    fn error_code(&self) -> &'static str {
        error_code::OVERRIDE_ERROR
    }

    fn exit_code(&self) -> u8 {
        match self {
            Self::Parse { .. } => error_code::EXIT_INPUT,
            _ => error_code::EXIT_FAILURE,
        }
    }
}
