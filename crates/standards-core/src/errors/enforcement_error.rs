//! Enforcement errors. Findings are not errors; these cover bad check definitions.

use super::error_code::{self, StandardsErrorCode};

/// Errors preparing or running enforcement checks.
#[derive(Debug, thiserror::Error)]
pub enum EnforcementError {
    #[error("Invalid check for rule {rule_id}: {message}")]
    InvalidCheck { rule_id: String, message: String },

    #[error("Checks file error in {path}: {message}")]
    ChecksFile { path: String, message: String },

    #[error("Invalid applies_to glob for rule {rule_id}: {message}")]
    InvalidGlob { rule_id: String, message: String },

    #[error("Report error in {path}: {message}")]
    Report { path: String, message: String },
}

impl StandardsErrorCode for EnforcementError {
    fn error_code(&self) -> &'static str {
        error_code::ENFORCEMENT_ERROR
    }

    fn exit_code(&self) -> u8 {
        match self {
            Self::ChecksFile { .. } | Self::Report { .. } => error_code::EXIT_INPUT,
            _ => error_code::EXIT_FAILURE,
        }
    }
}
