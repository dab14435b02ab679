//! Source document errors. Non-fatal: recorded as build warnings.

use super::error_code::{self, StandardsErrorCode};

/// Errors reading a configured source document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Source {path} is unreadable: {message}")]
    Unreadable { path: String, message: String },
}

impl StandardsErrorCode for SourceError {
    fn error_code(&self) -> &'static str {
        error_code::SOURCE_UNREADABLE
    }

    fn exit_code(&self) -> u8 {
        error_code::EXIT_INPUT
    }
}
