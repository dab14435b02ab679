//! Index document errors (load, parse, persist).

use super::error_code::{self, StandardsErrorCode};

/// Errors reading or writing an index snapshot.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Index not found: {path}")]
    NotFound { path: String },

    #[error("Malformed document {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Serialization failed: {0}")]
    Serialize(String),
}

impl StandardsErrorCode for IndexError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::INDEX_NOT_FOUND,
            Self::Malformed { .. } => error_code::INDEX_MALFORMED,
            Self::Io { .. } | Self::Serialize(_) => error_code::INDEX_IO,
        }
    }

    fn exit_code(&self) -> u8 {
        error_code::EXIT_INPUT
    }
}
