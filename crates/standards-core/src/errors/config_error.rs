//! Configuration errors.

use super::error_code::{self, StandardsErrorCode};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Source {source_path} references unknown category '{category}'")]
    UnknownCategory {
        source_path: String,
        category: String,
    },
}

impl StandardsErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }

    fn exit_code(&self) -> u8 {
        match self {
            Self::FileNotFound { .. } | Self::ParseError { .. } => error_code::EXIT_INPUT,
            _ => error_code::EXIT_FAILURE,
        }
    }
}
