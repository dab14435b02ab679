//! Command-level errors. Subsystem errors keep their own codes.

use standards_core::errors::error_code::{self, StandardsErrorCode};
use standards_core::errors::{
    BuildError, ConfigError, EnforcementError, IndexError, MetricsError, QueryError,
};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Enforcement(#[from] EnforcementError),

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("Invalid {name}: {message}")]
    Usage { name: &'static str, message: String },

    #[error("Cannot write {path}: {message}")]
    Output { path: String, message: String },

    #[error("Cannot lock {path}: {message}")]
    Lock { path: String, message: String },
}

impl StandardsErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Build(e) => e.error_code(),
            Self::Index(e) => e.error_code(),
            Self::Query(e) => e.error_code(),
            Self::Enforcement(e) => e.error_code(),
            Self::Metrics(e) => e.error_code(),
            Self::Usage { .. } => error_code::USAGE_ERROR,
            Self::Output { .. } => error_code::OUTPUT_IO,
            Self::Lock { .. } => error_code::LOCK_ERROR,
        }
    }

    fn exit_code(&self) -> u8 {
        match self {
            Self::Config(e) => e.exit_code(),
            Self::Build(e) => e.exit_code(),
            Self::Index(e) => e.exit_code(),
            Self::Query(e) => e.exit_code(),
            Self::Enforcement(e) => e.exit_code(),
            Self::Metrics(e) => e.exit_code(),
            Self::Usage { .. } => error_code::EXIT_FAILURE,
            Self::Output { .. } | Self::Lock { .. } => error_code::EXIT_INPUT,
        }
    }
}
