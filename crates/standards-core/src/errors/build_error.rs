//! Build errors and non-fatal build warnings.

use std::fmt;

use super::error_code::StandardsErrorCode;
use super::{ConfigError, IndexError, OverrideError, SourceError, ValidationError};

/// Errors that abort an index build. The prior index is left untouched.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Override error: {0}")]
    Override(#[from] OverrideError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),
}

impl StandardsErrorCode for BuildError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Override(e) => e.error_code(),
            Self::Index(e) => e.error_code(),
        }
    }

    fn exit_code(&self) -> u8 {
        match self {
            Self::Config(e) => e.exit_code(),
            Self::Validation(e) => e.exit_code(),
            Self::Override(e) => e.exit_code(),
            Self::Index(e) => e.exit_code(),
        }
    }
}

/// Non-fatal issue collected during a build and reported in the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    Source(SourceErrorKey),
    NoCandidates { path: String },
    UnknownOverrideId { id: String },
    IgnoredMarker { path: String, line: usize, message: String },
    SummaryTooLong { id: String, chars: usize },
    SupersededWithoutDeprecation { id: String },
    InvalidDate { id: String, value: String },
}

/// Comparable projection of a [`SourceError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceErrorKey {
    pub path: String,
    pub message: String,
}

impl From<&SourceError> for BuildWarning {
    fn from(err: &SourceError) -> Self {
        match err {
            SourceError::Unreadable { path, message } => Self::Source(SourceErrorKey {
                path: path.clone(),
                message: message.clone(),
            }),
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(key) => write!(f, "unreadable source {}: {}", key.path, key.message),
            Self::NoCandidates { path } => write!(f, "no candidates found in {path}"),
            Self::UnknownOverrideId { id } => {
                write!(f, "override for unknown rule id {id} skipped")
            }
            Self::IgnoredMarker {
                path,
                line,
                message,
            } => write!(f, "rule marker at {path}:{line} ignored: {message}"),
            Self::SummaryTooLong { id, chars } => {
                write!(f, "rule {id}: summary has {chars} chars (limit 100)")
            }
            Self::SupersededWithoutDeprecation { id } => {
                write!(f, "rule {id}: superseded_by set but deprecated is false")
            }
            Self::InvalidDate { id, value } => {
                write!(f, "rule {id}: last_updated '{value}' is not a YYYY-MM-DD date")
            }
        }
    }
}
