//! Metrics exposure errors.

use super::error_code::{self, StandardsErrorCode};

/// Errors loading or persisting metrics state.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("Metrics state error in {path}: {message}")]
    State { path: String, message: String },
}

impl StandardsErrorCode for MetricsError {
    fn error_code(&self) -> &'static str {
        error_code::METRICS_ERROR
    }

    fn exit_code(&self) -> u8 {
        error_code::EXIT_INPUT
    }
}
