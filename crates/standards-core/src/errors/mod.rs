//! Error handling for the standards pipeline.
//! One error enum per subsystem, `thiserror` only.

pub mod build_error;
pub mod config_error;
pub mod enforcement_error;
pub mod error_code;
pub mod index_error;
pub mod metrics_error;
pub mod override_error;
pub mod query_error;
pub mod source_error;
pub mod validation_error;

pub use build_error::{BuildError, BuildWarning};
pub use config_error::ConfigError;
pub use enforcement_error::EnforcementError;
pub use error_code::StandardsErrorCode;
pub use index_error::IndexError;
pub use metrics_error::MetricsError;
pub use override_error::OverrideError;
pub use query_error::QueryError;
pub use source_error::SourceError;
pub use validation_error::{ValidationError, ValidationIssue};
