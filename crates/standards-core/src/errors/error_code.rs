//! StandardsErrorCode trait for structured error codes and process exit codes.

/// Every error enum implements this to expose a stable code string
/// and the process exit code the CLI reports for it.
pub trait StandardsErrorCode {
    /// Returns the error code string (e.g., "VALIDATION_FAILED").
    fn error_code(&self) -> &'static str;

    /// Process exit code. Defaults to 1 (usage / validation failure).
    fn exit_code(&self) -> u8 {
        1
    }

    /// Returns the formatted diagnostic string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Exit codes shared by the CLI surface.
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_INPUT: u8 = 2;
pub const EXIT_NOT_FOUND: u8 = 3;

// Error code constants.
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SOURCE_UNREADABLE: &str = "SOURCE_UNREADABLE";
pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
pub const OVERRIDE_ERROR: &str = "OVERRIDE_ERROR";
pub const INDEX_NOT_FOUND: &str = "INDEX_NOT_FOUND";
pub const INDEX_MALFORMED: &str = "INDEX_MALFORMED";
pub const INDEX_IO: &str = "INDEX_IO";
pub const INVALID_FILTER: &str = "INVALID_FILTER";
pub const RULE_NOT_FOUND: &str = "RULE_NOT_FOUND";
pub const ENFORCEMENT_ERROR: &str = "ENFORCEMENT_ERROR";
pub const METRICS_ERROR: &str = "METRICS_ERROR";
pub const USAGE_ERROR: &str = "USAGE_ERROR";
pub const OUTPUT_IO: &str = "OUTPUT_IO";
pub const LOCK_ERROR: &str = "LOCK_ERROR";
