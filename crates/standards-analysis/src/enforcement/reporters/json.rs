//! JSON reporter: the report document as persisted and re-read by `metrics`.

use super::Reporter;
use crate::enforcement::EnforcementReport;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, report: &EnforcementReport) -> Result<String, String> {
        serde_json::to_string_pretty(report).map_err(|e| e.to_string())
    }
}
