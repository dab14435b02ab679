//! Reporters: output formats for enforcement reports.

pub mod console;
pub mod json;

use super::EnforcementReport;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, report: &EnforcementReport) -> Result<String, String>;
}

/// Create a reporter by format name. `use_color` only affects `console`.
pub fn create_reporter(format: &str, use_color: bool) -> Option<Box<dyn Reporter>> {
    match format {
        "json" => Some(Box::new(json::JsonReporter)),
        "console" => Some(Box::new(console::ConsoleReporter::new(use_color))),
        _ => None,
    }
}

/// List all available reporter format names.
pub fn available_formats() -> &'static [&'static str] {
    &["json", "console"]
}
