//! Console reporter: human-readable output with color codes.

use std::fmt::Write;

use standards_core::Severity;

use super::Reporter;
use crate::enforcement::EnforcementReport;

/// Console reporter for terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn color_start(&self, severity: Severity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            Severity::Critical => "\x1b[35m", // magenta
            Severity::Error => "\x1b[31m",    // red
            Severity::Warn => "\x1b[33m",     // yellow
            Severity::Info => "\x1b[36m",     // cyan
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, report: &EnforcementReport) -> Result<String, String> {
        let mut output = String::new();

        for v in &report.violations {
            writeln!(
                output,
                "{}{}{}: {}:{}: [{}] {}",
                self.color_start(v.severity),
                v.severity,
                self.color_end(),
                v.file,
                v.line,
                v.rule_id,
                v.message,
            )
            .map_err(|e| e.to_string())?;
            writeln!(output, "    | {}", v.snippet).map_err(|e| e.to_string())?;
        }
        if !report.violations.is_empty() {
            output.push('\n');
        }

        let s = &report.summary;
        writeln!(
            output,
            "─── Summary: {}/{} checks passed, {} files scanned, {} violations, {} suppressed ───",
            report.pass_count, s.checks_run, s.files_scanned, s.violations, s.suppressed
        )
        .map_err(|e| e.to_string())?;

        if report.fail_count == 0 {
            output.push_str("Result: PASSED ✓\n");
        } else {
            output.push_str("Result: FAILED ✗\n");
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcement::{EnforcementSummary, Violation};

    #[test]
    fn plain_output_lists_violations() {
        let report = EnforcementReport {
            violations: vec![Violation {
                rule_id: "python_coding-no-bare-except".into(),
                file: "app/main.py".into(),
                line: 4,
                snippet: "except:".into(),
                severity: Severity::Error,
                message: "Never use bare except".into(),
            }],
            summary: EnforcementSummary {
                checks_run: 2,
                files_scanned: 1,
                violations: 1,
                suppressed: 0,
            },
            pass_count: 1,
            fail_count: 1,
        };
        let out = ConsoleReporter::new(false).generate(&report).unwrap();
        assert!(out.contains("error: app/main.py:4: [python_coding-no-bare-except]"));
        assert!(out.contains("1/2 checks passed"));
        assert!(out.contains("Result: FAILED"));
    }
}
