//! Inline suppression: `standards-ignore` comments.

use standards_core::constants::SUPPRESSION_MARKER;

/// Checks whether a finding is suppressed by a `standards-ignore` comment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuppressionChecker;

impl SuppressionChecker {
    pub fn new() -> Self {
        Self
    }

    /// Whether the finding at 1-based `line` is suppressed for `rule_id`.
    ///
    /// Supports, on the same line or the line above:
    /// - `# standards-ignore` (all rules)
    /// - `// standards-ignore python_coding-no-bare-except` (one rule)
    /// - `<!-- standards-ignore a-rule, b-rule -->` (several rules)
    pub fn is_suppressed(&self, lines: &[&str], line: usize, rule_id: &str) -> bool {
        if line == 0 || line > lines.len() {
            return false;
        }
        let idx = line - 1;
        if self.line_suppresses(lines[idx], rule_id) {
            return true;
        }
        idx > 0 && self.line_suppresses(lines[idx - 1], rule_id)
    }

    fn line_suppresses(&self, line: &str, rule_id: &str) -> bool {
        let trimmed = line.trim();
        let Some(pos) = trimmed.find(SUPPRESSION_MARKER) else {
            return false;
        };

        let before = &trimmed[..pos];
        let is_comment = before.contains("//")
            || before.contains('#')
            || before.contains("--")
            || before.contains("/*")
            || before.contains("<!--");
        if !is_comment {
            return false;
        }

        let after = trimmed[pos + SUPPRESSION_MARKER.len()..]
            .trim()
            .trim_end_matches("-->")
            .trim_end_matches("*/")
            .trim();
        if after.is_empty() {
            return true;
        }
        after.split(',').map(str::trim).any(|r| r == rule_id)
    }
}
