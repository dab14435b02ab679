//! Enforcement stub: a bounded set of rules applied as line checks.
//!
//! Checks come from rule `enforcement_hint`s (`regex:`, `literal:`,
//! `builtin:`) and an optional TOML checks file. Findings never fail the
//! run on their own; callers escalate with a severity threshold.

pub mod checks;
pub mod reporters;
pub mod suppression;
pub mod toml_checks;

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use standards_core::errors::EnforcementError;
use standards_core::{Index, Severity};

pub use checks::{check_from_rule, Check, Matcher};
use suppression::SuppressionChecker;
pub use toml_checks::TomlCheckLoader;

const MAX_SNIPPET_CHARS: usize = 120;

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    pub file: String,
    pub line: usize,
    pub snippet: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementSummary {
    pub checks_run: usize,
    pub files_scanned: usize,
    pub violations: usize,
    pub suppressed: usize,
}

/// Result of one enforcement run. A check passes when it produced no
/// unsuppressed violation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementReport {
    pub violations: Vec<Violation>,
    pub summary: EnforcementSummary,
    pub pass_count: usize,
    pub fail_count: usize,
}

impl EnforcementReport {
    /// Whether any violation is at or above `threshold`.
    pub fn fails_at(&self, threshold: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= threshold)
    }

    /// Violation counts keyed by rule id.
    pub fn counts_by_rule(&self) -> FxHashMap<&str, u64> {
        let mut counts: FxHashMap<&str, u64> = FxHashMap::default();
        for v in &self.violations {
            *counts.entry(v.rule_id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Parse a previously written JSON report.
    pub fn load(path: &Path) -> Result<Self, EnforcementError> {
        let content = std::fs::read_to_string(path).map_err(|e| EnforcementError::Report {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| EnforcementError::Report {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Inputs of an enforcement run.
#[derive(Debug, Clone)]
pub struct EnforcementOptions {
    pub root: PathBuf,
    pub checks_file: Option<PathBuf>,
    pub max_checks: usize,
    /// Files never scanned (the index itself), relative to `root`.
    pub exclude: Vec<String>,
}

impl EnforcementOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            checks_file: None,
            max_checks: standards_core::constants::DEFAULT_MAX_CHECKS,
            exclude: Vec::new(),
        }
    }
}

/// Collect the checks for `index`: rule hints first, then TOML checks,
/// ordered by severity (highest first) then rule id, capped at `max_checks`.
pub fn collect_checks(index: &Index, opts: &EnforcementOptions) -> Result<Vec<Check>, EnforcementError> {
    let mut checks = Vec::new();
    for rule in index.rules.iter().filter(|r| !r.deprecated) {
        match check_from_rule(rule)? {
            Some(check) => checks.push(check),
            None => {
                if rule.enforcement_hint.is_some() {
                    tracing::debug!(rule_id = %rule.id, "enforcement hint is not executable");
                }
            }
        }
    }
    if let Some(path) = &opts.checks_file {
        let path = if path.is_absolute() {
            path.clone()
        } else {
            opts.root.join(path)
        };
        checks.extend(TomlCheckLoader::load_from_file(&path, index)?);
    }

    checks.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
    if checks.len() > opts.max_checks {
        tracing::warn!(
            available = checks.len(),
            max_checks = opts.max_checks,
            "enforcement check cap reached, lowest-severity checks dropped"
        );
        checks.truncate(opts.max_checks);
    }
    Ok(checks)
}

/// Run the checks for `index` over the files under `opts.root`.
pub fn run_enforcement(index: &Index, opts: &EnforcementOptions) -> Result<EnforcementReport, EnforcementError> {
    let checks = collect_checks(index, opts)?;
    let suppression = SuppressionChecker::new();
    let mut report = EnforcementReport::default();
    report.summary.checks_run = checks.len();
    if checks.is_empty() {
        tracing::info!("no executable checks in index");
        return Ok(report);
    }

    let mut failed = vec![false; checks.len()];
    for (rel, path) in target_files(&opts.root, &opts.exclude) {
        let applicable: Vec<usize> = checks
            .iter()
            .enumerate()
            .filter(|(_, c)| c.applies_to_file(&rel))
            .map(|(i, _)| i)
            .collect();
        if applicable.is_empty() {
            continue;
        }
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(file = %rel, error = %e, "skipping unreadable file");
                continue;
            }
        };
        report.summary.files_scanned += 1;

        let lines: Vec<&str> = content.lines().collect();
        for (idx, text) in lines.iter().enumerate() {
            let line = idx + 1;
            for &ci in &applicable {
                let check = &checks[ci];
                if !check.matches(text) {
                    continue;
                }
                if suppression.is_suppressed(&lines, line, &check.rule_id) {
                    report.summary.suppressed += 1;
                    continue;
                }
                failed[ci] = true;
                report.violations.push(Violation {
                    rule_id: check.rule_id.clone(),
                    file: rel.clone(),
                    line,
                    snippet: snippet(text),
                    severity: check.severity,
                    message: check.message.clone(),
                });
            }
        }
    }

    report
        .violations
        .sort_by(|a, b| (&a.file, a.line, &a.rule_id).cmp(&(&b.file, b.line, &b.rule_id)));
    report.summary.violations = report.violations.len();
    report.fail_count = failed.iter().filter(|f| **f).count();
    report.pass_count = checks.len() - report.fail_count;

    tracing::info!(
        checks = report.summary.checks_run,
        files = report.summary.files_scanned,
        violations = report.summary.violations,
        suppressed = report.summary.suppressed,
        "enforcement complete"
    );
    Ok(report)
}

/// Gitignore-aware file walk, sorted, as `(relative path, absolute path)`.
fn target_files(root: &Path, exclude: &[String]) -> Vec<(String, PathBuf)> {
    let walker = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .require_git(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker.flatten() {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let rel = relative.to_string_lossy().replace('\\', "/");
        if exclude.iter().any(|e| *e == rel) {
            continue;
        }
        files.push((rel, entry.path().to_path_buf()));
    }
    files
}

fn snippet(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= MAX_SNIPPET_CHARS {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(MAX_SNIPPET_CHARS).collect();
    format!("{cut}...")
}
