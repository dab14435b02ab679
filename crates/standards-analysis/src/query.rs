//! Read-only queries over a built index: list, search, show, stats.

use std::collections::BTreeMap;

use serde::Serialize;
use standards_core::errors::QueryError;
use standards_core::{Index, Rule, Severity};

/// Filters shared by `list` and `search`. All present filters must match.
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    /// Canonical severity or legacy alias (`low`, `medium`, `high`).
    pub severity: Option<String>,
    /// Rule must carry this category.
    pub category: Option<String>,
    /// Rule must carry every one of these categories.
    pub all_categories: Vec<String>,
    /// Case-insensitive substring of the joined `applies_to`.
    pub applies: Option<String>,
    /// Case-insensitive substring of the source file path.
    pub source: Option<String>,
    /// Case-insensitive substring over id, summary and rationale.
    pub text: Option<String>,
}

impl RuleFilter {
    /// Resolve the severity filter, warning on legacy aliases.
    pub fn resolved_severity(&self) -> Result<Option<Severity>, QueryError> {
        let Some(raw) = self.severity.as_deref() else {
            return Ok(None);
        };
        match Severity::parse_lenient(raw) {
            Some((severity, true)) => {
                tracing::warn!(
                    alias = raw,
                    severity = %severity,
                    "severity alias mapped (prefer canonical names)"
                );
                Ok(Some(severity))
            }
            Some((severity, false)) => Ok(Some(severity)),
            None => Err(QueryError::InvalidSeverity(raw.to_string())),
        }
    }

    fn matches(&self, rule: &Rule, severity: Option<Severity>) -> bool {
        if severity.is_some_and(|s| rule.severity != s) {
            return false;
        }
        if let Some(cat) = &self.category {
            if !rule.category_ids.contains(cat) {
                return false;
            }
        }
        if !self
            .all_categories
            .iter()
            .all(|c| rule.category_ids.contains(c))
        {
            return false;
        }
        if let Some(applies) = &self.applies {
            let joined = rule.applies_to.join(" ").to_lowercase();
            if !joined.contains(&applies.to_lowercase()) {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if !rule
                .source
                .file
                .to_lowercase()
                .contains(&source.to_lowercase())
            {
                return false;
            }
        }
        if let Some(text) = &self.text {
            let blob = format!("{} {} {}", rule.id, rule.summary, rule.rationale).to_lowercase();
            if !blob.contains(&text.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Rules matching `filter`, ordered by id.
pub fn filter_rules<'a>(index: &'a Index, filter: &RuleFilter) -> Result<Vec<&'a Rule>, QueryError> {
    let severity = filter.resolved_severity()?;
    if filter.category.as_deref().is_some_and(str::is_empty) {
        return Err(QueryError::InvalidFilter {
            field: "category",
            message: "must not be empty".to_string(),
        });
    }
    let mut out: Vec<&Rule> = index
        .rules
        .iter()
        .filter(|r| filter.matches(r, severity))
        .collect();
    out.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(out)
}

/// A single rule by id.
pub fn show_rule<'a>(index: &'a Index, id: &str) -> Result<&'a Rule, QueryError> {
    index
        .rule(id)
        .ok_or_else(|| QueryError::RuleNotFound(id.to_string()))
}

/// Render a rule as YAML for `show`.
pub fn render_rule(rule: &Rule) -> String {
    serde_yaml::to_string(rule).unwrap_or_else(|e| format!("# render failed: {e}\n"))
}

/// Totals for `stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub rules_total: usize,
    pub severity_counts: BTreeMap<Severity, usize>,
    pub deprecated: usize,
    pub integrity_hash: String,
}

pub fn stats(index: &Index) -> IndexStats {
    IndexStats {
        rules_total: index.rules.len(),
        severity_counts: index.severity_counts(),
        deprecated: index.rules.iter().filter(|r| r.deprecated).count(),
        integrity_hash: index.integrity_hash.clone(),
    }
}

impl IndexStats {
    /// `key: value` lines, severities ascending.
    pub fn render(&self) -> String {
        let mut out = format!("rules_total: {}\n", self.rules_total);
        for (severity, count) in &self.severity_counts {
            out.push_str(&format!("rules_{severity}: {count}\n"));
        }
        out.push_str(&format!("rules_deprecated: {}\n", self.deprecated));
        out.push_str(&format!("integrity_hash: {}\n", self.integrity_hash));
        out
    }
}
