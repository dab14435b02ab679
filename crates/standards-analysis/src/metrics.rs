//! Plaintext metrics exposure for the index and enforcement runs.
//!
//! State between exposures lives in a small JSON file: the last exposed
//! integrity hash plus enforcement counters. Per-rule counters are gated by
//! severity and capped; once the cap is hit `overflow` latches and new rule
//! ids are no longer tracked. Changing the gate or the cap starts the
//! per-rule series over.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use standards_core::errors::MetricsError;
use standards_core::{Index, Severity};

use crate::document::write_atomic;
use crate::enforcement::EnforcementReport;

/// Persisted exposure state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsState {
    pub last_hash: Option<String>,
    pub enforcement_runs_total: u64,
    pub enforcement_violations_total: u64,
    pub per_rule: BTreeMap<String, u64>,
    pub overflow: bool,
    /// Policy the per-rule counters were collected under.
    pub counter_min_severity: Option<Severity>,
    pub counter_cap: Option<usize>,
}

impl MetricsState {
    /// Load state, or the empty state when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, MetricsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let state_err = |message: String| MetricsError::State {
            path: path.display().to_string(),
            message,
        };
        let content = std::fs::read_to_string(path).map_err(|e| state_err(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| state_err(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> Result<(), MetricsError> {
        let content = serde_json::to_string_pretty(self).map_err(|e| MetricsError::State {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        write_atomic(path, &content).map_err(|e| MetricsError::State {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Severity gate and cardinality cap for per-rule counters.
#[derive(Debug, Clone, Copy)]
pub struct CounterPolicy {
    pub min_severity: Severity,
    pub max_rule_counters: usize,
}

impl Default for CounterPolicy {
    fn default() -> Self {
        Self {
            min_severity: Severity::Error,
            max_rule_counters: standards_core::constants::DEFAULT_MAX_RULE_COUNTERS,
        }
    }
}

/// One computed exposure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exposure {
    pub rules_total: usize,
    pub severity_counts: BTreeMap<Severity, usize>,
    pub integrity_hash_changed: bool,
    pub enforcement_runs_total: u64,
    pub enforcement_violations_total: u64,
    pub per_rule: BTreeMap<String, u64>,
    pub overflow: bool,
}

/// Bind the per-rule counters to `policy`. Counters collected under a
/// different severity gate or cap are dropped and the overflow flag cleared.
pub fn apply_policy(state: &mut MetricsState, policy: &CounterPolicy) {
    let changed = state.counter_min_severity.is_some_and(|s| s != policy.min_severity)
        || state.counter_cap.is_some_and(|c| c != policy.max_rule_counters);
    if changed {
        tracing::info!(
            min_severity = %policy.min_severity,
            max_rule_counters = policy.max_rule_counters,
            dropped = state.per_rule.len(),
            "counter policy changed, resetting per-rule counters"
        );
        state.per_rule.clear();
        state.overflow = false;
    }
    state.counter_min_severity = Some(policy.min_severity);
    state.counter_cap = Some(policy.max_rule_counters);
}

/// Fold an enforcement report into the counters.
pub fn ingest_report(state: &mut MetricsState, report: &EnforcementReport, policy: &CounterPolicy) {
    apply_policy(state, policy);
    state.enforcement_runs_total += 1;
    state.enforcement_violations_total += report.violations.len() as u64;

    let mut eligible: BTreeMap<&str, u64> = BTreeMap::new();
    for v in report.violations.iter().filter(|v| v.severity >= policy.min_severity) {
        *eligible.entry(v.rule_id.as_str()).or_insert(0) += 1;
    }
    for (rule_id, count) in eligible {
        if let Some(counter) = state.per_rule.get_mut(rule_id) {
            *counter += count;
        } else if state.per_rule.len() < policy.max_rule_counters {
            state.per_rule.insert(rule_id.to_string(), count);
        } else {
            if !state.overflow {
                tracing::warn!(
                    max_rule_counters = policy.max_rule_counters,
                    rule_id,
                    "per-rule counter cap reached"
                );
            }
            state.overflow = true;
        }
    }
}

/// Compute the exposure for `index` and record its hash as last exposed.
pub fn expose(index: &Index, state: &mut MetricsState) -> Exposure {
    let integrity_hash_changed = state
        .last_hash
        .as_deref()
        .is_some_and(|h| h != index.integrity_hash);
    state.last_hash = Some(index.integrity_hash.clone());

    Exposure {
        rules_total: index.rules.len(),
        severity_counts: index.severity_counts(),
        integrity_hash_changed,
        enforcement_runs_total: state.enforcement_runs_total,
        enforcement_violations_total: state.enforcement_violations_total,
        per_rule: state.per_rule.clone(),
        overflow: state.overflow,
    }
}

/// Render the exposure in the Prometheus plaintext format.
pub fn render_exposition(exp: &Exposure) -> String {
    let mut out = String::new();
    metric_header(&mut out, "standards_rules_total", "Total rules in the index.", "gauge");
    let _ = writeln!(out, "standards_rules_total {}", exp.rules_total);

    metric_header(
        &mut out,
        "standards_rules_severity_count",
        "Rules per severity.",
        "gauge",
    );
    for (severity, count) in &exp.severity_counts {
        let _ = writeln!(out, "standards_rules_severity_count{{severity=\"{severity}\"}} {count}");
    }

    metric_header(
        &mut out,
        "standards_integrity_hash_changed",
        "1 when the integrity hash differs from the previous exposure.",
        "gauge",
    );
    let _ = writeln!(
        out,
        "standards_integrity_hash_changed {}",
        u8::from(exp.integrity_hash_changed)
    );

    metric_header(
        &mut out,
        "standards_enforcement_runs_total",
        "Enforcement runs ingested.",
        "counter",
    );
    let _ = writeln!(out, "standards_enforcement_runs_total {}", exp.enforcement_runs_total);

    metric_header(
        &mut out,
        "standards_enforcement_violations_total",
        "Enforcement violations across all runs.",
        "counter",
    );
    let _ = writeln!(
        out,
        "standards_enforcement_violations_total {}",
        exp.enforcement_violations_total
    );

    if !exp.per_rule.is_empty() {
        metric_header(
            &mut out,
            "standards_enforcement_violations_total_per_rule",
            "Enforcement violations per rule (severity-gated, capped).",
            "counter",
        );
        for (rule_id, count) in &exp.per_rule {
            let _ = writeln!(
                out,
                "standards_enforcement_violations_total_per_rule{{rule_id=\"{}\"}} {count}",
                escape_label(rule_id)
            );
        }
    }

    metric_header(
        &mut out,
        "standards_enforcement_rule_counter_overflow",
        "1 once the per-rule counter cap has been reached.",
        "gauge",
    );
    let _ = writeln!(
        out,
        "standards_enforcement_rule_counter_overflow {}",
        u8::from(exp.overflow)
    );
    out
}

fn metric_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {name} {help}");
    let _ = writeln!(out, "# TYPE {name} {kind}");
}

fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_escaping() {
        assert_eq!(escape_label("a\"b"), "a\\\"b");
        assert_eq!(escape_label("plain-id"), "plain-id");
    }
}
