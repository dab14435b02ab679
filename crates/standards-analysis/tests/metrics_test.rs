//! Metrics exposure: hash change tracking, counters, cardinality guard.

mod common;

use common::{index_with, rule};
use standards_analysis::enforcement::{EnforcementReport, Violation};
use standards_analysis::metrics::{
    apply_policy, expose, ingest_report, render_exposition, CounterPolicy, MetricsState,
};
use standards_core::Severity;
use tempfile::TempDir;

fn violation(rule_id: &str, severity: Severity) -> Violation {
    Violation {
        rule_id: rule_id.to_string(),
        file: "app/main.py".to_string(),
        line: 1,
        snippet: String::new(),
        severity,
        message: String::new(),
    }
}

fn report(violations: Vec<Violation>) -> EnforcementReport {
    EnforcementReport {
        violations,
        ..Default::default()
    }
}

#[test]
fn test_hash_change_relative_to_previous_exposure() {
    let mut state = MetricsState::default();
    let first = index_with(vec![rule("a-rule", Severity::Warn, "2025-01-01")]);
    assert!(!expose(&first, &mut state).integrity_hash_changed);
    assert!(!expose(&first, &mut state).integrity_hash_changed);

    let second = index_with(vec![rule("a-rule", Severity::Error, "2025-01-01")]);
    let exposure = expose(&second, &mut state);
    assert!(exposure.integrity_hash_changed);
    assert_eq!(exposure.rules_total, 1);
    assert_eq!(exposure.severity_counts[&Severity::Error], 1);
    assert_eq!(state.last_hash.as_deref(), Some(second.integrity_hash.as_str()));
}

#[test]
fn test_per_rule_counters_are_severity_gated() {
    let mut state = MetricsState::default();
    let policy = CounterPolicy::default();
    ingest_report(
        &mut state,
        &report(vec![
            violation("python_coding-no-eval", Severity::Critical),
            violation("python_coding-no-eval", Severity::Critical),
            violation("python_coding-no-print", Severity::Warn),
        ]),
        &policy,
    );
    assert_eq!(state.enforcement_runs_total, 1);
    assert_eq!(state.enforcement_violations_total, 3);
    assert_eq!(state.per_rule.len(), 1);
    assert_eq!(state.per_rule["python_coding-no-eval"], 2);
    assert!(!state.overflow);
}

#[test]
fn test_counter_cap_sets_overflow() {
    let mut state = MetricsState::default();
    let policy = CounterPolicy {
        min_severity: Severity::Info,
        max_rule_counters: 2,
    };
    ingest_report(
        &mut state,
        &report(vec![
            violation("r-one", Severity::Error),
            violation("r-two", Severity::Error),
            violation("r-three", Severity::Error),
        ]),
        &policy,
    );
    assert_eq!(state.per_rule.len(), 2);
    assert!(state.overflow);
    assert!(!state.per_rule.contains_key("r-two"));

    // tracked rules keep counting after overflow
    ingest_report(&mut state, &report(vec![violation("r-one", Severity::Error)]), &policy);
    assert_eq!(state.per_rule["r-one"], 2);
    assert_eq!(state.enforcement_runs_total, 2);
}

#[test]
fn test_policy_change_resets_per_rule_counters() {
    let mut state = MetricsState::default();
    let loose = CounterPolicy {
        min_severity: Severity::Info,
        max_rule_counters: 1,
    };
    ingest_report(
        &mut state,
        &report(vec![violation("r-warn", Severity::Warn), violation("r-error", Severity::Error)]),
        &loose,
    );
    assert_eq!(state.per_rule.len(), 1);
    assert!(state.overflow);

    // same policy keeps the series
    apply_policy(&mut state, &loose);
    assert_eq!(state.per_rule.len(), 1);

    let strict = CounterPolicy::default();
    apply_policy(&mut state, &strict);
    assert!(state.per_rule.is_empty());
    assert!(!state.overflow);
    assert_eq!(state.enforcement_violations_total, 2);

    ingest_report(&mut state, &report(vec![violation("r-warn", Severity::Warn)]), &strict);
    let index = index_with(vec![rule("r-warn", Severity::Warn, "2025-01-01")]);
    let text = render_exposition(&expose(&index, &mut state));
    assert!(!text.contains("rule_id=\"r-warn\""));
    assert!(text.contains("standards_enforcement_rule_counter_overflow 0\n"));
}

#[test]
fn test_exposition_format() {
    let mut state = MetricsState::default();
    ingest_report(
        &mut state,
        &report(vec![violation("python_coding-no-eval", Severity::Critical)]),
        &CounterPolicy::default(),
    );
    let index = index_with(vec![rule("python_coding-no-eval", Severity::Critical, "2025-01-01")]);
    let text = render_exposition(&expose(&index, &mut state));

    assert!(text.contains("# TYPE standards_rules_total gauge\nstandards_rules_total 1\n"));
    assert!(text.contains("standards_rules_severity_count{severity=\"critical\"} 1\n"));
    assert!(text.contains("standards_rules_severity_count{severity=\"info\"} 0\n"));
    assert!(text.contains("standards_integrity_hash_changed 0\n"));
    assert!(text.contains("standards_enforcement_runs_total 1\n"));
    assert!(text.contains("standards_enforcement_violations_total 1\n"));
    assert!(text.contains(
        "standards_enforcement_violations_total_per_rule{rule_id=\"python_coding-no-eval\"} 1\n"
    ));
    assert!(text.contains("standards_enforcement_rule_counter_overflow 0\n"));
    assert!(text.contains("# HELP standards_enforcement_runs_total"));
}

#[test]
fn test_state_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state/metrics.json");
    assert_eq!(MetricsState::load(&path).unwrap(), MetricsState::default());

    let mut state = MetricsState::default();
    ingest_report(&mut state, &report(vec![violation("r-one", Severity::Error)]), &CounterPolicy::default());
    state.save(&path).unwrap();
    assert_eq!(MetricsState::load(&path).unwrap(), state);

    std::fs::write(&path, "{not json").unwrap();
    assert!(MetricsState::load(&path).is_err());
}
