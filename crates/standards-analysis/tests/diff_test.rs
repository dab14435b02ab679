//! Snapshot diff and fail-on policy tests.

mod common;

use common::{index_with, rule};
use standards_analysis::diff::{diff_indexes, ChangeKind, FailPolicy};
use standards_core::Severity;

fn old_index() -> standards_core::Index {
    index_with(vec![
        rule("python_coding-a", Severity::Warn, "2025-01-01"),
        rule("python_coding-b", Severity::Error, "2025-01-01"),
        rule("python_coding-c", Severity::Info, "2025-01-01"),
    ])
}

#[test]
fn test_self_diff_is_empty() {
    let index = old_index();
    let diff = diff_indexes(&index, &index);
    assert!(diff.added().is_empty());
    assert!(diff.removed().is_empty());
    assert!(diff.severity_changed().is_empty());
    assert!(!diff.integrity_hash_changed);
    assert!(diff.is_empty());
    assert!(!FailPolicy::Any.should_fail(&diff));
}

#[test]
fn test_added_removed_and_severity_changes() {
    let old = old_index();
    let mut b = rule("python_coding-b", Severity::Critical, "2025-01-01");
    b.rationale = "Now stricter".to_string();
    let new = index_with(vec![
        rule("python_coding-a", Severity::Warn, "2025-01-01"),
        b,
        rule("python_coding-d", Severity::Info, "2025-01-01"),
    ]);

    let diff = diff_indexes(&old, &new);
    assert_eq!(diff.added(), vec!["python_coding-d"]);
    assert_eq!(diff.removed(), vec!["python_coding-c"]);
    assert_eq!(
        diff.severity_changed(),
        vec![("python_coding-b", Severity::Error, Severity::Critical)]
    );
    assert!(diff.integrity_hash_changed);
    assert_eq!(diff.summary[&ChangeKind::RationaleChanged], 1);
}

#[test]
fn test_category_order_is_not_a_change() {
    let mut a = rule("python_coding-a", Severity::Warn, "2025-01-01");
    a.category_ids = vec!["python_coding".into(), "markdown".into()];
    let mut reordered = a.clone();
    reordered.category_ids.reverse();

    let diff = diff_indexes(&index_with(vec![a]), &index_with(vec![reordered]));
    assert!(diff.is_empty());
}

#[test]
fn test_last_updated_only_changes_hash() {
    let old = old_index();
    let new = index_with(vec![
        rule("python_coding-a", Severity::Warn, "2025-02-01"),
        rule("python_coding-b", Severity::Error, "2025-01-01"),
        rule("python_coding-c", Severity::Info, "2025-01-01"),
    ]);
    let diff = diff_indexes(&old, &new);
    assert!(diff.is_empty());
    assert!(diff.integrity_hash_changed);
}

#[test]
fn test_fail_policy_kinds() {
    let old = old_index();
    let new = index_with(vec![
        rule("python_coding-a", Severity::Warn, "2025-01-01"),
        rule("python_coding-b", Severity::Error, "2025-01-01"),
        rule("python_coding-c", Severity::Info, "2025-01-01"),
        rule("python_coding-d", Severity::Info, "2025-01-01"),
    ]);
    let diff = diff_indexes(&old, &new);

    assert!(FailPolicy::parse("any").should_fail(&diff));
    assert!(FailPolicy::parse("added,removed").should_fail(&diff));
    assert!(!FailPolicy::parse("severity_changed").should_fail(&diff));
    // unknown kinds are dropped, not fatal
    let policy = FailPolicy::parse("bogus, removed");
    assert!(!policy.should_fail(&diff));
    assert_eq!(policy, FailPolicy::parse("removed"));
}

#[test]
fn test_json_report_uses_snake_case_kinds() {
    let old = old_index();
    let new = index_with(vec![rule("python_coding-a", Severity::Error, "2025-01-01")]);
    let json = serde_json::to_value(diff_indexes(&old, &new)).unwrap();
    let kinds: Vec<&str> = json["changes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["kind"].as_str().unwrap())
        .collect();
    assert!(kinds.contains(&"severity_changed"));
    assert!(kinds.contains(&"removed"));
}
