//! Tests for the persisted data model.

use standards_core::types::*;

const INDEX_YAML: &str = r#"
schema_version: 1
version: 2025.02.0
generated_at: 2025-02-03T10:00:00Z
offline: true
integrity_hash: abc123
sources:
  - path: docs/python.md
    categories: [python_coding]
categories:
  python_coding:
    title: Python Coding
    tags: [python]
rules:
  - id: python_coding-never-hardcode-secrets-or-tokens-in-code
    category_ids: [python_coding]
    summary: NEVER hardcode secrets or tokens in code
    rationale: NEVER hardcode secrets or tokens in code.
    severity: critical
    applies_to: ["**/*"]
    source:
      file: docs/python.md
      anchor: security
    last_updated: "2025-02-01"
  - id: python_coding-old-style
    category_ids: [python_coding]
    summary: Use old style
    rationale: legacy
    severity: warn
    applies_to: ["**/*.py"]
    examples:
      bad: "x = 1"
    source:
      file: docs/python.md
      anchor: style
    deprecated: true
    superseded_by: _retired
    last_updated: "2025-01-01"
"#;

#[test]
fn test_index_parses_with_defaults() {
    let index: Index = serde_yaml::from_str(INDEX_YAML).unwrap();
    assert!(index.offline);
    assert_eq!(index.rules.len(), 2);
    assert!(index.coverage.is_none());

    let first = &index.rules[0];
    assert_eq!(first.severity, Severity::Critical);
    assert!(!first.deprecated);
    assert!(first.examples.is_none());

    let second = index.rule("python_coding-old-style").unwrap();
    assert!(second.deprecated);
    assert_eq!(second.superseded_by.as_deref(), Some("_retired"));
    assert_eq!(second.examples.as_ref().unwrap().bad.as_deref(), Some("x = 1"));
}

#[test]
fn test_severity_counts_include_zeroes() {
    let index: Index = serde_yaml::from_str(INDEX_YAML).unwrap();
    let counts = index.severity_counts();
    assert_eq!(counts[&Severity::Critical], 1);
    assert_eq!(counts[&Severity::Warn], 1);
    assert_eq!(counts[&Severity::Info], 0);
    assert_eq!(counts.len(), 4);
}

#[test]
fn test_integrity_fragment_and_primary_category() {
    let index: Index = serde_yaml::from_str(INDEX_YAML).unwrap();
    let rule = &index.rules[1];
    assert_eq!(rule.integrity_fragment(), "python_coding-old-style|2025-01-01|warn");

    let mut multi = rule.clone();
    multi.category_ids = vec!["zeta".into(), "alpha".into()];
    assert_eq!(multi.primary_category(), "alpha");
}

#[test]
fn test_categories_document_title_defaults_to_id() {
    let doc: CategoriesDocument = serde_yaml::from_str(
        r#"
categories:
  markdown:
    description: Docs
  python_coding:
    title: Python Coding
sources:
  - path: docs/md.md
    categories: [markdown]
"#,
    )
    .unwrap();
    let metas = doc.category_metas();
    assert_eq!(metas["markdown"].title, "markdown");
    assert_eq!(metas["python_coding"].title, "Python Coding");
    assert_eq!(doc.sources[0].categories, vec!["markdown".to_string()]);
}
