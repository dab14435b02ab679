//! Tests for the standards error handling system.

use standards_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let errors: Vec<Box<dyn Fn() -> (&'static str, u8)>> = vec![
        Box::new(|| {
            let e = ConfigError::FileNotFound { path: "x".into() };
            (e.error_code(), e.exit_code())
        }),
        Box::new(|| {
            let e = SourceError::Unreadable {
                path: "a.md".into(),
                message: "denied".into(),
            };
            (e.error_code(), e.exit_code())
        }),
        Box::new(|| {
            let e = ValidationError::Failed { issues: vec![] };
            (e.error_code(), e.exit_code())
        }),
        Box::new(|| {
            let e = OverrideError::UnknownCategory {
                id: "r".into(),
                category: "c".into(),
            };
            (e.error_code(), e.exit_code())
        }),
        Box::new(|| {
            let e = IndexError::NotFound { path: "i.yaml".into() };
            (e.error_code(), e.exit_code())
        }),
        Box::new(|| {
            let e = QueryError::RuleNotFound("r".into());
            (e.error_code(), e.exit_code())
        }),
        Box::new(|| {
            let e = EnforcementError::InvalidCheck {
                rule_id: "r".into(),
                message: "m".into(),
            };
            (e.error_code(), e.exit_code())
        }),
        Box::new(|| {
            let e = MetricsError::State {
                path: "s".into(),
                message: "m".into(),
            };
            (e.error_code(), e.exit_code())
        }),
    ];
    for make in errors {
        let (code, exit) = make();
        assert!(!code.is_empty());
        assert!(exit > 0);
    }
}

#[test]
fn test_validation_issue_names_rule_and_field() {
    let issue = ValidationIssue::MissingSupersededBy {
        id: "python_coding-old-rule".into(),
    };
    assert_eq!(issue.rule_id(), "python_coding-old-rule");
    assert_eq!(issue.field(), "superseded_by");

    let err = ValidationError::Failed {
        issues: vec![
            issue,
            ValidationIssue::EmptyAppliesTo { id: "md-rule".into() },
        ],
    };
    let rendered = err.to_string();
    assert!(rendered.contains("2 validation issue(s)"));
    assert!(rendered.contains("python_coding-old-rule"));
    assert!(rendered.contains("md-rule: applies_to is empty"));
}

#[test]
fn test_build_error_from_conversions_keep_codes() {
    let build: BuildError = ValidationError::Failed { issues: vec![] }.into();
    assert_eq!(build.error_code(), "VALIDATION_FAILED");
    assert_eq!(build.exit_code(), 1);

    let build: BuildError = IndexError::Malformed {
        path: "i.yaml".into(),
        message: "bad".into(),
    }
    .into();
    assert_eq!(build.error_code(), "INDEX_MALFORMED");
    assert_eq!(build.exit_code(), 2);
    assert!(build.coded_string().starts_with("[INDEX_MALFORMED]"));
}

#[test]
fn test_query_exit_codes() {
    assert_eq!(QueryError::RuleNotFound("x".into()).exit_code(), 3);
    assert_eq!(QueryError::InvalidSeverity("x".into()).exit_code(), 1);
}

#[test]
fn test_build_warning_display() {
    let w = BuildWarning::from(&SourceError::Unreadable {
        path: "docs/a.md".into(),
        message: "No such file".into(),
    });
    assert_eq!(w.to_string(), "unreadable source docs/a.md: No such file");
}
