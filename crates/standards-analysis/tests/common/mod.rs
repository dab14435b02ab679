//! Shared on-disk fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use standards_core::types::{Rule, SourceRef};
use standards_core::{Index, Severity};
use tempfile::TempDir;

pub const CATEGORIES_YAML: &str = r#"
categories:
  python_coding:
    title: Python Coding
    description: Python conventions
  markdown:
    title: Markdown Style
sources:
  - path: docs/python.md
    categories: [python_coding]
"#;

pub const PYTHON_MD: &str = "# Python Standards

## Secrets
- NEVER hardcode secrets or tokens in code.

## Functions
- Keep functions small, pure.
- Keep functions small pure.
- Prefer pathlib over os.path for filesystem access.
- Prefer pathlib over os.path for filesystem access.
";

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// A project with the default categories file and one python source.
pub fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".repo_studios/standards_categories.yaml", CATEGORIES_YAML);
    write(dir.path(), "docs/python.md", PYTHON_MD);
    dir
}

pub fn rule(id: &str, severity: Severity, last_updated: &str) -> Rule {
    Rule {
        id: id.to_string(),
        category_ids: vec!["python_coding".to_string()],
        summary: format!("Summary of {id}"),
        rationale: "Because it matters".to_string(),
        severity,
        applies_to: vec!["**/*.py".to_string()],
        examples: None,
        source: SourceRef {
            file: "docs/python.md".to_string(),
            anchor: "python".to_string(),
        },
        deprecated: false,
        superseded_by: None,
        enforcement_hint: None,
        last_updated: last_updated.to_string(),
    }
}

/// An in-memory index over `rules` with a correct integrity hash.
pub fn index_with(rules: Vec<Rule>) -> Index {
    let mut rules = rules;
    standards_analysis::build::sort_rules(&mut rules);
    Index {
        schema_version: 1,
        version: "2025.01.0".to_string(),
        generated_at: at(2025, 1, 1),
        offline: true,
        integrity_hash: standards_analysis::build::integrity_hash(&rules),
        sources: Vec::new(),
        categories: Default::default(),
        rules,
        coverage: None,
        metadata: None,
    }
}
