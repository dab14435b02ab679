//! End-to-end command tests over temporary projects.

use std::fs;
use std::path::Path;

use clap::Parser;
use standards_cli::cli::{Cli, Commands};
use tempfile::TempDir;

const CATEGORIES_YAML: &str = r#"
categories:
  python_coding:
    title: Python Coding
sources:
  - path: docs/python.md
    categories: [python_coding]
"#;

const PYTHON_MD: &str = "# Python Standards

## Secrets
- NEVER hardcode secrets or tokens in code.

## Functions
- Keep functions small, pure.
- Prefer pathlib over os.path for filesystem access.
";

const CHECKS_TOML: &str = r#"
[[checks]]
rule_id = "python_coding-keep-functions-small-pure"
kind = "literal"
pattern = "global "
applies_to = ["**/*.py"]
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".repo_studios/standards_categories.yaml", CATEGORIES_YAML);
    write(dir.path(), "docs/python.md", PYTHON_MD);
    dir
}

/// Run `standards --root <root> <args>` and return (exit code, stdout).
fn standards(root: &Path, args: &[&str]) -> (u8, String) {
    let mut argv = vec!["standards", "--root", root.to_str().unwrap()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let code = standards_cli::run(cli, &mut out);
    (code, String::from_utf8(out).unwrap())
}

fn built_project() -> TempDir {
    let dir = project();
    let (code, out) = standards(dir.path(), &["build"]);
    assert_eq!(code, 0, "build failed: {out}");
    dir
}

#[test]
fn test_build_writes_index_and_lock() {
    let dir = project();
    let (code, out) = standards(dir.path(), &["build"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("wrote "));
    assert!(out.contains("3 rules"));
    assert!(dir.path().join("repo_standards_index.yaml").exists());
    assert!(dir.path().join("repo_standards_index.yaml.lock").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = project();
    let (code, out) = standards(dir.path(), &["build", "--dry-run"]);
    assert_eq!(code, 0);
    assert!(out.starts_with("validated "));
    assert!(!dir.path().join("repo_standards_index.yaml").exists());
}

#[test]
fn test_list_and_show() {
    let dir = built_project();
    let (code, out) = standards(dir.path(), &["list", "--category", "python_coding"]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 3);
    assert!(out.lines().any(|l| l == "python_coding-keep-functions-small-pure"));

    let (code, out) = standards(dir.path(), &["show", "python_coding-keep-functions-small-pure"]);
    assert_eq!(code, 0);
    assert!(out.contains("id: python_coding-keep-functions-small-pure"));

    let (code, out) = standards(dir.path(), &["show", "python_coding-missing"]);
    assert_eq!(code, 3);
    assert!(out.is_empty());
}

#[test]
fn test_search_alias() {
    let dir = built_project();
    let (code, out) = standards(dir.path(), &["grep", "PATHLIB"]);
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 1);
    assert!(out.starts_with("python_coding-prefer-pathlib"));
}

#[test]
fn test_missing_index_is_input_error() {
    let dir = project();
    let (code, _) = standards(dir.path(), &["list"]);
    assert_eq!(code, 2);
}

#[test]
fn test_diff_identical_snapshots_pass() {
    let dir = built_project();
    let index = dir.path().join("repo_standards_index.yaml");
    let index = index.to_str().unwrap();
    let (code, out) = standards(dir.path(), &["diff", index, index, "--format", "json"]);
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["integrity_hash_changed"], false);
    assert_eq!(value["changes"].as_array().unwrap().len(), 0);
}

#[test]
fn test_diff_missing_file_is_input_error() {
    let dir = built_project();
    let index = dir.path().join("repo_standards_index.yaml");
    let missing = dir.path().join("nope.yaml");
    let (code, _) = standards(
        dir.path(),
        &["diff", index.to_str().unwrap(), missing.to_str().unwrap()],
    );
    assert_eq!(code, 2);
}

#[test]
fn test_enforce_threshold() {
    let dir = built_project();
    write(dir.path(), "checks.toml", CHECKS_TOML);
    write(dir.path(), "src/util.py", "def f():\n    global counter\n");

    let (code, out) = standards(dir.path(), &["enforce", "--checks", "checks.toml"]);
    assert_eq!(code, 0);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["violations"].as_array().unwrap().len(), 1);
    assert_eq!(value["violations"][0]["line"], 2);

    let (code, _) = standards(
        dir.path(),
        &["enforce", "--checks", "checks.toml", "--fail-on", "info"],
    );
    assert_eq!(code, 1);
}

#[test]
fn test_enforce_threshold_from_project_config() {
    let dir = built_project();
    write(dir.path(), "checks.toml", CHECKS_TOML);
    write(dir.path(), "src/util.py", "def f():\n    global counter\n");
    write(
        dir.path(),
        "standards.toml",
        "[enforcement]\nchecks_file = \"checks.toml\"\nfail_on = \"info\"\n",
    );

    let (code, _) = standards(dir.path(), &["enforce"]);
    assert_eq!(code, 1);
    // the flag wins over the project file
    let (code, _) = standards(dir.path(), &["enforce", "--fail-on", "critical"]);
    assert_eq!(code, 0);
}

#[test]
fn test_console_report_file_is_plain() {
    let dir = built_project();
    write(dir.path(), "checks.toml", CHECKS_TOML);
    write(dir.path(), "src/util.py", "def f():\n    global counter\n");

    let (code, out) = standards(
        dir.path(),
        &["enforce", "--checks", "checks.toml", "--format", "console", "--out", "report.txt"],
    );
    assert_eq!(code, 0);
    assert!(out.is_empty());
    let text = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(text.contains("src/util.py:2"));
    assert!(!text.contains('\x1b'));
}

#[test]
fn test_enforce_rejects_bad_arguments() {
    let dir = built_project();
    let (code, _) = standards(dir.path(), &["enforce", "--format", "sarif"]);
    assert_eq!(code, 1);
    let (code, _) = standards(dir.path(), &["enforce", "--fail-on", "fatal"]);
    assert_eq!(code, 1);
}

#[test]
fn test_prompt_seed_to_file() {
    let dir = built_project();
    let seed = dir.path().join("seed.txt");
    let (code, out) = standards(
        dir.path(),
        &["prompt-seed", "--min-severity", "critical", "--out", seed.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(out.is_empty());
    let text = fs::read_to_string(seed).unwrap();
    assert!(text.starts_with("Integrity: "));
    assert!(text.contains("Category: Python Coding (python_coding)"));
    assert!(text.contains("[CRITICAL] python_coding-never-hardcode-secrets"));
}

#[test]
fn test_metrics_persists_hash() {
    let dir = built_project();
    let (code, out) = standards(dir.path(), &["metrics"]);
    assert_eq!(code, 0);
    assert!(out.contains("standards_integrity_hash_changed 0"));
    assert!(dir.path().join(".standards_metrics_state.json").exists());

    let (code, out) = standards(dir.path(), &["metrics", "--max-rule-counters", "0"]);
    assert_eq!(code, 1);
    assert!(out.is_empty());
}

#[test]
fn test_metrics_ingests_report_relative_to_root() {
    let dir = built_project();
    write(dir.path(), "checks.toml", CHECKS_TOML);
    write(dir.path(), "src/util.py", "def f():\n    global counter\n");
    let (code, _) = standards(
        dir.path(),
        &["enforce", "--checks", "checks.toml", "--out", "out/report.json"],
    );
    assert_eq!(code, 0);

    let (code, out) = standards(
        dir.path(),
        &["metrics", "--report", "out/report.json", "--min-severity", "info", "--no-persist"],
    );
    assert_eq!(code, 0);
    assert!(out.contains("standards_enforcement_runs_total 1\n"));
    assert!(out.contains(
        "standards_enforcement_violations_total_per_rule{rule_id=\"python_coding-keep-functions-small-pure\"} 1\n"
    ));
    assert!(!dir.path().join(".standards_metrics_state.json").exists());
}

#[test]
fn test_prompt_seed_defaults_to_error_threshold() {
    let cli = Cli::try_parse_from(["standards", "prompt-seed"]).unwrap();
    let Commands::PromptSeed(args) = cli.command else {
        panic!("expected prompt-seed");
    };
    assert_eq!(args.min_severity, standards_core::constants::DEFAULT_PROMPT_SEED_MIN_SEVERITY);
    assert_eq!(args.format, "text");
}
