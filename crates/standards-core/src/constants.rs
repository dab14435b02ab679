//! Shared constants for the standards index pipeline.

/// Schema version stamped into every built index.
pub const SCHEMA_VERSION: u32 = 1;

/// Project configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "standards.toml";

/// Default categories/sources mapping document.
pub const DEFAULT_CATEGORIES_FILE: &str = ".repo_studios/standards_categories.yaml";

/// Default curated seed rules document.
pub const DEFAULT_SEED_FILE: &str = ".repo_studios/standards_seed.yaml";

/// Default overrides document.
pub const DEFAULT_OVERRIDES_FILE: &str = ".repo_studios/standards_index_overrides.yaml";

/// Default persisted index path.
pub const DEFAULT_INDEX_PATH: &str = "repo_standards_index.yaml";

/// Name recorded as `metadata.build_script`.
pub const BUILD_SCRIPT_NAME: &str = "standards build";

/// Maximum summary length in characters.
pub const MAX_SUMMARY_CHARS: usize = 100;

/// Minimum candidate length in characters (critical directives are exempt).
pub const MIN_CANDIDATE_CHARS: usize = 15;

/// Maximum number of summary words used for an id.
pub const ID_MAX_WORDS: usize = 8;

/// Uppercase share above which a candidate is treated as an acronym blob.
pub const UPPERCASE_BLOB_RATIO: f64 = 0.65;

/// Reserved `superseded_by` values that need not reference an existing rule.
pub const RESERVED_SUPERSEDED_BY: &[&str] = &["_retired", "_tbd"];

/// Default minimum severity for per-rule metric series.
pub const DEFAULT_METRICS_MIN_SEVERITY: &str = "error";

/// Default cap on distinct per-rule metric series.
pub const DEFAULT_MAX_RULE_COUNTERS: usize = 50;

/// Default metrics state file.
pub const DEFAULT_METRICS_STATE_FILE: &str = ".standards_metrics_state.json";

/// Default maximum number of enforcement checks per run.
pub const DEFAULT_MAX_CHECKS: usize = 64;

/// Default minimum severity for prompt seeds.
pub const DEFAULT_PROMPT_SEED_MIN_SEVERITY: &str = "error";

/// Inline suppression marker for enforcement findings.
pub const SUPPRESSION_MARKER: &str = "standards-ignore";
