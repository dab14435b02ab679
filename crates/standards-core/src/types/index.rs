//! The full persisted index document.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryMeta, Rule, Severity, SourceEntry};

/// Per-source build statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStats {
    pub total_rules: usize,
    pub last_scanned: DateTime<Utc>,
}

/// Coverage recomputed on every build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    #[serde(default)]
    pub source_stats: BTreeMap<String, SourceStats>,
    #[serde(default)]
    pub missing_sections: Vec<String>,
}

/// Build provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub build_script: String,
    #[serde(default)]
    pub overrides_file: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// The persisted standards index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    pub schema_version: u32,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub offline: bool,
    pub integrity_hash: String,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryMeta>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Coverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Index {
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Rule counts per severity, every severity present (possibly zero).
    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        for rule in &self.rules {
            *counts.entry(rule.severity).or_insert(0) += 1;
        }
        counts
    }
}
