//! The persisted rule record.

use serde::{Deserialize, Serialize};

use super::Severity;

/// Provenance of a rule: source document and heading anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub file: String,
    pub anchor: String,
}

/// Optional bad/good illustrations. At least one must be set when present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleExamples {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good: Option<String>,
}

impl RuleExamples {
    pub fn is_empty(&self) -> bool {
        self.bad.is_none() && self.good.is_none()
    }
}

/// A normalized, persisted directive with a stable id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub category_ids: Vec<String>,
    pub summary: String,
    pub rationale: String,
    pub severity: Severity,
    pub applies_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<RuleExamples>,
    pub source: SourceRef,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement_hint: Option<String>,
    /// `YYYY-MM-DD`.
    pub last_updated: String,
}

impl Rule {
    /// Smallest category id, the primary sort key of the index.
    pub fn primary_category(&self) -> &str {
        self.category_ids
            .iter()
            .map(String::as_str)
            .min()
            .unwrap_or("")
    }

    /// The `{id}|{last_updated}|{severity}` fragment hashed into the index.
    pub fn integrity_fragment(&self) -> String {
        format!("{}|{}|{}", self.id, self.last_updated, self.severity)
    }
}
