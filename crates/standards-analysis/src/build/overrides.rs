//! Id-keyed overrides layered onto generated rules.
//!
//! Present fields replace; `add_*` fields extend lists without duplicates.
//! Overrides never invent ids.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use standards_core::errors::{BuildWarning, OverrideError};
use standards_core::types::{CategoryMeta, Rule, RuleExamples};
use standards_core::Severity;

use crate::document::read_optional;

/// A partial-record patch for one rule id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_category_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_applies_to: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<RuleExamples>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Overrides are a bare list or wrapped under `overrides:`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OverridesDocument {
    List(Vec<OverrideEntry>),
    Wrapped { overrides: Vec<OverrideEntry> },
}

/// Load override entries. An absent or empty file yields none.
pub fn load_overrides(path: &Path) -> Result<Vec<OverrideEntry>, OverrideError> {
    let doc: Option<OverridesDocument> =
        read_optional(path).map_err(|message| OverrideError::Parse {
            path: path.display().to_string(),
            message,
        })?;
    Ok(match doc {
        Some(OverridesDocument::List(entries)) => entries,
        Some(OverridesDocument::Wrapped { overrides }) => overrides,
        None => Vec::new(),
    })
}

/// What applying overrides produced besides the patched rules.
#[derive(Debug, Default)]
pub struct OverrideOutcome {
    pub applied: usize,
    pub warnings: Vec<BuildWarning>,
    /// Ids whose `last_updated` was set explicitly by an override.
    pub dated: FxHashSet<String>,
}

/// Apply `entries` in order. Unknown ids are skipped with a warning;
/// unknown categories and invalid severities are fatal.
pub fn apply_overrides(
    rules: &mut [Rule],
    entries: &[OverrideEntry],
    categories: &BTreeMap<String, CategoryMeta>,
) -> Result<OverrideOutcome, OverrideError> {
    let mut positions: FxHashMap<String, usize> = FxHashMap::default();
    for (i, rule) in rules.iter().enumerate() {
        positions.entry(rule.id.clone()).or_insert(i);
    }

    let mut outcome = OverrideOutcome::default();
    for entry in entries {
        let Some(&pos) = positions.get(&entry.id) else {
            tracing::warn!(id = %entry.id, "override for unknown rule id skipped");
            outcome.warnings.push(BuildWarning::UnknownOverrideId {
                id: entry.id.clone(),
            });
            continue;
        };
        apply_entry(&mut rules[pos], entry, categories)?;
        if entry.last_updated.is_some() {
            outcome.dated.insert(entry.id.clone());
        }
        outcome.applied += 1;
    }
    Ok(outcome)
}

fn apply_entry(
    rule: &mut Rule,
    entry: &OverrideEntry,
    categories: &BTreeMap<String, CategoryMeta>,
) -> Result<(), OverrideError> {
    let check_categories = |ids: &[String]| -> Result<(), OverrideError> {
        match ids.iter().find(|c| !categories.contains_key(*c)) {
            Some(unknown) => Err(OverrideError::UnknownCategory {
                id: entry.id.clone(),
                category: unknown.clone(),
            }),
            None => Ok(()),
        }
    };

    if let Some(ids) = &entry.category_ids {
        check_categories(ids)?;
        rule.category_ids = ids.clone();
    }
    if let Some(ids) = &entry.add_category_ids {
        check_categories(ids)?;
        extend_unique(&mut rule.category_ids, ids);
    }
    if let Some(raw) = &entry.severity {
        rule.severity = Severity::from_str(raw).map_err(|message| OverrideError::InvalidField {
            id: entry.id.clone(),
            field: "severity",
            message,
        })?;
    }
    if let Some(v) = &entry.summary {
        rule.summary = v.clone();
    }
    if let Some(v) = &entry.rationale {
        rule.rationale = v.clone();
    }
    if let Some(v) = &entry.applies_to {
        rule.applies_to = v.clone();
    }
    if let Some(v) = &entry.add_applies_to {
        extend_unique(&mut rule.applies_to, v);
    }
    if let Some(v) = &entry.examples {
        rule.examples = Some(v.clone());
    }
    if let Some(v) = entry.deprecated {
        rule.deprecated = v;
    }
    if let Some(v) = &entry.superseded_by {
        rule.superseded_by = Some(v.clone());
    }
    if let Some(v) = &entry.enforcement_hint {
        rule.enforcement_hint = Some(v.clone());
    }
    if let Some(v) = &entry.last_updated {
        rule.last_updated = v.clone();
    }
    Ok(())
}

fn extend_unique(target: &mut Vec<String>, extra: &[String]) {
    for item in extra {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}
