//! Rule-level diff between two index snapshots.
//!
//! Pure set/map comparison keyed by id; no fuzzy matching.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use standards_core::{Index, Rule, Severity};

/// Kinds of rule-level change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Removed,
    SeverityChanged,
    RationaleChanged,
    SummaryChanged,
    AppliesChanged,
    CategoriesChanged,
    OtherChanged,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 8] = [
        Self::Added,
        Self::Removed,
        Self::SeverityChanged,
        Self::RationaleChanged,
        Self::SummaryChanged,
        Self::AppliesChanged,
        Self::CategoriesChanged,
        Self::OtherChanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::SeverityChanged => "severity_changed",
            Self::RationaleChanged => "rationale_changed",
            Self::SummaryChanged => "summary_changed",
            Self::AppliesChanged => "applies_changed",
            Self::CategoriesChanged => "categories_changed",
            Self::OtherChanged => "other_changed",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown change kind '{s}'"))
    }
}

/// One change for one rule id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleChange {
    pub id: String,
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Severity>,
}

/// Full diff report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDiff {
    pub integrity_hash_old: String,
    pub integrity_hash_new: String,
    pub integrity_hash_changed: bool,
    pub changes: Vec<RuleChange>,
    pub summary: BTreeMap<ChangeKind, usize>,
}

impl IndexDiff {
    fn ids_of(&self, kind: ChangeKind) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|c| c.kind == kind)
            .map(|c| c.id.as_str())
            .collect()
    }

    /// Ids present only in the new snapshot.
    pub fn added(&self) -> Vec<&str> {
        self.ids_of(ChangeKind::Added)
    }

    /// Ids present only in the old snapshot.
    pub fn removed(&self) -> Vec<&str> {
        self.ids_of(ChangeKind::Removed)
    }

    /// `(id, old, new)` for rules whose severity changed.
    pub fn severity_changed(&self) -> Vec<(&str, Severity, Severity)> {
        self.changes
            .iter()
            .filter(|c| c.kind == ChangeKind::SeverityChanged)
            .filter_map(|c| Some((c.id.as_str(), c.from?, c.to?)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Human-readable table.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        if self.integrity_hash_changed {
            out.push_str(&format!(
                "Integrity hash changed: {} -> {}\n",
                self.integrity_hash_old, self.integrity_hash_new
            ));
        }
        if self.changes.is_empty() {
            out.push_str("No rule changes detected\n");
            return out;
        }
        out.push_str("Rule-level changes:\n");
        for change in &self.changes {
            out.push_str(&format!(" - {}: {}", change.id, change.kind));
            if let (Some(from), Some(to)) = (change.from, change.to) {
                out.push_str(&format!(" ({from} -> {to})"));
            }
            out.push('\n');
        }
        out.push_str("Summary:\n");
        for (kind, count) in &self.summary {
            out.push_str(&format!(" * {kind}: {count}\n"));
        }
        out
    }
}

/// Compare two snapshots.
pub fn diff_indexes(old: &Index, new: &Index) -> IndexDiff {
    let old_rules: BTreeMap<&str, &Rule> = old.rules.iter().map(|r| (r.id.as_str(), r)).collect();
    let new_rules: BTreeMap<&str, &Rule> = new.rules.iter().map(|r| (r.id.as_str(), r)).collect();
    let all_ids: BTreeSet<&str> = old_rules.keys().chain(new_rules.keys()).copied().collect();

    let mut changes = Vec::new();
    for id in all_ids {
        classify(id, old_rules.get(id).copied(), new_rules.get(id).copied(), &mut changes);
    }
    let mut summary = BTreeMap::new();
    for change in &changes {
        *summary.entry(change.kind).or_insert(0) += 1;
    }

    IndexDiff {
        integrity_hash_old: old.integrity_hash.clone(),
        integrity_hash_new: new.integrity_hash.clone(),
        integrity_hash_changed: old.integrity_hash != new.integrity_hash,
        changes,
        summary,
    }
}

fn change(id: &str, kind: ChangeKind) -> RuleChange {
    RuleChange {
        id: id.to_string(),
        kind,
        from: None,
        to: None,
    }
}

fn classify(id: &str, old: Option<&Rule>, new: Option<&Rule>, out: &mut Vec<RuleChange>) {
    let (old, new) = match (old, new) {
        (None, Some(_)) => return out.push(change(id, ChangeKind::Added)),
        (Some(_), None) => return out.push(change(id, ChangeKind::Removed)),
        (Some(o), Some(n)) => (o, n),
        (None, None) => return,
    };

    if old.severity != new.severity {
        out.push(RuleChange {
            from: Some(old.severity),
            to: Some(new.severity),
            ..change(id, ChangeKind::SeverityChanged)
        });
    }
    if old.rationale != new.rationale {
        out.push(change(id, ChangeKind::RationaleChanged));
    }
    if old.summary != new.summary {
        out.push(change(id, ChangeKind::SummaryChanged));
    }
    if as_set(&old.applies_to) != as_set(&new.applies_to) {
        out.push(change(id, ChangeKind::AppliesChanged));
    }
    if as_set(&old.category_ids) != as_set(&new.category_ids) {
        out.push(change(id, ChangeKind::CategoriesChanged));
    }
    let other_differs = old.examples != new.examples
        || old.source != new.source
        || old.deprecated != new.deprecated
        || old.superseded_by != new.superseded_by
        || old.enforcement_hint != new.enforcement_hint;
    if other_differs {
        out.push(change(id, ChangeKind::OtherChanged));
    }
}

fn as_set(items: &[String]) -> BTreeSet<&str> {
    items.iter().map(String::as_str).collect()
}

/// Parsed `--fail-on` policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailPolicy {
    Any,
    Kinds(BTreeSet<ChangeKind>),
}

impl FailPolicy {
    /// `any` or a comma list of kinds. Unknown kinds are warned about and dropped.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "any" {
            return Self::Any;
        }
        let mut kinds = BTreeSet::new();
        for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.parse::<ChangeKind>() {
                Ok(kind) => {
                    kinds.insert(kind);
                }
                Err(_) => tracing::warn!(kind = part, "ignoring unknown fail-on kind"),
            }
        }
        Self::Kinds(kinds)
    }

    /// Whether the diff trips this policy.
    pub fn should_fail(&self, diff: &IndexDiff) -> bool {
        match self {
            Self::Any => !diff.changes.is_empty(),
            Self::Kinds(kinds) => diff.changes.iter().any(|c| kinds.contains(&c.kind)),
        }
    }
}
