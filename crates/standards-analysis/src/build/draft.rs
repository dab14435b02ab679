//! Loosely typed rule records as authored in seed documents and markers.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use standards_core::errors::ValidationIssue;
use standards_core::types::{Rule, RuleExamples, SourceRef};
use standards_core::Severity;

/// A rule as authored, before field presence and severity are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub category_ids: Option<Vec<String>>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub applies_to: Option<Vec<String>>,
    #[serde(default)]
    pub examples: Option<RuleExamples>,
    #[serde(default)]
    pub source: Option<SourceRef>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub superseded_by: Option<String>,
    #[serde(default)]
    pub enforcement_hint: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl RuleDraft {
    /// Resolve into a typed rule. `position` names id-less drafts in issues.
    pub fn resolve(self, position: usize) -> Result<Rule, Vec<ValidationIssue>> {
        let id = self
            .id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("<rule #{position}>"));
        let mut issues = Vec::new();
        let mut require = |value: Option<String>, field: &'static str| -> String {
            match value {
                Some(v) if !v.trim().is_empty() => v,
                _ => {
                    issues.push(ValidationIssue::MissingField {
                        id: id.clone(),
                        field,
                    });
                    String::new()
                }
            }
        };

        let rule_id = require(self.id, "id");
        let summary = require(self.summary, "summary");
        let rationale = require(self.rationale, "rationale");
        let last_updated = require(self.last_updated, "last_updated");
        let raw_severity = require(self.severity, "severity");
        if self.source.is_none() {
            issues.push(ValidationIssue::MissingField {
                id: id.clone(),
                field: "source",
            });
        }
        let category_ids = self.category_ids.unwrap_or_default();
        let applies_to = self.applies_to.unwrap_or_default();

        let severity = if raw_severity.is_empty() {
            None
        } else {
            match Severity::from_str(&raw_severity) {
                Ok(s) => Some(s),
                Err(_) => {
                    issues.push(ValidationIssue::InvalidSeverity {
                        id: id.clone(),
                        value: raw_severity,
                    });
                    None
                }
            }
        };

        match (severity, self.source) {
            (Some(severity), Some(source)) if issues.is_empty() => Ok(Rule {
                id: rule_id,
                category_ids,
                summary,
                rationale,
                severity,
                applies_to,
                examples: self.examples,
                source,
                deprecated: self.deprecated,
                superseded_by: self.superseded_by,
                enforcement_hint: self.enforcement_hint,
                last_updated,
            }),
            _ => Err(issues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> RuleDraft {
        RuleDraft {
            id: Some("docs-rule".into()),
            category_ids: Some(vec!["docs".into()]),
            summary: Some("Keep docs current".into()),
            rationale: Some("Stale docs mislead".into()),
            severity: Some("warn".into()),
            applies_to: Some(vec!["**/*.md".into()]),
            source: Some(SourceRef {
                file: "docs/a.md".into(),
                anchor: "a".into(),
            }),
            last_updated: Some("2025-01-01".into()),
            ..RuleDraft::default()
        }
    }

    #[test]
    fn complete_draft_resolves() {
        let rule = complete().resolve(0).unwrap();
        assert_eq!(rule.severity, Severity::Warn);
        assert!(!rule.deprecated);
    }

    #[test]
    fn invalid_severity_and_missing_fields_are_reported_together() {
        let mut draft = complete();
        draft.severity = Some("urgent".into());
        draft.rationale = None;
        let issues = draft.resolve(3).unwrap_err();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.rule_id() == "docs-rule"));
        assert!(issues.iter().any(|i| i.field() == "severity"));
        assert!(issues.iter().any(|i| i.field() == "rationale"));
    }

    #[test]
    fn id_less_draft_is_named_by_position() {
        let mut draft = complete();
        draft.id = None;
        let issues = draft.resolve(7).unwrap_err();
        assert_eq!(issues[0].rule_id(), "<rule #7>");
    }
}
