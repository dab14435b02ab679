//! Structural validation of the final rule set.
//!
//! All fatal issues are collected before failing so one run reports every
//! problem. Soft issues come back as warnings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use standards_core::constants::{MAX_SUMMARY_CHARS, RESERVED_SUPERSEDED_BY};
use standards_core::errors::{BuildWarning, ValidationError, ValidationIssue};
use standards_core::types::{CategoryMeta, Rule};

use crate::extraction::ids::is_valid_id;

/// Validate `rules`. `prior` carries issues found while resolving drafts.
pub fn validate_rules(
    rules: &[Rule],
    categories: &BTreeMap<String, CategoryMeta>,
    prior: Vec<ValidationIssue>,
) -> Result<Vec<BuildWarning>, ValidationError> {
    let mut issues = prior;
    let mut warnings = Vec::new();
    let ids: FxHashSet<&str> = rules.iter().map(|r| r.id.as_str()).collect();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for rule in rules {
        let id = rule.id.clone();
        if !seen.insert(rule.id.as_str()) {
            issues.push(ValidationIssue::DuplicateId { id: id.clone() });
        }
        if !is_valid_id(&rule.id) {
            issues.push(ValidationIssue::MalformedId { id: id.clone() });
        }
        if rule.category_ids.is_empty() {
            issues.push(ValidationIssue::EmptyCategories { id: id.clone() });
        }
        for category in &rule.category_ids {
            if !categories.contains_key(category) {
                issues.push(ValidationIssue::UnknownCategory {
                    id: id.clone(),
                    category: category.clone(),
                });
            }
        }
        if rule.applies_to.is_empty() || rule.applies_to.iter().any(|g| g.trim().is_empty()) {
            issues.push(ValidationIssue::EmptyAppliesTo { id: id.clone() });
        }
        if rule.examples.as_ref().is_some_and(|e| e.is_empty()) {
            issues.push(ValidationIssue::EmptyExamples { id: id.clone() });
        }

        match (&rule.superseded_by, rule.deprecated) {
            (None, true) => issues.push(ValidationIssue::MissingSupersededBy { id: id.clone() }),
            (Some(target), true) => {
                let reserved = RESERVED_SUPERSEDED_BY.contains(&target.as_str());
                if !reserved && (!ids.contains(target.as_str()) || target == &rule.id) {
                    issues.push(ValidationIssue::InvalidSupersededBy {
                        id: id.clone(),
                        target: target.clone(),
                    });
                }
            }
            (Some(_), false) => {
                warnings.push(BuildWarning::SupersededWithoutDeprecation { id: id.clone() })
            }
            (None, false) => {}
        }

        let chars = rule.summary.chars().count();
        if chars > MAX_SUMMARY_CHARS {
            warnings.push(BuildWarning::SummaryTooLong { id: id.clone(), chars });
        }
        if NaiveDate::parse_from_str(&rule.last_updated, "%Y-%m-%d").is_err() {
            warnings.push(BuildWarning::InvalidDate {
                id,
                value: rule.last_updated.clone(),
            });
        }
    }

    if issues.is_empty() {
        Ok(warnings)
    } else {
        for issue in &issues {
            tracing::error!(rule_id = issue.rule_id(), field = issue.field(), "{issue}");
        }
        Err(ValidationError::Failed { issues })
    }
}
