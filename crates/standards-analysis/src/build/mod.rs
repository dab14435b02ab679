//! Index build: sources → extraction → seed/overrides merge → validation →
//! assembly → atomic write.
//!
//! The whole rule list is computed in memory; nothing is written unless
//! every step succeeds, so a failed build leaves the prior index untouched.

pub mod draft;
pub mod index_builder;
pub mod overrides;
pub mod seed;
pub mod sources;
pub mod validate;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rustc_hash::{FxHashMap, FxHashSet};
use standards_core::config::BuildConfig;
use standards_core::errors::{BuildError, BuildWarning, IndexError, ValidationIssue};
use standards_core::{Index, Rule};

use crate::document;
use crate::extraction::Extractor;

pub use index_builder::{integrity_hash, sha256_hex, sort_rules};

/// One build invocation. `now` stamps `generated_at`, `version` and new dates.
#[derive(Debug, Clone, Copy)]
pub struct BuildRequest<'a> {
    pub root: &'a Path,
    pub config: &'a BuildConfig,
    pub now: DateTime<Utc>,
}

impl<'a> BuildRequest<'a> {
    pub fn new(root: &'a Path, config: &'a BuildConfig) -> Self {
        Self {
            root,
            config,
            now: Utc::now(),
        }
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(self.config.effective_index_path())
    }

    fn today(&self) -> String {
        self.now.date_naive().format("%Y-%m-%d").to_string()
    }
}

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub index: Index,
    pub warnings: Vec<BuildWarning>,
    pub index_path: PathBuf,
}

impl BuildReport {
    /// One-line human summary.
    pub fn summary_line(&self) -> String {
        format!(
            "{} rules, {} warnings, hash {}",
            self.index.rules.len(),
            self.warnings.len(),
            short_hash(&self.index.integrity_hash)
        )
    }
}

pub(crate) fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(12)]
}

/// Build the index in memory without writing it.
pub fn build_index(req: &BuildRequest<'_>) -> Result<BuildReport, BuildError> {
    let today = req.today();
    let categories_path = req.root.join(req.config.effective_categories_file());
    let categories = sources::load_categories(&categories_path)?;
    let metas = categories.category_metas();
    let index_path = req.index_path();
    let previous = load_previous(&index_path);

    let mut warnings: Vec<BuildWarning> = Vec::new();
    let mut missing_sections = Vec::new();
    let mut issues: Vec<ValidationIssue> = Vec::new();
    let mut rules: Vec<Rule> = Vec::new();
    // Ids whose last_updated is the build stamp rather than authored.
    let mut stamped: FxHashSet<String> = FxHashSet::default();
    let mut extractor = Extractor::new(today);
    let mut position = 0usize;

    for source in &categories.sources {
        let text = match sources::read_source(req.root, &source.path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(source_path = %source.path, error = %err, "skipping unreadable source");
                warnings.push(BuildWarning::from(&err));
                missing_sections.push(source.path.clone());
                continue;
            }
        };
        let doc = extractor.extract(&source.path, &text, &source.categories);
        if doc.total() == 0 {
            tracing::warn!(source_path = %source.path, "no candidates found");
            warnings.push(BuildWarning::NoCandidates {
                path: source.path.clone(),
            });
            missing_sections.push(source.path.clone());
        }
        warnings.extend(doc.warnings);
        for explicit in doc.explicit {
            position += 1;
            match explicit.draft.resolve(position) {
                Ok(rule) => {
                    stamped.insert(rule.id.clone());
                    rules.push(rule);
                }
                Err(mut found) => issues.append(&mut found),
            }
        }
        for extracted in doc.heuristic {
            stamped.insert(extracted.rule.id.clone());
            rules.push(extracted.rule);
        }
    }

    let seed_drafts = seed::load_seed(&req.root.join(req.config.effective_seed_file()))?;
    let mut seed_ids: FxHashSet<String> = FxHashSet::default();
    for draft in seed_drafts {
        position += 1;
        match draft.resolve(position) {
            Ok(rule) => merge_seed_rule(&mut rules, rule, &mut seed_ids, &mut stamped),
            Err(mut found) => issues.append(&mut found),
        }
    }

    let overrides_rel = req.config.effective_overrides_file();
    let entries = overrides::load_overrides(&req.root.join(&overrides_rel))?;
    let outcome = overrides::apply_overrides(&mut rules, &entries, &metas)?;
    tracing::debug!(
        applied = outcome.applied,
        skipped = outcome.warnings.len(),
        "applied overrides"
    );
    warnings.extend(outcome.warnings);
    for id in &outcome.dated {
        stamped.remove(id);
    }

    if let Some(prev) = &previous {
        carry_forward_dates(&mut rules, prev, &stamped);
    }

    warnings.extend(validate::validate_rules(&rules, &metas, issues)?);
    for warning in &warnings {
        tracing::warn!("{warning}");
    }

    let index = index_builder::assemble(
        rules,
        index_builder::AssembleInput {
            categories: &categories,
            now: req.now,
            missing_sections,
            overrides_file: overrides_rel.display().to_string(),
            notes: warnings.iter().map(ToString::to_string).collect(),
        },
    );
    tracing::info!(
        rules = index.rules.len(),
        hash = %short_hash(&index.integrity_hash),
        "built index"
    );

    Ok(BuildReport {
        index,
        warnings,
        index_path,
    })
}

/// Build, then atomically replace the persisted index.
pub fn build_index_and_write(req: &BuildRequest<'_>) -> Result<BuildReport, BuildError> {
    let report = build_index(req)?;
    document::write_index(&report.index_path, &report.index)?;
    tracing::info!(
        path = %report.index_path.display(),
        rules = report.index.rules.len(),
        hash = %short_hash(&report.index.integrity_hash),
        "wrote index"
    );
    Ok(report)
}

fn load_previous(path: &Path) -> Option<Index> {
    match document::load_index(path) {
        Ok(index) => Some(index),
        Err(IndexError::NotFound { .. }) => None,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable previous index");
            None
        }
    }
}

/// Seed rules replace generated rules with the same id, else are appended.
fn merge_seed_rule(
    rules: &mut Vec<Rule>,
    rule: Rule,
    seed_ids: &mut FxHashSet<String>,
    stamped: &mut FxHashSet<String>,
) {
    let first_seed = seed_ids.insert(rule.id.clone());
    if first_seed {
        if let Some(existing) = rules.iter_mut().find(|r| r.id == rule.id) {
            tracing::debug!(id = %rule.id, "seed rule replaces extracted rule");
            stamped.remove(&rule.id);
            *existing = rule;
            return;
        }
    }
    rules.push(rule);
}

/// Keep the prior `last_updated` for build-stamped rules whose summary and
/// severity are unchanged, so rebuilds on later days stay idempotent.
fn carry_forward_dates(rules: &mut [Rule], previous: &Index, stamped: &FxHashSet<String>) {
    let prior: FxHashMap<&str, &Rule> = previous
        .rules
        .iter()
        .map(|r| (r.id.as_str(), r))
        .collect();
    for rule in rules.iter_mut().filter(|r| stamped.contains(&r.id)) {
        if let Some(old) = prior.get(rule.id.as_str()) {
            if old.summary == rule.summary && old.severity == rule.severity {
                rule.last_updated = old.last_updated.clone();
            }
        }
    }
}
