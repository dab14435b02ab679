//! Rule extraction from governance documents.
//!
//! Per document: explicit markers first (they claim their lines and ids),
//! then segmentation → detection → normalization/classification → dedup →
//! id generation over the remaining lines.

pub mod classify;
pub mod dedup;
pub mod detector;
pub mod ids;
pub mod lexicon;
pub mod markers;
pub mod normalize;
pub mod segment;
pub mod slug;

use std::path::Path;

use rustc_hash::FxHashSet;
use standards_core::errors::BuildWarning;
use standards_core::types::{Rule, SourceRef};
use standards_core::Severity;

pub use detector::{Candidate, CandidateKind};
pub use markers::ExplicitRule;

use dedup::Deduplicator;

/// A heuristically extracted rule with its detection context.
#[derive(Debug, Clone)]
pub struct ExtractedRule {
    pub rule: Rule,
    pub line: usize,
    pub raw_text: String,
}

/// Everything one document contributed.
#[derive(Debug, Default)]
pub struct DocumentExtraction {
    pub heuristic: Vec<ExtractedRule>,
    pub explicit: Vec<ExplicitRule>,
    pub warnings: Vec<BuildWarning>,
}

impl DocumentExtraction {
    pub fn total(&self) -> usize {
        self.heuristic.len() + self.explicit.len()
    }
}

/// Extraction state threaded through one build: the id set and dedup keys.
#[derive(Debug)]
pub struct Extractor {
    used_ids: FxHashSet<String>,
    dedup: Deduplicator,
    today: String,
}

impl Extractor {
    /// `today` is the `YYYY-MM-DD` stamp for newly extracted rules.
    pub fn new(today: impl Into<String>) -> Self {
        Self {
            used_ids: FxHashSet::default(),
            dedup: Deduplicator::new(),
            today: today.into(),
        }
    }

    /// Extract rules from one source document.
    pub fn extract(&mut self, file: &str, text: &str, categories: &[String]) -> DocumentExtraction {
        let scan = markers::scan_markers(text, file, categories, &self.today, &mut self.used_ids);
        let stem = Path::new(file)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let primary = categories.iter().min().cloned().unwrap_or_default();

        let mut heuristic = Vec::new();
        for block in segment::segment(text, &stem, &scan.consumed) {
            for candidate in detector::detect(&block, file) {
                if let Some(extracted) = self.candidate_to_rule(candidate, categories, &primary) {
                    heuristic.push(extracted);
                }
            }
        }

        tracing::debug!(
            source_path = file,
            heuristic = heuristic.len(),
            explicit = scan.rules.len(),
            "extracted rules"
        );

        DocumentExtraction {
            heuristic,
            explicit: scan.rules,
            warnings: scan.warnings,
        }
    }

    fn candidate_to_rule(
        &mut self,
        candidate: Candidate,
        categories: &[String],
        primary: &str,
    ) -> Option<ExtractedRule> {
        let normalized = normalize::normalize(&candidate.raw_text, candidate.next_sentence.as_deref());
        if normalized.summary.is_empty() || !self.dedup.admit(&normalized.summary, &candidate.file) {
            return None;
        }
        let severity: Severity = classify::classify_severity(&normalized.full_text);
        let applies_to = classify::guess_scope(&normalized.full_text);
        let id = ids::generate_id(&ids::base_id(&normalized.summary, primary), &mut self.used_ids);

        Some(ExtractedRule {
            rule: Rule {
                id,
                category_ids: categories.to_vec(),
                summary: normalized.summary,
                rationale: normalized.rationale,
                severity,
                applies_to,
                examples: None,
                source: SourceRef {
                    file: candidate.file,
                    anchor: candidate.anchor,
                },
                deprecated: false,
                superseded_by: None,
                enforcement_hint: None,
                last_updated: self.today.clone(),
            },
            line: candidate.line,
            raw_text: candidate.raw_text,
        })
    }
}
