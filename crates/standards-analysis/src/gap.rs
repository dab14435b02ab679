//! Gap detection: directives in the live sources with no rule in the index.
//!
//! Advisory only. Re-runs extraction without seed or overrides and subtracts
//! ids already present in the index.

use std::collections::BTreeMap;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use standards_core::errors::BuildWarning;
use standards_core::types::CategoriesDocument;
use standards_core::{Index, Severity};

use crate::build::sources::read_source;
use crate::extraction::Extractor;

/// A detected directive whose derived id is absent from the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapCandidate {
    pub id: String,
    pub file: String,
    pub anchor: String,
    pub line: usize,
    pub text: String,
    pub severity: Severity,
}

#[derive(Debug, Default)]
pub struct GapReport {
    pub candidates: Vec<GapCandidate>,
    pub warnings: Vec<BuildWarning>,
}

/// Scan every configured source under `root` against `index`.
pub fn detect_gaps(root: &Path, categories: &CategoriesDocument, index: &Index, today: &str) -> GapReport {
    let known: FxHashSet<&str> = index.rules.iter().map(|r| r.id.as_str()).collect();
    let mut extractor = Extractor::new(today);
    let mut report = GapReport::default();

    for source in &categories.sources {
        let text = match read_source(root, &source.path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(source_path = %source.path, error = %err, "skipping unreadable source");
                report.warnings.push(BuildWarning::from(&err));
                continue;
            }
        };
        let doc = extractor.extract(&source.path, &text, &source.categories);
        report.candidates.extend(
            doc.heuristic
                .into_iter()
                .filter(|e| !known.contains(e.rule.id.as_str()))
                .map(|e| GapCandidate {
                    id: e.rule.id,
                    file: e.rule.source.file,
                    anchor: e.rule.source.anchor,
                    line: e.line,
                    text: e.raw_text,
                    severity: e.rule.severity,
                }),
        );
    }
    report
}

impl GapReport {
    /// One JSON object per line.
    pub fn to_ndjson(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for candidate in &self.candidates {
            out.push_str(&serde_json::to_string(candidate)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Candidates grouped by file, in file order.
    pub fn by_file(&self) -> BTreeMap<&str, Vec<&GapCandidate>> {
        let mut grouped: BTreeMap<&str, Vec<&GapCandidate>> = BTreeMap::new();
        for c in &self.candidates {
            grouped.entry(c.file.as_str()).or_default().push(c);
        }
        grouped
    }

    /// Per-file text listing, at most `max_per_file` lines each.
    pub fn render_text(&self, max_per_file: usize) -> String {
        let mut out = String::new();
        for (file, items) in self.by_file() {
            out.push_str(&format!("{file}: {} candidates\n", items.len()));
            for item in items.iter().take(max_per_file) {
                out.push_str(&format!("  L{:>4} | {}\n", item.line, item.text.trim()));
            }
            if items.len() > max_per_file {
                out.push_str(&format!("  ... (+{} more)\n", items.len() - max_per_file));
            }
        }
        out
    }

    /// Log a per-file summary.
    pub fn log_summary(&self) {
        if self.candidates.is_empty() {
            tracing::info!("no candidate gaps detected");
            return;
        }
        for (file, items) in self.by_file() {
            tracing::info!(source_path = file, candidates = items.len(), "gap candidates");
        }
        tracing::info!(total = self.candidates.len(), "total candidate directives");
    }
}
