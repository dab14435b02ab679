//! Collapses repeated candidates within a source file.

use rustc_hash::FxHashSet;

const STOPWORDS: &[&str] = &["a", "an", "the", "to", "for", "of", "and", "or"];

/// Lowercased summary without stopwords, joined with the source file.
pub fn dedup_key(summary: &str, file: &str) -> String {
    let words: Vec<String> = summary
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .collect();
    format!("{}|{file}", words.join(" "))
}

/// First occurrence wins; later candidates with the same key are dropped.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: FxHashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if this is the first candidate with this key.
    pub fn admit(&mut self, summary: &str, file: &str) -> bool {
        self.seen.insert(dedup_key(summary, file))
    }
}
