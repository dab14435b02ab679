//! Candidate detection: ordered line matchers over a segmented block.
//!
//! Matchers, in order: table row, bullet/checklist line, directive sentence.

use std::sync::LazyLock;

use regex::Regex;
use standards_core::constants::{MIN_CANDIDATE_CHARS, UPPERCASE_BLOB_RATIO};

use super::classify::is_critical;
use super::lexicon::{colon_directive, contains_action_verb, leading_directive};
use super::normalize::clean;
use super::segment::{Block, Line};

static BULLET_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*+]\s+(?:\[[ xX]\]\s+)?|\[[ xX]\]\s+)(?P<text>\S.*)$").ok()
});

static TABLE_SEPARATOR_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\|?\s*:?-{3,}:?\s*(?:\|\s*:?-{3,}:?\s*)*\|?$").ok());

const FORMATTING_PREFIXES: &[&str] = &["table", "image", "see "];
const TABLE_HEADER_PREFIXES: &[&str] = &["pattern", "directive", "rule"];

/// Which matcher produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
    Bullet,
    Sentence,
    TableRow,
}

/// A transient directive detection. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub raw_text: String,
    pub file: String,
    pub anchor: String,
    pub block_heading: Option<String>,
    pub line: usize,
    pub next_sentence: Option<String>,
    pub kind: CandidateKind,
}

/// Table state within a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    None,
    /// Inside a table; the flag says whether the header is directive-like.
    Rows(bool),
}

/// Scan one block for candidates.
pub fn detect(block: &Block, file: &str) -> Vec<Candidate> {
    let mut out = Vec::new();
    let mut table = TableState::None;
    let lines = &block.lines;

    for (pos, line) in lines.iter().enumerate() {
        let trimmed = line.text.trim();
        if trimmed.is_empty() {
            table = TableState::None;
            continue;
        }

        if trimmed.starts_with('|') {
            table = match table {
                TableState::None => TableState::Rows(header_is_directive(trimmed)),
                TableState::Rows(directive) => {
                    if directive && !is_table_separator(trimmed) {
                        if let Some(c) = table_candidate(trimmed) {
                            out.push(make(block, file, line, c.0, c.1, CandidateKind::TableRow));
                        }
                    }
                    TableState::Rows(directive)
                }
            };
            continue;
        }
        table = TableState::None;

        if let Some(text) = bullet_text(&line.text) {
            if !is_excluded(&text) {
                let next = continuation(lines, pos);
                out.push(make(block, file, line, text, next, CandidateKind::Bullet));
            }
            continue;
        }

        let sentences = split_sentences(trimmed);
        for (i, sentence) in sentences.iter().enumerate() {
            if !is_directive_sentence(sentence) || is_excluded(sentence) {
                continue;
            }
            let next = sentences
                .get(i + 1)
                .map(|s| s.to_string())
                .or_else(|| next_plain_sentence(lines, pos));
            out.push(make(
                block,
                file,
                line,
                sentence.to_string(),
                next,
                CandidateKind::Sentence,
            ));
        }
    }
    out
}

fn make(
    block: &Block,
    file: &str,
    line: &Line,
    raw_text: String,
    next_sentence: Option<String>,
    kind: CandidateKind,
) -> Candidate {
    Candidate {
        raw_text,
        file: file.to_string(),
        anchor: block.anchor.clone(),
        block_heading: block.heading.clone(),
        line: line.number,
        next_sentence,
        kind,
    }
}

/// Remainder of a bullet or checklist line.
pub fn bullet_text(line: &str) -> Option<String> {
    BULLET_RE
        .as_ref()?
        .captures(line)
        .and_then(|c| c.name("text"))
        .map(|m| m.as_str().trim().to_string())
}

fn is_directive_sentence(sentence: &str) -> bool {
    leading_directive(sentence).is_some() || colon_directive(sentence).is_some()
}

/// Exclusion rules: too short, formatting instruction, or acronym blob.
pub fn is_excluded(text: &str) -> bool {
    let cleaned = clean(text);
    if cleaned.chars().count() < MIN_CANDIDATE_CHARS && !is_critical(&cleaned) {
        return true;
    }
    let lowered = cleaned.to_lowercase();
    if FORMATTING_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return true;
    }
    uppercase_ratio(&cleaned) > UPPERCASE_BLOB_RATIO && leading_directive(&cleaned).is_none()
}

fn uppercase_ratio(text: &str) -> f64 {
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    if letters == 0 {
        return 0.0;
    }
    let upper = text.chars().filter(|c| c.is_uppercase()).count();
    upper as f64 / letters as f64
}

/// Split at `.`, `!`, `?` followed by whitespace. Terminators stay attached.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            if let Some(&(j, next)) = chars.peek() {
                if next.is_whitespace() {
                    let s = text[start..=i].trim();
                    if !s.is_empty() {
                        out.push(s);
                    }
                    start = j;
                }
            }
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

fn is_structural(trimmed: &str) -> bool {
    trimmed.starts_with('|') || bullet_text(trimmed).is_some()
}

/// First sentence of the next non-blank, non-structural line.
fn next_plain_sentence(lines: &[Line], pos: usize) -> Option<String> {
    let next = lines[pos + 1..]
        .iter()
        .map(|l| l.text.trim())
        .find(|t| !t.is_empty())?;
    if is_structural(next) {
        return None;
    }
    split_sentences(next).first().map(|s| s.to_string())
}

/// First sentence of an indented continuation line directly after a bullet.
fn continuation(lines: &[Line], pos: usize) -> Option<String> {
    let next = lines.get(pos + 1)?;
    let indented = next.text.starts_with(' ') || next.text.starts_with('\t');
    let trimmed = next.text.trim();
    if !indented || trimmed.is_empty() || is_structural(trimmed) {
        return None;
    }
    split_sentences(trimmed).first().map(|s| s.to_string())
}

fn split_cells(row: &str) -> Vec<String> {
    row.trim()
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(|c| c.trim().to_string())
        .collect()
}

fn header_is_directive(row: &str) -> bool {
    split_cells(row).first().is_some_and(|first| {
        let lowered = first.to_lowercase();
        TABLE_HEADER_PREFIXES.iter().any(|p| lowered.starts_with(p))
    })
}

fn is_table_separator(row: &str) -> bool {
    TABLE_SEPARATOR_RE
        .as_ref()
        .is_some_and(|re| re.is_match(row))
}

/// First cell and optional second cell of a qualifying data row.
fn table_candidate(row: &str) -> Option<(String, Option<String>)> {
    let cells = split_cells(row);
    let first = cells.first()?;
    if first.chars().count() < MIN_CANDIDATE_CHARS || !contains_action_verb(first) {
        return None;
    }
    if is_excluded(first) {
        return None;
    }
    let second = cells.get(1).filter(|c| !c.is_empty()).cloned();
    Some((first.clone(), second))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(lines: &[&str]) -> Block {
        Block {
            heading: Some("Security".into()),
            anchor: "security".into(),
            lines: lines
                .iter()
                .enumerate()
                .map(|(i, t)| Line {
                    number: i + 10,
                    text: t.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn bullet_and_checkbox_lines() {
        assert_eq!(bullet_text("- [x] Pin all versions").as_deref(), Some("Pin all versions"));
        assert_eq!(bullet_text("[ ] Pin all versions").as_deref(), Some("Pin all versions"));
        assert_eq!(bullet_text("* item").as_deref(), Some("item"));
        assert_eq!(bullet_text("plain text"), None);
        assert_eq!(bullet_text("-not a bullet"), None);
    }

    #[test]
    fn detects_bullets_with_continuation() {
        let b = block(&[
            "- NEVER hardcode secrets or tokens in code.",
            "  This helps avoid leaks.",
        ]);
        let found = detect(&b, "docs/py.md");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, CandidateKind::Bullet);
        assert_eq!(found[0].line, 10);
        assert_eq!(found[0].anchor, "security");
        assert_eq!(found[0].next_sentence.as_deref(), Some("This helps avoid leaks."));
    }

    #[test]
    fn detects_directive_sentences() {
        let b = block(&["Intro text here. Always validate user input at the edge. It keeps handlers simple."]);
        let found = detect(&b, "a.md");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_text, "Always validate user input at the edge.");
        assert_eq!(found[0].next_sentence.as_deref(), Some("It keeps handlers simple."));
    }

    #[test]
    fn detects_table_rows_under_directive_header() {
        let b = block(&[
            "| Pattern | Why |",
            "|---|---|",
            "| Wrap external calls in retries | flaky networks |",
            "| short | x |",
        ]);
        let found = detect(&b, "a.md");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, CandidateKind::TableRow);
        assert_eq!(found[0].next_sentence.as_deref(), Some("flaky networks"));
    }

    #[test]
    fn ignores_tables_with_other_headers() {
        let b = block(&["| Name | Value |", "|---|---|", "| Wrap external calls in retries | x |"]);
        assert!(detect(&b, "a.md").is_empty());
    }

    #[test]
    fn exclusions() {
        assert!(is_excluded("Use tabs"));
        assert!(!is_excluded("NEVER eval"));
        assert!(is_excluded("See the appendix for details"));
        assert!(is_excluded("Table 3 lists all the options"));
        assert!(is_excluded("HTTP JSON API REST CRUD ORM"));
        assert!(!is_excluded("NEVER USE GLOBAL STATE IN HANDLERS"));
    }

    #[test]
    fn sentence_split_keeps_terminators() {
        assert_eq!(
            split_sentences("One. Two! Three? four"),
            vec!["One.", "Two!", "Three?", "four"]
        );
        assert_eq!(split_sentences("v1.2 is fine."), vec!["v1.2 is fine."]);
    }
}
