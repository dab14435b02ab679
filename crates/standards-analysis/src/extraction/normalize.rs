//! Candidate text normalization into summary and rationale.

use standards_core::constants::MAX_SUMMARY_CHARS;

const CAUSAL_MARKERS: &[&str] = &["because", "ensures", "so that", "to avoid", "helps"];

/// Normalized candidate text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub summary: String,
    pub rationale: String,
    /// Whitespace-collapsed text before trailing punctuation was stripped.
    pub full_text: String,
}

/// Collapse whitespace runs and drop `**` / `__` emphasis markers.
pub fn clean(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a raw candidate. `next_sentence` feeds the rationale when it
/// carries a causal marker.
pub fn normalize(raw: &str, next_sentence: Option<&str>) -> Normalized {
    let full_text = clean(raw);
    let trimmed = full_text.trim_end_matches(['.', ';', ':']).trim_end();

    let (left, right) = split_dash(trimmed);
    let summary_source = if left.is_empty() { trimmed } else { left };
    let summary = truncate_words(summary_source, MAX_SUMMARY_CHARS);

    let mut rationale = match right {
        Some(r) if !r.is_empty() => r.to_string(),
        _ => full_text.clone(),
    };
    if let Some(next) = next_sentence.map(clean) {
        if has_causal_marker(&next) {
            rationale.push(' ');
            rationale.push_str(&next);
        }
    }

    Normalized {
        summary,
        rationale,
        full_text,
    }
}

/// Split at the first em-dash or spaced hyphen.
fn split_dash(text: &str) -> (&str, Option<&str>) {
    let em = text.find('—').map(|i| (i, '—'.len_utf8()));
    let hyphen = text.find(" - ").map(|i| (i, 3));
    let cut = match (em, hyphen) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    };
    match cut {
        Some((at, len)) => (text[..at].trim(), Some(text[at + len..].trim())),
        None => (text, None),
    }
}

fn has_causal_marker(text: &str) -> bool {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    CAUSAL_MARKERS.iter().any(|marker| {
        let parts: Vec<&str> = marker.split(' ').collect();
        words.windows(parts.len()).any(|w| w == parts.as_slice())
    })
}

/// Truncate to at most `max` chars, cutting at a word boundary when possible.
pub fn truncate_words(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    for word in text.split(' ') {
        let extra = if out.is_empty() { 0 } else { 1 };
        if out.chars().count() + extra + word.chars().count() > max {
            break;
        }
        if extra == 1 {
            out.push(' ');
        }
        out.push_str(word);
    }
    if out.is_empty() {
        out = text.chars().take(max).collect();
    }
    out.trim_end_matches([',', ';', ':']).to_string()
}
