//! Directive vocabulary shared by the detector and the classifier.

use std::sync::LazyLock;

use regex::Regex;

// Longer phrases first: regex alternation is leftmost-first.
const DIRECTIVE_ALTERNATION: &str = "do not|should not|must not|always|never|avoid|prefer|use|must|should|keep|ensure|limit|document";

static LEADING_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^(?:{DIRECTIVE_ALTERNATION})\b")).ok());

static COLON_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)\b(?:{DIRECTIVE_ALTERNATION}):")).ok());

static ACTION_VERB_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{DIRECTIVE_ALTERNATION}|add|pin|return|raise|catch|call|wrap|import|write|run|check|validate|log|handle|define|declare|test|name|prefix|require)\b"
    ))
    .ok()
});

/// Strip leading punctuation/markup so the first word can be inspected.
fn head(text: &str) -> &str {
    text.trim_start_matches(|c: char| !c.is_alphanumeric())
}

/// The directive verb the text starts with, lowercased.
pub fn leading_directive(text: &str) -> Option<String> {
    let re = LEADING_RE.as_ref()?;
    re.find(head(text))
        .map(|m| collapse(&m.as_str().to_lowercase()))
}

/// The verb of the first `<VERB>:` occurrence, lowercased.
pub fn colon_directive(text: &str) -> Option<String> {
    let re = COLON_RE.as_ref()?;
    re.find(text)
        .map(|m| collapse(m.as_str().trim_end_matches(':').to_lowercase().as_str()))
}

/// True if the text contains a directive or action verb as a whole word.
pub fn contains_action_verb(text: &str) -> bool {
    ACTION_VERB_RE
        .as_ref()
        .is_some_and(|re| re.is_match(text))
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
