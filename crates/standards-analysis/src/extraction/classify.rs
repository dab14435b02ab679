//! Severity and scope classification over normalized candidate text.
//!
//! Both are keyword heuristics; downstream thresholds are tuned to them.

use std::sync::LazyLock;

use regex::Regex;
use standards_core::Severity;

use super::lexicon::{colon_directive, leading_directive};

const SECURITY_KEYWORDS: &[&str] = &["secret", "credential", "injection"];
const CRITICAL_VERBS: &[&str] = &["never", "do not", "must not"];
const ERROR_VERBS: &[&str] = &["always", "must", "ensure", "avoid"];
const WARN_VERBS: &[&str] = &["should", "should not", "prefer", "limit"];

pub const PYTHON_GLOB: &str = "**/*.py";
pub const MARKDOWN_GLOB: &str = "**/*.md";
pub const ANY_GLOB: &str = "**/*";

static PYTHON_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:python|py|exceptions?|except|types?|typing|typed|async|await|asyncio|django|flask|fastapi|starlette|pydantic|pytest|mypy)\b",
    )
    .ok()
});

static MARKDOWN_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:markdown|md|headings?|front-matter|frontmatter|front matter|docs|documentation|readme)\b",
    )
    .ok()
});

/// First match wins: critical, error, warn, else info.
pub fn classify_severity(text: &str) -> Severity {
    let lowered = text.to_lowercase();
    let tokens: Vec<String> = [leading_directive(text), colon_directive(text)]
        .into_iter()
        .flatten()
        .collect();
    let hit = |verbs: &[&str]| tokens.iter().any(|t| verbs.contains(&t.as_str()));

    if hit(CRITICAL_VERBS) || SECURITY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        Severity::Critical
    } else if hit(ERROR_VERBS) {
        Severity::Error
    } else if hit(WARN_VERBS) {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Whether the text would classify as critical.
pub fn is_critical(text: &str) -> bool {
    classify_severity(text) == Severity::Critical
}

/// Guess `applies_to` globs from python/markdown vocabulary.
pub fn guess_scope(text: &str) -> Vec<String> {
    let python = PYTHON_RE.as_ref().is_some_and(|re| re.is_match(text));
    let markdown = MARKDOWN_RE.as_ref().is_some_and(|re| re.is_match(text));
    match (python, markdown) {
        (true, true) => vec![PYTHON_GLOB.to_string(), MARKDOWN_GLOB.to_string()],
        (true, false) => vec![PYTHON_GLOB.to_string()],
        (false, true) => vec![MARKDOWN_GLOB.to_string()],
        (false, false) => vec![ANY_GLOB.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_tiers() {
        assert_eq!(classify_severity("NEVER commit .env files"), Severity::Critical);
        assert_eq!(classify_severity("Do not use eval"), Severity::Critical);
        assert_eq!(classify_severity("Store credentials in the vault"), Severity::Critical);
        assert_eq!(classify_severity("Always pin versions"), Severity::Error);
        assert_eq!(classify_severity("Ensure logs are structured"), Severity::Error);
        assert_eq!(classify_severity("Prefer pathlib over os.path"), Severity::Warn);
        assert_eq!(classify_severity("Should not exceed 80 columns"), Severity::Warn);
        assert_eq!(classify_severity("Use f-strings for formatting"), Severity::Info);
        assert_eq!(classify_severity("Imports AVOID: star imports"), Severity::Error);
    }

    #[test]
    fn security_keyword_matches_substring() {
        assert_eq!(classify_severity("Rotate secrets quarterly"), Severity::Critical);
        assert_eq!(classify_severity("Guard against SQL injection"), Severity::Critical);
    }

    #[test]
    fn scope_guessing() {
        assert_eq!(guess_scope("Catch specific exceptions"), vec![PYTHON_GLOB]);
        assert_eq!(guess_scope("Every heading needs an anchor"), vec![MARKDOWN_GLOB]);
        assert_eq!(
            guess_scope("Document async helpers in the docs"),
            vec![PYTHON_GLOB, MARKDOWN_GLOB]
        );
        assert_eq!(guess_scope("NEVER hardcode secrets or tokens in code"), vec![ANY_GLOB]);
        // whole words only
        assert_eq!(guess_scope("Keep typewriter quotes"), vec![ANY_GLOB]);
    }
}
