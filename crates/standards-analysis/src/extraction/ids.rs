//! Stable rule id generation with numeric collision suffixes.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;
use standards_core::constants::ID_MAX_WORDS;

static ID_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+[a-z0-9_-]*[a-z0-9]$").ok());

/// Whether `id` matches the persisted id pattern.
pub fn is_valid_id(id: &str) -> bool {
    ID_RE.as_ref().is_some_and(|re| re.is_match(id))
}

/// Base id from the first words of a summary, prefixed with `category`.
pub fn base_id(summary: &str, category: &str) -> String {
    let words: Vec<String> = summary
        .split_whitespace()
        .take(ID_MAX_WORDS)
        .map(|w| {
            w.to_lowercase()
                .chars()
                .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
                .collect::<String>()
        })
        .filter(|w| !w.is_empty())
        .collect();
    let base = collapse_hyphens(&words.join("-"));
    let base = if base.is_empty() { "rule".to_string() } else { base };
    with_category_prefix(&base, category)
}

/// Prefix `base` with `category-` unless it already starts with it.
pub fn with_category_prefix(base: &str, category: &str) -> String {
    if category.is_empty() || base == category || base.starts_with(&format!("{category}-")) {
        base.to_string()
    } else {
        format!("{category}-{base}")
    }
}

fn collapse_hyphens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('-').to_string()
}

/// Claim `base` in `used`, appending `-2`, `-3`, ... until unique.
pub fn generate_id(base: &str, used: &mut FxHashSet<String>) -> String {
    if used.insert(base.to_string()) {
        return base.to_string();
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{base}-{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_uses_first_eight_words() {
        let id = base_id(
            "NEVER hardcode secrets or tokens in code or config files ever",
            "python_coding",
        );
        assert_eq!(id, "python_coding-never-hardcode-secrets-or-tokens-in-code-or");
        assert!(is_valid_id(&id));
    }

    #[test]
    fn existing_prefix_is_not_doubled() {
        assert_eq!(base_id("Markdown headings use sentence case", "markdown"), "markdown-headings-use-sentence-case");
    }

    #[test]
    fn punctuation_only_summary_falls_back() {
        assert_eq!(base_id("*** !!!", "docs"), "docs-rule");
    }

    #[test]
    fn collisions_get_numeric_suffix() {
        let mut used = FxHashSet::default();
        assert_eq!(generate_id("a-rule", &mut used), "a-rule");
        assert_eq!(generate_id("a-rule", &mut used), "a-rule-2");
        assert_eq!(generate_id("a-rule", &mut used), "a-rule-3");
    }

    #[test]
    fn id_pattern() {
        assert!(is_valid_id("python_coding-x1"));
        assert!(!is_valid_id("-leading"));
        assert!(!is_valid_id("trailing-"));
        assert!(!is_valid_id("Upper"));
        assert!(!is_valid_id("a"));
    }
}
