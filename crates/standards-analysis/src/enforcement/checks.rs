//! Executable checks derived from rule `enforcement_hint`s and TOML definitions.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;
use standards_core::errors::EnforcementError;
use standards_core::{Rule, Severity};

static BARE_EXCEPT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*except\s*:").ok());

static BROAD_EXCEPT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*except\s*\(?\s*(?:BaseException|Exception)\b").ok());

static REQUIREMENTS_FILE: LazyLock<Option<GlobSet>> = LazyLock::new(|| {
    let mut builder = GlobSetBuilder::new();
    builder.add(Glob::new("**/requirements*.txt").ok()?);
    builder.add(Glob::new("**/requirements/*.txt").ok()?);
    builder.build().ok()
});

/// Built-in line checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// `except:` with no exception type.
    BareExcept,
    /// `except Exception` / `except BaseException`.
    BroadExcept,
    /// Requirement lines without an `==` pin.
    UnpinnedRequirement,
}

impl Builtin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BareExcept => "bare-except",
            Self::BroadExcept => "broad-except",
            Self::UnpinnedRequirement => "unpinned-requirement",
        }
    }

    fn matches(&self, line: &str) -> bool {
        match self {
            Self::BareExcept => BARE_EXCEPT_RE.as_ref().is_some_and(|re| re.is_match(line)),
            Self::BroadExcept => BROAD_EXCEPT_RE.as_ref().is_some_and(|re| re.is_match(line)),
            Self::UnpinnedRequirement => {
                let requirement = line.split('#').next().unwrap_or("").trim();
                !requirement.is_empty()
                    && !requirement.starts_with('-')
                    && !requirement.contains("==")
                    && !requirement.contains('@')
            }
        }
    }

    /// Extra file restriction on top of the rule's `applies_to`.
    fn accepts_file(&self, rel_path: &str) -> bool {
        match self {
            Self::UnpinnedRequirement => REQUIREMENTS_FILE
                .as_ref()
                .is_some_and(|set| set.is_match(rel_path)),
            _ => true,
        }
    }
}

impl FromStr for Builtin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bare-except" => Ok(Self::BareExcept),
            "broad-except" => Ok(Self::BroadExcept),
            "unpinned-requirement" => Ok(Self::UnpinnedRequirement),
            other => Err(format!(
                "unknown builtin '{other}' (expected bare-except|broad-except|unpinned-requirement)"
            )),
        }
    }
}

/// How a check matches a line.
#[derive(Debug, Clone)]
pub enum Matcher {
    Regex(Regex),
    Literal(String),
    Builtin(Builtin),
}

impl Matcher {
    /// Build from a kind name (`regex`, `literal`, `builtin`) and pattern.
    pub fn from_kind(kind: &str, pattern: &str, rule_id: &str) -> Result<Self, EnforcementError> {
        let invalid = |message: String| EnforcementError::InvalidCheck {
            rule_id: rule_id.to_string(),
            message,
        };
        if pattern.is_empty() {
            return Err(invalid("empty pattern".to_string()));
        }
        match kind.trim() {
            "regex" => Regex::new(pattern)
                .map(Self::Regex)
                .map_err(|e| invalid(format!("regex error: {e}"))),
            "literal" => Ok(Self::Literal(pattern.to_string())),
            "builtin" => pattern.parse().map(Self::Builtin).map_err(invalid),
            other => Err(invalid(format!("unknown check kind '{other}'"))),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Regex(re) => re.is_match(line),
            Self::Literal(text) => line.contains(text.as_str()),
            Self::Builtin(b) => b.matches(line),
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Regex(re) => write!(f, "regex:{}", re.as_str()),
            Self::Literal(text) => write!(f, "literal:{text}"),
            Self::Builtin(b) => write!(f, "builtin:{}", b.as_str()),
        }
    }
}

/// A compiled check bound to one rule.
#[derive(Debug, Clone)]
pub struct Check {
    pub rule_id: String,
    pub severity: Severity,
    pub matcher: Matcher,
    pub globs: GlobSet,
    pub message: String,
}

impl Check {
    /// Whether this check applies to a root-relative path (`/` separators).
    pub fn applies_to_file(&self, rel_path: &str) -> bool {
        if !self.globs.is_match(rel_path) {
            return false;
        }
        match &self.matcher {
            Matcher::Builtin(b) => b.accepts_file(rel_path),
            _ => true,
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        self.matcher.matches(line)
    }
}

/// Compile `applies_to` globs for a rule.
pub fn compile_globs(rule_id: &str, patterns: &[String]) -> Result<GlobSet, EnforcementError> {
    let invalid = |message: String| EnforcementError::InvalidGlob {
        rule_id: rule_id.to_string(),
        message,
    };
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| invalid(format!("{pattern}: {e}")))?);
    }
    builder.build().map_err(|e| invalid(e.to_string()))
}

/// Split an `enforcement_hint` of the form `<kind>:<pattern>`.
/// Free-text hints are not executable and yield `None`.
pub fn parse_hint(hint: &str) -> Option<(&str, &str)> {
    let (kind, pattern) = hint.split_once(':')?;
    matches!(kind.trim(), "regex" | "literal" | "builtin").then_some((kind.trim(), pattern))
}

/// Compile the check carried by a rule's hint, if any.
pub fn check_from_rule(rule: &Rule) -> Result<Option<Check>, EnforcementError> {
    let Some((kind, pattern)) = rule.enforcement_hint.as_deref().and_then(parse_hint) else {
        return Ok(None);
    };
    let matcher = Matcher::from_kind(kind, pattern, &rule.id)?;
    Ok(Some(Check {
        rule_id: rule.id.clone(),
        severity: rule.severity,
        globs: compile_globs(&rule.id, &rule.applies_to)?,
        message: rule.summary.clone(),
        matcher,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins() {
        assert!(Builtin::BareExcept.matches("    except:"));
        assert!(!Builtin::BareExcept.matches("    except ValueError:"));
        assert!(Builtin::BroadExcept.matches("except Exception as e:"));
        assert!(Builtin::BroadExcept.matches("except (Exception):"));
        assert!(!Builtin::BroadExcept.matches("except ExceptionGroup:"));
        assert!(Builtin::UnpinnedRequirement.matches("requests>=2"));
        assert!(Builtin::UnpinnedRequirement.matches("flask"));
        assert!(!Builtin::UnpinnedRequirement.matches("flask==3.0.0  # web"));
        assert!(!Builtin::UnpinnedRequirement.matches("-r base.txt"));
        assert!(!Builtin::UnpinnedRequirement.matches("# comment"));
    }

    #[test]
    fn hint_parsing() {
        assert_eq!(parse_hint("regex:print\\("), Some(("regex", "print\\(")));
        assert_eq!(parse_hint("builtin:bare-except"), Some(("builtin", "bare-except")));
        assert_eq!(parse_hint("Use a linter: ruff"), None);
    }

    #[test]
    fn invalid_regex_names_rule() {
        let err = Matcher::from_kind("regex", "(", "py-rule").unwrap_err();
        assert!(err.to_string().contains("py-rule"));
    }

    #[test]
    fn requirement_builtin_only_targets_requirement_files() {
        let check = Check {
            rule_id: "python_coding-pin".into(),
            severity: Severity::Error,
            matcher: Matcher::Builtin(Builtin::UnpinnedRequirement),
            globs: compile_globs("python_coding-pin", &["**/*".to_string()]).unwrap(),
            message: "pin".into(),
        };
        assert!(check.applies_to_file("requirements.txt"));
        assert!(check.applies_to_file("svc/requirements-dev.txt"));
        assert!(!check.applies_to_file("notes.txt"));
    }
}
