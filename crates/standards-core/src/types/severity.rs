//! Ordinal rule severity: `info < warn < error < critical`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity levels for rules. Declaration order defines the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
    Critical,
}

impl Severity {
    /// All severities, ascending.
    pub const ALL: [Severity; 4] = [Self::Info, Self::Warn, Self::Error, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }

    /// Parse a canonical name or a legacy alias (`low`, `medium`, `high`).
    /// Returns the severity and whether an alias was used.
    pub fn parse_lenient(raw: &str) -> Option<(Self, bool)> {
        let norm = raw.trim().to_ascii_lowercase();
        match norm.as_str() {
            "info" => Some((Self::Info, false)),
            "warn" => Some((Self::Warn, false)),
            "error" => Some((Self::Error, false)),
            "critical" => Some((Self::Critical, false)),
            "low" => Some((Self::Info, true)),
            "medium" => Some((Self::Warn, true)),
            "high" => Some((Self::Error, true)),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Strict parse: canonical names only, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            other => Err(format!(
                "unknown severity '{other}' (expected info|warn|error|critical)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_ascending() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn aliases_only_in_lenient_parse() {
        assert_eq!(Severity::parse_lenient("HIGH"), Some((Severity::Error, true)));
        assert_eq!(Severity::parse_lenient("warn"), Some((Severity::Warn, false)));
        assert!("high".parse::<Severity>().is_err());
        assert_eq!("Critical".parse::<Severity>(), Ok(Severity::Critical));
    }
}
