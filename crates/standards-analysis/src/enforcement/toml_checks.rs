//! Declarative TOML check definitions, layered on top of rule hints.
//!
//! ```toml
//! [[checks]]
//! rule_id = "python_coding-avoid-print"
//! kind = "regex"
//! pattern = '^\s*print\('
//! applies_to = ["src/**/*.py"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use standards_core::errors::EnforcementError;
use standards_core::Index;

use super::checks::{compile_globs, Check, Matcher};

/// A TOML-defined check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlCheckDef {
    pub rule_id: String,
    pub kind: String,
    pub pattern: String,
    /// Defaults to the rule's own `applies_to`.
    #[serde(default)]
    pub applies_to: Option<Vec<String>>,
    /// Defaults to the rule summary.
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// A collection of TOML check definitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlChecksFile {
    #[serde(default)]
    pub checks: Vec<TomlCheckDef>,
}

/// Loader for TOML check definitions. Checks are bound to rules of `index`.
pub struct TomlCheckLoader;

impl TomlCheckLoader {
    /// Load checks from a TOML string.
    pub fn load_from_str(
        toml_str: &str,
        origin: &str,
        index: &Index,
    ) -> Result<Vec<Check>, EnforcementError> {
        let file: TomlChecksFile =
            toml::from_str(toml_str).map_err(|e| EnforcementError::ChecksFile {
                path: origin.to_string(),
                message: format!("TOML parse error: {e}"),
            })?;

        let mut checks = Vec::new();
        for def in file.checks {
            if def.enabled == Some(false) {
                continue;
            }
            if let Some(check) = Self::compile(def, index)? {
                checks.push(check);
            }
        }
        Ok(checks)
    }

    /// Load checks from a file path.
    pub fn load_from_file(path: &Path, index: &Index) -> Result<Vec<Check>, EnforcementError> {
        let content = std::fs::read_to_string(path).map_err(|e| EnforcementError::ChecksFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::load_from_str(&content, &path.display().to_string(), index)
    }

    /// Compile one definition. Unknown and deprecated rules yield `None`.
    fn compile(def: TomlCheckDef, index: &Index) -> Result<Option<Check>, EnforcementError> {
        let Some(rule) = index.rule(&def.rule_id) else {
            tracing::warn!(rule_id = %def.rule_id, "check references unknown rule, skipped");
            return Ok(None);
        };
        if rule.deprecated {
            tracing::debug!(rule_id = %def.rule_id, "check for deprecated rule skipped");
            return Ok(None);
        }

        let matcher = Matcher::from_kind(&def.kind, &def.pattern, &def.rule_id)?;
        let applies_to = def.applies_to.as_ref().unwrap_or(&rule.applies_to);

        Ok(Some(Check {
            globs: compile_globs(&def.rule_id, applies_to)?,
            severity: rule.severity,
            message: def.message.unwrap_or_else(|| rule.summary.clone()),
            rule_id: def.rule_id,
            matcher,
        }))
    }
}
