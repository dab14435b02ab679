//! Curated seed rules.

use std::path::Path;

use serde::{Deserialize, Serialize};
use standards_core::errors::ConfigError;

use super::draft::RuleDraft;
use crate::document::read_optional;

/// The seed document: `rules: [...]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub rules: Vec<RuleDraft>,
}

/// Load seed drafts. An absent or empty file yields no rules.
pub fn load_seed(path: &Path) -> Result<Vec<RuleDraft>, ConfigError> {
    let doc: Option<SeedDocument> = read_optional(path).map_err(|message| ConfigError::ParseError {
        path: path.display().to_string(),
        message,
    })?;
    Ok(doc.map(|d| d.rules).unwrap_or_default())
}
