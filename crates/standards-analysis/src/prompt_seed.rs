//! Condensed high-severity rule listing for seeding prompts.

use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use standards_core::{Index, Severity};

/// Output form of a prompt seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl FromStr for SeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(format!("unknown format '{other}' (expected text|json|yaml)")),
        }
    }
}

impl fmt::Display for SeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Yaml => "yaml",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRule {
    pub id: String,
    pub summary: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCategory {
    pub title: String,
    pub rules: Vec<SeedRule>,
}

/// Selected rules grouped by category id. A rule with several categories
/// appears under each of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSeed {
    pub integrity_hash: String,
    pub categories: BTreeMap<String, SeedCategory>,
}

impl PromptSeed {
    pub fn rule_count(&self) -> usize {
        self.categories.values().map(|c| c.rules.len()).sum()
    }
}

/// Select rules at or above `min_severity`, grouped by category.
pub fn build_seed(index: &Index, min_severity: Severity) -> PromptSeed {
    let mut categories: BTreeMap<String, SeedCategory> = BTreeMap::new();
    for rule in index.rules.iter().filter(|r| r.severity >= min_severity) {
        for cat in &rule.category_ids {
            let group = categories.entry(cat.clone()).or_insert_with(|| SeedCategory {
                title: index
                    .categories
                    .get(cat)
                    .map(|c| c.title.clone())
                    .unwrap_or_else(|| cat.clone()),
                rules: Vec::new(),
            });
            group.rules.push(SeedRule {
                id: rule.id.clone(),
                summary: rule.summary.clone(),
                severity: rule.severity,
            });
        }
    }
    for group in categories.values_mut() {
        group.rules.sort_by(|a, b| a.id.cmp(&b.id));
    }
    PromptSeed {
        integrity_hash: index.integrity_hash.clone(),
        categories,
    }
}

/// Render a seed in the requested form.
pub fn render_seed(seed: &PromptSeed, format: SeedFormat) -> Result<String, String> {
    match format {
        SeedFormat::Text => Ok(render_text(seed)),
        SeedFormat::Json => serde_json::to_string_pretty(seed)
            .map(|s| s + "\n")
            .map_err(|e| e.to_string()),
        SeedFormat::Yaml => serde_yaml::to_string(seed).map_err(|e| e.to_string()),
    }
}

fn render_text(seed: &PromptSeed) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Integrity: {}", seed.integrity_hash);
    out.push('\n');
    for (id, group) in &seed.categories {
        let _ = writeln!(out, "Category: {} ({id})", group.title);
        for r in &group.rules {
            let _ = writeln!(
                out,
                "  - [{}] {}: {}",
                r.severity.as_str().to_ascii_uppercase(),
                r.id,
                r.summary
            );
        }
        out.push('\n');
    }
    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push('\n');
    out
}
