//! Final assembly: ordering, integrity hash, coverage and metadata.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use standards_core::constants::{BUILD_SCRIPT_NAME, SCHEMA_VERSION};
use standards_core::types::{
    CategoriesDocument, Coverage, Index, Metadata, Rule, SourceStats,
};

/// Lowercase hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut hex = String::with_capacity(64);
    for byte in digest {
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}

/// sha256 over `{id}|{last_updated}|{severity}` fragments ordered by id,
/// joined with `\n`. No other rule field contributes.
pub fn integrity_hash(rules: &[Rule]) -> String {
    let mut ordered: Vec<&Rule> = rules.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));
    let joined = ordered
        .iter()
        .map(|r| r.integrity_fragment())
        .collect::<Vec<_>>()
        .join("\n");
    sha256_hex(joined.as_bytes())
}

/// Order rules by `(min(category_ids), id)`.
pub fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by(|a, b| {
        a.primary_category()
            .cmp(b.primary_category())
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Index version derived from the build date: `YYYY.MM.0`.
pub fn version_for(now: DateTime<Utc>) -> String {
    now.format("%Y.%m.0").to_string()
}

/// Inputs to index assembly beyond the rules themselves.
#[derive(Debug)]
pub struct AssembleInput<'a> {
    pub categories: &'a CategoriesDocument,
    pub now: DateTime<Utc>,
    pub missing_sections: Vec<String>,
    pub overrides_file: String,
    pub notes: Vec<String>,
}

/// Build the index document from validated rules.
pub fn assemble(mut rules: Vec<Rule>, input: AssembleInput<'_>) -> Index {
    sort_rules(&mut rules);
    let integrity_hash = integrity_hash(&rules);

    let mut source_stats = BTreeMap::new();
    for source in &input.categories.sources {
        let total_rules = rules.iter().filter(|r| r.source.file == source.path).count();
        source_stats.insert(
            source.path.clone(),
            SourceStats {
                total_rules,
                last_scanned: input.now,
            },
        );
    }

    Index {
        schema_version: SCHEMA_VERSION,
        version: version_for(input.now),
        generated_at: input.now,
        offline: true,
        integrity_hash,
        sources: input.categories.sources.clone(),
        categories: input.categories.category_metas(),
        rules,
        coverage: Some(Coverage {
            source_stats,
            missing_sections: input.missing_sections,
        }),
        metadata: Some(Metadata {
            build_script: BUILD_SCRIPT_NAME.to_string(),
            overrides_file: input.overrides_file,
            notes: input.notes,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_rule_set_hashes_empty_string() {
        assert_eq!(
            integrity_hash(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn version_is_year_month_zero() {
        let now = Utc.with_ymd_and_hms(2025, 2, 3, 10, 0, 0).unwrap();
        assert_eq!(version_for(now), "2025.02.0");
    }
}
