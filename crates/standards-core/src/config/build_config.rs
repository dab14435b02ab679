//! Index build configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Input documents and output location of a build. Paths are project-relative.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BuildConfig {
    /// Categories/sources mapping. Default: `.repo_studios/standards_categories.yaml`.
    pub categories_file: Option<PathBuf>,
    /// Curated seed rules (optional on disk).
    pub seed_file: Option<PathBuf>,
    /// Id-keyed overrides (optional on disk).
    pub overrides_file: Option<PathBuf>,
    /// Persisted index. Default: `repo_standards_index.yaml`.
    pub index_path: Option<PathBuf>,
}

impl BuildConfig {
    pub fn effective_categories_file(&self) -> PathBuf {
        self.categories_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_CATEGORIES_FILE))
    }

    pub fn effective_seed_file(&self) -> PathBuf {
        self.seed_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_SEED_FILE))
    }

    pub fn effective_overrides_file(&self) -> PathBuf {
        self.overrides_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OVERRIDES_FILE))
    }

    pub fn effective_index_path(&self) -> PathBuf {
        self.index_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_INDEX_PATH))
    }
}
