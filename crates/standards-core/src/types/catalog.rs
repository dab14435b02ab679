//! Categories and sources: the configured inputs of a build.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category metadata as persisted under `categories.<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMeta {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A source document contributing candidates, with its category ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub path: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// The categories/sources mapping document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesDocument {
    #[serde(default)]
    pub categories: BTreeMap<String, RawCategory>,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

/// Category as authored; `title` defaults to the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CategoriesDocument {
    /// Resolve authored categories into persisted metadata, keyed by id.
    pub fn category_metas(&self) -> BTreeMap<String, CategoryMeta> {
        self.categories
            .iter()
            .map(|(id, raw)| {
                (
                    id.clone(),
                    CategoryMeta {
                        title: raw.title.clone().unwrap_or_else(|| id.clone()),
                        description: raw.description.clone(),
                        tags: raw.tags.clone(),
                    },
                )
            })
            .collect()
    }
}
