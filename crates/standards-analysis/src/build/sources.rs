//! Categories/sources configuration and source document loading.

use std::fs;
use std::path::Path;

use standards_core::errors::{ConfigError, SourceError};
use standards_core::types::CategoriesDocument;

use crate::document::parse_document;

/// Load and check the categories/sources document.
pub fn load_categories(path: &Path) -> Result<CategoriesDocument, ConfigError> {
    let content = fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let doc: CategoriesDocument =
        parse_document(path, &content).map_err(|message| ConfigError::ParseError {
            path: path.display().to_string(),
            message,
        })?;
    validate_sources(&doc)?;
    Ok(doc)
}

/// Every source must name at least one category, and only known ones.
pub fn validate_sources(doc: &CategoriesDocument) -> Result<(), ConfigError> {
    for source in &doc.sources {
        if source.categories.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: format!("sources[{}].categories", source.path),
                message: "must name at least one category".to_string(),
            });
        }
        if let Some(unknown) = source
            .categories
            .iter()
            .find(|c| !doc.categories.contains_key(*c))
        {
            return Err(ConfigError::UnknownCategory {
                source_path: source.path.clone(),
                category: unknown.clone(),
            });
        }
    }
    Ok(())
}

/// Read a source document relative to `root`.
pub fn read_source(root: &Path, rel: &str) -> Result<String, SourceError> {
    fs::read_to_string(root.join(rel)).map_err(|e| SourceError::Unreadable {
        path: rel.to_string(),
        message: e.to_string(),
    })
}
