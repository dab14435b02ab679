//! Reading and atomically writing YAML/JSON documents.
//!
//! JSON is chosen by a `.json` extension; everything else is YAML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use standards_core::constants::SCHEMA_VERSION;
use standards_core::errors::IndexError;
use standards_core::Index;

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Parse `content` as the format implied by `path`.
pub fn parse_document<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, String> {
    if is_json(path) {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Read and parse an optional document. `Ok(None)` when the file is absent.
pub fn read_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    if content.trim().is_empty() {
        return Ok(None);
    }
    parse_document(path, &content).map(Some)
}

/// Load a persisted index snapshot.
pub fn load_index(path: &Path) -> Result<Index, IndexError> {
    if !path.exists() {
        return Err(IndexError::NotFound {
            path: path.display().to_string(),
        });
    }
    let content = fs::read_to_string(path).map_err(|e| IndexError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let index: Index = parse_document(path, &content).map_err(|message| IndexError::Malformed {
        path: path.display().to_string(),
        message,
    })?;
    if index.schema_version != SCHEMA_VERSION {
        tracing::warn!(
            path = %path.display(),
            schema_version = index.schema_version,
            expected = SCHEMA_VERSION,
            "unrecognized index schema version"
        );
    }
    Ok(index)
}

/// Serialize an index in the format implied by `path`.
pub fn render_index(path: &Path, index: &Index) -> Result<String, IndexError> {
    if is_json(path) {
        serde_json::to_string_pretty(index)
            .map(|s| s + "\n")
            .map_err(|e| IndexError::Serialize(e.to_string()))
    } else {
        serde_yaml::to_string(index).map_err(|e| IndexError::Serialize(e.to_string()))
    }
}

/// Write `content` to a sibling temp file, then rename over `path`.
/// Readers never observe a partial document.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), IndexError> {
    let io_err = |e: std::io::Error| IndexError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = temp_path(path);
    let result = fs::write(&tmp, content).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    Ok(())
}

/// Persist an index atomically.
pub fn write_index(path: &Path, index: &Index) -> Result<(), IndexError> {
    let content = render_index(path, index)?;
    write_atomic(path, &content)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
