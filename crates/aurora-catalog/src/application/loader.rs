//! Loads the catalog document from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::domain::catalog::Catalog;
use crate::domain::entity::Entity;

/// Errors raised while loading the catalog at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        /// Catalog path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The JSON document is malformed.
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML document is malformed.
    #[error("invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The entities violate a catalog rule (e.g. duplicate slug).
    #[error("invalid catalog: {0}")]
    Invalid(String),
}

/// Document format, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl CatalogFormat {
    /// Infers the format from `path`; anything that is not YAML is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parses a catalog document: a top-level array of entities.
///
/// # Errors
///
/// Returns `CatalogError` if the document is malformed or the entities are
/// invalid.
pub fn parse_catalog(source: &str, format: CatalogFormat) -> Result<Catalog, CatalogError> {
    let entities: Vec<Entity> = match format {
        CatalogFormat::Json => serde_json::from_str(source)?,
        CatalogFormat::Yaml => serde_yaml::from_str(source)?,
    };
    Catalog::from_entities(entities).map_err(|e| CatalogError::Invalid(e.to_string()))
}

/// Reads and parses the catalog at `path`.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read or parsed.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let source = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&source, CatalogFormat::from_path(path))?;
    info!(path = %path.display(), entities = catalog.len(), "catalog loaded");
    Ok(catalog)
}
