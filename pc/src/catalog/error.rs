//! Catalog error types

use std::path::PathBuf;

use thiserror::Error;

use crate::authoring::AuthoringError;

/// Errors that can occur loading or querying the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt {id} is invalid: {source}")]
    InvalidPrompt {
        id: String,
        #[source]
        source: AuthoringError,
    },

    #[error("Duplicate prompt id: {0}")]
    DuplicatePrompt(String),

    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("Prompt {id} names unknown category {category}")]
    UnknownCategory { id: String, category: String },

    #[error("Prompt not found: {0}")]
    NotFound(String),

    #[error("Prompt {0} requires a premium subscription")]
    Locked(String),
}

impl CatalogError {
    /// Errors caused by the viewer rather than by the catalog content
    pub fn is_access(&self) -> bool {
        matches!(self, CatalogError::NotFound(_) | CatalogError::Locked(_))
    }
}
