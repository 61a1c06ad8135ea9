//! PromptCraft configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Access;
use crate::render::PlaceholderSyntax;

/// Main PromptCraft configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog file (YAML, or JSON by extension)
    pub catalog: PathBuf,

    /// Whether locked prompts may be opened
    pub access: Access,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Force one placeholder convention for templates that do not declare one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<PlaceholderSyntax>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog_path(),
            access: Access::Free,
            log_level: None,
            syntax: None,
        }
    }
}

fn default_catalog_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptcraft")
        .join("catalog.yml")
}

impl Config {
    /// Candidate config files, most specific first
    fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("promptcraft.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("promptcraft").join("promptcraft.yml"));
        }
        paths
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        for path in Self::default_paths() {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed here; `load` reports them once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => Self::default_paths(),
        };
        candidates
            .iter()
            .find(|p| p.exists())
            .and_then(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        // Relative catalog paths are relative to the config file
        if config.catalog.is_relative() {
            if let Some(dir) = path.as_ref().parent() {
                config.catalog = dir.join(&config.catalog);
            }
        }

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
