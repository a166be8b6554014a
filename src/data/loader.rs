//! RON data loader
//!
//! Loads the shop catalog and tuning from external RON files, with
//! fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::config::GameConfig;
use super::shop::default_shop_items;
use crate::items::Catalog;

/// Default data directory, relative to the working directory
pub const DATA_DIR: &str = "assets/data";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Read and parse one RON file
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Shared read-only game data
#[derive(Debug, Clone)]
pub struct DataManager {
    pub catalog: Catalog,
    pub config: GameConfig,
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            config: GameConfig::default(),
        }
    }
}

impl DataManager {
    /// Load from `assets/data/`, falling back to defaults per file
    pub fn new() -> Self {
        Self::load_from(Path::new(DATA_DIR))
    }

    /// Load from a directory, falling back to defaults per file
    pub fn load_from(base_path: &Path) -> Self {
        let catalog = Self::load_or_default(&base_path.join("shop.ron"), default_catalog);
        let config = Self::load_or_default(&base_path.join("config.ron"), GameConfig::default);
        log::info!("Loaded {} shop items", catalog.len());
        Self { catalog, config }
    }

    fn load_or_default<T: DeserializeOwned>(path: &Path, fallback: fn() -> T) -> T {
        if !path.exists() {
            log::debug!("{} not found, using defaults", path.display());
            return fallback();
        }
        match load_ron(path) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("{}. Using defaults.", e);
                fallback()
            }
        }
    }
}

fn default_catalog() -> Catalog {
    // Built-in entries always validate
    Catalog::new(default_shop_items()).unwrap_or_default()
}
