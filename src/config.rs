// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Settings: engine knobs and the dataset list.
//!
//! Everything has a default, so an empty JSON object (or no file at all) is a
//! valid configuration. The defaults:
//!
//! | Setting            | Default | Meaning                                        |
//! |--------------------|---------|------------------------------------------------|
//! | `min_distance`     | 15      | Correction keeps suggestions strictly below it |
//! | `max_suggestions`  | 20      | Correction returns at most this many rows      |
//! | `results_per_page` | 10      | Initial page size (steps of 5, minimum 5)      |
//! | `backend`          | parallel| Distance engine backend                        |
//!
//! ```json
//! {
//!   "engine": { "min_distance": 4, "backend": "sequential" },
//!   "datasets": [
//!     { "name": "France", "path": "communes/Communes_France.csv", "enabled": true }
//!   ]
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::view::MIN_PAGE_SIZE;

/// Correction ceiling: suggestions need `distance < DEFAULT_MIN_DISTANCE`.
pub const DEFAULT_MIN_DISTANCE: usize = 15;

/// Cap on correction suggestions per search.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 20;

/// Rows per page before the user resizes.
pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;

/// Which distance engine backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Single-threaded CPU loop.
    Sequential,
    /// Rayon-parallel CPU loop (requires the `parallel` feature).
    Parallel,
}

impl Default for EngineKind {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            EngineKind::Parallel
        } else {
            EngineKind::Sequential
        }
    }
}

impl FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sequential" | "cpu" => Ok(EngineKind::Sequential),
            "parallel" | "rayon" => Ok(EngineKind::Parallel),
            _ => Err(ConfigError::UnknownEngine(value.to_string())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Sequential => f.write_str("sequential"),
            EngineKind::Parallel => f.write_str("parallel"),
        }
    }
}

/// Engine parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub min_distance: usize,
    pub max_suggestions: usize,
    pub results_per_page: usize,
    pub backend: EngineKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            backend: EngineKind::default(),
        }
    }
}

/// One dataset file, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub enabled: bool,
}

impl DatasetSource {
    pub fn new(name: &str, path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            enabled,
        }
    }
}

/// Top-level settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    pub datasets: Vec<DatasetSource>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            datasets: default_datasets(),
        }
    }
}

/// The three national exports, France on by default.
fn default_datasets() -> Vec<DatasetSource> {
    vec![
        DatasetSource::new("France", "communes/Communes_France.csv", true),
        DatasetSource::new("Germany", "communes/Communes_Allemagne.csv", false),
        DatasetSource::new("Switzerland", "communes/Communes_Suisse.csv", false),
    ]
}

impl Settings {
    /// Read and validate a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.results_per_page < MIN_PAGE_SIZE {
            return Err(ConfigError::PageSizeTooSmall {
                requested: self.engine.results_per_page,
                min: MIN_PAGE_SIZE,
            });
        }

        for (i, source) in self.datasets.iter().enumerate() {
            if self.datasets[..i]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&source.name))
            {
                return Err(ConfigError::DuplicateDataset(source.name.clone()));
            }
        }

        Ok(())
    }
}
