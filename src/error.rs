// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for the search engine and its collaborators.
//!
//! Three families, one per boundary:
//! - [`ConfigError`]: a request or settings file that cannot be built. Raised
//!   before anything reaches the filter matcher or the ranker.
//! - [`DatasetError`]: a dataset file that exists but cannot be read. A file
//!   that does not exist is *not* an error; it loads as an empty dataset.
//! - [`EngineError`]: the distance engine failed. Fatal for the generation
//!   that hit it, and never papered over with a different algorithm.
//!
//! Cancellation is deliberately absent: a superseded generation is a normal
//! outcome, not a failure.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid configuration, rejected at request or settings construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown search type '{0}' (expected contains, prefix or suffix)")]
    UnknownSearchType(String),

    #[error("unknown sort key '{0}' (expected name, length, department or distance)")]
    UnknownSortKey(String),

    #[error("unknown distance engine '{0}' (expected sequential or parallel)")]
    UnknownEngine(String),

    #[error("unknown dataset '{0}'")]
    UnknownDataset(String),

    #[error("dataset '{0}' is configured more than once")]
    DuplicateDataset(String),

    #[error("page size {requested} is below the minimum of {min}")]
    PageSizeTooSmall { requested: usize, min: usize },

    #[error("engine backend '{0}' requires the `parallel` feature")]
    BackendUnavailable(&'static str),

    #[error("failed to read settings {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A dataset file that exists but cannot be turned into records.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset {} has no '{column}' column", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Distance engine failure.
///
/// Cloneable so a failed generation can hand the same error to the event
/// stream and the log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("distance engine '{backend}' unavailable: {reason}")]
    Unavailable { backend: String, reason: String },

    #[error("distance engine '{backend}' returned {actual} distances for {expected} candidates")]
    LengthMismatch {
        backend: String,
        expected: usize,
        actual: usize,
    },

    /// The generation never reached the engine: its worker could not start.
    #[error("cannot start search worker: {reason}")]
    Worker { reason: String },
}
