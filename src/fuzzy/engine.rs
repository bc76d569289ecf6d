// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The distance engine boundary.
//!
//! Contract, for every backend:
//! - exactly one distance per candidate, in candidate order;
//! - unit-cost Levenshtein over chars (see [`QueryChars`]);
//! - pure: same inputs, same outputs, whichever backend runs.
//!
//! Backends are free to batch, parallelize or offload. They are not free to
//! disagree. Callers go through [`distance_batch`], which rejects a backend
//! that returns the wrong number of distances instead of silently zipping a
//! short result.
//!
//! There is no fallback between backends. If the configured one fails, the
//! generation that asked fails with it.

use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::QueryChars;
use crate::config::EngineKind;
use crate::error::{ConfigError, EngineError};

/// Something that can score a batch of candidates against one query.
pub trait DistanceEngine: Send + Sync {
    /// Backend name for logs and errors.
    fn name(&self) -> &str;

    /// One edit distance per candidate, order-preserving.
    fn distance_many(&self, query: &str, candidates: &[&str]) -> Result<Vec<usize>, EngineError>;
}

/// Call `engine` and enforce the one-output-per-candidate contract.
pub fn distance_batch(
    engine: &dyn DistanceEngine,
    query: &str,
    candidates: &[&str],
) -> Result<Vec<usize>, EngineError> {
    let distances = engine.distance_many(query, candidates)?;
    if distances.len() != candidates.len() {
        return Err(EngineError::LengthMismatch {
            backend: engine.name().to_string(),
            expected: candidates.len(),
            actual: distances.len(),
        });
    }
    Ok(distances)
}

/// Instantiate the configured backend.
pub fn build_engine(kind: EngineKind) -> Result<Arc<dyn DistanceEngine>, ConfigError> {
    match kind {
        EngineKind::Sequential => Ok(Arc::new(SequentialEngine)),
        #[cfg(feature = "parallel")]
        EngineKind::Parallel => Ok(Arc::new(ParallelEngine::default())),
        #[cfg(not(feature = "parallel"))]
        EngineKind::Parallel => Err(ConfigError::BackendUnavailable("parallel")),
    }
}

// =============================================================================
// CPU BACKENDS
// =============================================================================

/// Single-threaded loop. The reference backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialEngine;

impl DistanceEngine for SequentialEngine {
    fn name(&self) -> &str {
        "sequential"
    }

    fn distance_many(&self, query: &str, candidates: &[&str]) -> Result<Vec<usize>, EngineError> {
        let query = QueryChars::new(query);
        let mut row = query.scratch();
        Ok(candidates
            .iter()
            .map(|candidate| query.distance_to(candidate, &mut row))
            .collect())
    }
}

/// Rayon backend. Splits the candidate list across the global pool.
#[cfg(feature = "parallel")]
#[derive(Debug, Clone, Copy)]
pub struct ParallelEngine {
    /// Smallest slice handed to one task; below this, splitting costs more
    /// than it saves.
    min_chunk: usize,
}

#[cfg(feature = "parallel")]
impl Default for ParallelEngine {
    fn default() -> Self {
        Self { min_chunk: 512 }
    }
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    pub fn with_min_chunk(min_chunk: usize) -> Self {
        Self {
            min_chunk: min_chunk.max(1),
        }
    }
}

#[cfg(feature = "parallel")]
impl DistanceEngine for ParallelEngine {
    fn name(&self) -> &str {
        "parallel"
    }

    fn distance_many(&self, query: &str, candidates: &[&str]) -> Result<Vec<usize>, EngineError> {
        let query = QueryChars::new(query);
        Ok(candidates
            .par_iter()
            .with_min_len(self.min_chunk)
            .map_init(
                || query.scratch(),
                |row, candidate| query.distance_to(candidate, row),
            )
            .collect())
    }
}
