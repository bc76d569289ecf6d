// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search pipeline: where the rubber meets the road.
//!
//! One generation runs five stages against one corpus snapshot:
//!
//! ```text
//! filter ──► [checkpoint] ──► correct (optional) ──► [checkpoint]
//!        ──► merge/dedupe ──► annotate distances ──► rank
//! ```
//!
//! The checkpoints are where a superseded generation gives up. They sit
//! *between* stages, never inside an engine call: an in-flight distance batch
//! always finishes, and its result is simply thrown away. The last checkpoint
//! (right before publishing) belongs to the dispatcher, which performs it under
//! the view lock.

pub mod correct;
pub mod dedup;
mod filter;

pub use correct::{correct, CorrectionCache, CorrectionSettings, Suggestion};
pub use dedup::ResultMerger;
pub use filter::filter;

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::error::{ConfigError, EngineError};
use crate::fuzzy::{build_engine, distance_batch, DistanceEngine};
use crate::scoring::rank;
use crate::types::{ResultRecord, SearchRequest, SortKey};

/// Union two result streams, dropping repeated names.
///
/// `filtered` goes first, so when a name shows up in both streams the filtered
/// copy is the one kept.
pub fn merge(filtered: Vec<ResultRecord>, corrected: Vec<ResultRecord>) -> Vec<ResultRecord> {
    let mut merger = ResultMerger::with_capacity(filtered.len() + corrected.len());
    merger.merge_all(filtered);
    merger.merge_all(corrected);
    merger.into_results()
}

/// [`merge`], then sort.
pub fn merge_and_rank(
    filtered: Vec<ResultRecord>,
    corrected: Vec<ResultRecord>,
    sort_key: SortKey,
    ascending: bool,
) -> Vec<ResultRecord> {
    let mut results = merge(filtered, corrected);
    rank(&mut results, sort_key, ascending);
    results
}

/// Rescore `results` against `query` in one engine call.
///
/// Every row gets a distance, whichever stream it came from.
pub fn annotate(
    results: &mut [ResultRecord],
    query: &str,
    engine: &dyn DistanceEngine,
) -> Result<(), EngineError> {
    if results.is_empty() {
        return Ok(());
    }

    let candidates: Vec<&str> = results.iter().map(|r| r.standard_name.as_str()).collect();
    let distances = distance_batch(engine, query, &candidates)?;
    for (result, distance) in results.iter_mut().zip(distances) {
        result.distance = Some(distance);
    }
    Ok(())
}

/// Runs the pipeline. Shared by every generation of a dispatcher.
pub struct Searcher {
    engine: Arc<dyn DistanceEngine>,
    correction: CorrectionSettings,
    cache: CorrectionCache,
}

impl Searcher {
    pub fn new(engine: Arc<dyn DistanceEngine>, correction: CorrectionSettings) -> Self {
        Self {
            engine,
            correction,
            cache: CorrectionCache::default(),
        }
    }

    /// Build the configured backend and correction settings.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(build_engine(config.backend)?, config.into()))
    }

    pub fn engine(&self) -> &dyn DistanceEngine {
        self.engine.as_ref()
    }

    pub fn correction(&self) -> CorrectionSettings {
        self.correction
    }

    /// Run a search to completion.
    pub fn search(
        &self,
        corpus: &Corpus,
        request: &SearchRequest,
    ) -> Result<Vec<ResultRecord>, EngineError> {
        Ok(self.run(corpus, request, &|| true)?.unwrap_or_default())
    }

    /// Run a search, giving up at a checkpoint once `is_current` says no.
    ///
    /// `Ok(None)` means superseded: no error, no results.
    pub fn run(
        &self,
        corpus: &Corpus,
        request: &SearchRequest,
        is_current: &dyn Fn() -> bool,
    ) -> Result<Option<Vec<ResultRecord>>, EngineError> {
        let query = request.query.as_str();
        let generation = request.generation_id;

        let filtered: Vec<ResultRecord> = filter(corpus, query, request.search_type)
            .into_iter()
            .map(|index| corpus.result_record(index))
            .collect();
        tracing::debug!(%generation, matches = filtered.len(), "filtered");

        if !is_current() {
            tracing::debug!(%generation, "superseded after filter");
            return Ok(None);
        }

        let corrected: Vec<ResultRecord> = if request.correction_enabled {
            let suggestions =
                self.cache
                    .get_or_compute(corpus, query, self.engine(), self.correction)?;
            tracing::debug!(%generation, suggestions = suggestions.len(), "corrected");
            suggestions
                .iter()
                .map(|s| corpus.result_record(s.index))
                .collect()
        } else {
            Vec::new()
        };

        if !is_current() {
            tracing::debug!(%generation, "superseded after correction");
            return Ok(None);
        }

        // Distances must be in place before a distance sort
        let mut results = merge(filtered, corrected);
        annotate(&mut results, query, self.engine())?;
        rank(&mut results, request.sort_key, request.sort_ascending);
        Ok(Some(results))
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher")
            .field("engine", &self.engine.name())
            .field("correction", &self.correction)
            .field("cached_queries", &self.cache.len())
            .finish()
    }
}
