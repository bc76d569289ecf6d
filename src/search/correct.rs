// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The correction suggester: typo tolerance by brute force.
//!
//! The exact filter cannot forgive "Marseile". This path scores *every*
//! standard name in the corpus against the query and keeps the closest few
//! under a ceiling. It is the expensive half of a search, which is why it is
//! optional and why its output is cached.
//!
//! Ordering: ascending distance, ties in corpus order. The sort is stable and
//! the engine returns distances in candidate order, so the same corpus and
//! query always produce the same list.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{EngineConfig, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_DISTANCE};
use crate::corpus::Corpus;
use crate::error::EngineError;
use crate::fuzzy::{distance_batch, DistanceEngine};

/// A corpus record close enough to the query to be offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    /// Index into the corpus the suggestion was computed against.
    pub index: usize,
    pub distance: usize,
}

/// Ceiling and cap for one correction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrectionSettings {
    /// Suggestions need `distance < min_distance`.
    pub min_distance: usize,
    pub max_suggestions: usize,
}

impl Default for CorrectionSettings {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

impl From<&EngineConfig> for CorrectionSettings {
    fn from(config: &EngineConfig) -> Self {
        Self {
            min_distance: config.min_distance,
            max_suggestions: config.max_suggestions,
        }
    }
}

/// Score the whole corpus and keep the best suggestions under the ceiling.
pub fn correct(
    corpus: &Corpus,
    query: &str,
    engine: &dyn DistanceEngine,
    settings: CorrectionSettings,
) -> Result<Vec<Suggestion>, EngineError> {
    if corpus.is_empty() || settings.max_suggestions == 0 {
        return Ok(Vec::new());
    }

    let candidates = corpus.standard_name_refs();
    let distances = distance_batch(engine, query, &candidates)?;

    let mut suggestions: Vec<Suggestion> = distances
        .into_iter()
        .enumerate()
        .filter(|&(_, distance)| distance < settings.min_distance)
        .map(|(index, distance)| Suggestion { index, distance })
        .collect();

    // Stable: equal distances stay in corpus order
    suggestions.sort_by_key(|s| s.distance);
    suggestions.truncate(settings.max_suggestions);
    Ok(suggestions)
}

// =============================================================================
// CACHE
// =============================================================================

/// Default number of distinct queries remembered.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    epoch: u64,
    query: String,
    settings: CorrectionSettings,
}

/// Memoized [`correct`], keyed by corpus epoch, query and settings.
///
/// Typing "Mars", backspacing and typing "s" again asks for the same
/// correction twice; the second one is free. The epoch in the key means a
/// dataset toggle can never serve suggestions whose indices point into a
/// different corpus.
///
/// Bounded: once full, the whole map is dropped and refilled. Query bursts are
/// short-lived, so anything smarter buys little.
///
/// The lock is not held while the engine runs. Two workers asking for the same
/// key at once both compute it; the results are identical.
#[derive(Debug)]
pub struct CorrectionCache {
    entries: Mutex<HashMap<CacheKey, Arc<Vec<Suggestion>>>>,
    capacity: usize,
}

impl Default for CorrectionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl CorrectionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Cached suggestions, computing and storing them on a miss.
    ///
    /// Engine errors are returned and never cached.
    pub fn get_or_compute(
        &self,
        corpus: &Corpus,
        query: &str,
        engine: &dyn DistanceEngine,
        settings: CorrectionSettings,
    ) -> Result<Arc<Vec<Suggestion>>, EngineError> {
        let key = CacheKey {
            epoch: corpus.epoch(),
            query: query.to_string(),
            settings,
        };

        if let Some(hit) = self.entries.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let suggestions = Arc::new(correct(corpus, query, engine, settings)?);

        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.clear();
        }
        entries.insert(key, Arc::clone(&suggestions));
        Ok(suggestions)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}
