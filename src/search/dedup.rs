// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Name-keyed result deduplication.
//!
//! A place name should appear at most once in the results, even when it was
//! found by both the exact filter and the correction suggester, or when two
//! datasets carry the same name. `ResultMerger` keys on `standard_name` only
//! and keeps the first occurrence. Feed it filtered rows before suggestions
//! and the filtered copy always wins.
//!
//! **Invariant**: each `standard_name` appears at most once in the output, and
//! output order is first-seen order.

use std::collections::HashSet;

use crate::types::ResultRecord;

/// First-occurrence-wins merger keyed by `standard_name`.
///
/// # Example
///
/// ```ignore
/// let mut merger = ResultMerger::new();
/// merger.merge_all(filtered);
/// merger.merge_all(suggestions);
/// let results = merger.into_results();
/// ```
#[derive(Debug, Default)]
pub struct ResultMerger {
    seen: HashSet<String>,
    results: Vec<ResultRecord>,
}

impl ResultMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity),
            results: Vec::with_capacity(capacity),
        }
    }

    /// Add a result unless its name is already present.
    ///
    /// Returns whether the result was kept.
    pub fn merge(&mut self, result: ResultRecord) -> bool {
        if self.seen.contains(&result.standard_name) {
            return false;
        }
        self.seen.insert(result.standard_name.clone());
        self.results.push(result);
        true
    }

    /// Merge multiple results at once, in order.
    pub fn merge_all(&mut self, results: impl IntoIterator<Item = ResultRecord>) {
        for result in results {
            self.merge(result);
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn contains(&self, standard_name: &str) -> bool {
        self.seen.contains(standard_name)
    }

    /// Deduplicated results in first-seen order.
    pub fn into_results(self) -> Vec<ResultRecord> {
        self.results
    }
}
