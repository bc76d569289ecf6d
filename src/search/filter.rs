// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The filter matcher: exact predicates over three name forms.
//!
//! No normalization happens at query time. The dataset already ships each
//! name three ways (as written, without accents, uppercased), and a record
//! matches when *any* of them satisfies the predicate. That is the whole trick
//! behind "besancon" finding "Besançon" and "LYON" finding "Lyon".
//!
//! Output is corpus indices in ascending order, whether or not the scan ran in
//! parallel. Correction suggestions are merged after these rows, and the
//! first-occurrence dedup depends on this order being stable.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::corpus::Corpus;
use crate::types::SearchType;

/// Below this many records the scan stays on the calling thread.
#[cfg(feature = "parallel")]
const PARALLEL_THRESHOLD: usize = 4096;

/// Indices of every record where `search_type` holds on at least one
/// representation.
///
/// An empty query selects the whole corpus.
pub fn filter(corpus: &Corpus, query: &str, search_type: SearchType) -> Vec<usize> {
    if query.is_empty() {
        return (0..corpus.len()).collect();
    }

    let matches = |index: &usize| {
        corpus
            .representations(*index)
            .iter()
            .any(|name| search_type.matches(name, query))
    };

    #[cfg(feature = "parallel")]
    if corpus.len() >= PARALLEL_THRESHOLD {
        return (0..corpus.len())
            .into_par_iter()
            .with_min_len(PARALLEL_THRESHOLD / 4)
            .filter(matches)
            .collect();
    }

    (0..corpus.len()).filter(matches).collect()
}
