// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! "What could the next letter be?"
//!
//! Collected from the corpus, not from the ranked results: a correction-heavy
//! result list says nothing about which names actually continue the query.

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::corpus::Corpus;

/// Sorted, distinct, lowercased characters that follow `query` in some corpus
/// name sharing it as a case-insensitive prefix.
///
/// Empty for an empty query.
pub fn next_characters(corpus: &Corpus, query: &str) -> Vec<char> {
    if query.is_empty() {
        return Vec::new();
    }

    let prefix = query.to_lowercase();
    let next = |name: &String| {
        let folded = name.to_lowercase();
        folded
            .strip_prefix(prefix.as_str())
            .and_then(|rest| rest.chars().next())
    };

    #[cfg(feature = "parallel")]
    let letters: BTreeSet<char> = corpus.standard_names().par_iter().filter_map(next).collect();
    #[cfg(not(feature = "parallel"))]
    let letters: BTreeSet<char> = corpus.standard_names().iter().filter_map(next).collect();

    letters.into_iter().collect()
}
