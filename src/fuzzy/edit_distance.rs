// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance over Unicode scalar values.
//!
//! Classic two-row Wagner-Fischer with unit costs for insert, delete and
//! substitute. Characters, not bytes: "Zürich" vs "Zurich" is one edit, not
//! two. Every backend funnels through [`QueryChars::distance_to`], which is
//! what makes their outputs identical.

/// A query decoded once, ready to be compared against many candidates.
///
/// Batches reuse both the decoded query and a scratch row, so scoring a whole
/// corpus allocates twice instead of twice per name.
#[derive(Debug, Clone)]
pub struct QueryChars {
    chars: Vec<char>,
}

impl QueryChars {
    pub fn new(query: &str) -> Self {
        Self {
            chars: query.chars().collect(),
        }
    }

    /// Fresh scratch row sized for this query.
    pub fn scratch(&self) -> Vec<usize> {
        Vec::with_capacity(self.chars.len() + 1)
    }

    /// Levenshtein distance between the query and `candidate`.
    ///
    /// `row` is scratch space; its contents on entry are ignored.
    pub fn distance_to(&self, candidate: &str, row: &mut Vec<usize>) -> usize {
        let query = &self.chars;
        row.clear();
        row.extend(0..=query.len());

        for (i, cc) in candidate.chars().enumerate() {
            // diag holds the previous row's value one column to the left
            let mut diag = row[0];
            row[0] = i + 1;
            for (j, &qc) in query.iter().enumerate() {
                let above = row[j + 1];
                let cost = usize::from(qc != cc);
                row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
                diag = above;
            }
        }

        row[query.len()]
    }
}

/// Levenshtein distance between two strings.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let query = QueryChars::new(a);
    let mut row = query.scratch();
    query.distance_to(b, &mut row)
}
