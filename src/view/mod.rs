// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What the presentation layer sees.
//!
//! A [`ResultView`] is the output of exactly one committed generation: its
//! rows, the request that produced them, the next-letter hints and the page
//! the user is looking at. Nothing in here is ever partially updated by a
//! running search. The dispatcher swaps the contents in one step under its
//! lock, or not at all.

mod hints;
mod pagination;

pub use hints::next_characters;
pub use pagination::{Pagination, MIN_PAGE_SIZE, PAGE_SIZE_STEP};

use crate::error::ConfigError;
use crate::types::{GenerationId, ResultRecord, SearchRequest};

/// The committed state of a search session.
#[derive(Debug, Clone)]
pub struct ResultView {
    generation: GenerationId,
    request: SearchRequest,
    corpus_epoch: u64,
    results: Vec<ResultRecord>,
    hints: Vec<char>,
    pagination: Pagination,
}

impl ResultView {
    /// Nothing committed yet.
    pub fn new(page_size: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            generation: GenerationId::default(),
            request: SearchRequest::default(),
            corpus_epoch: 0,
            results: Vec::new(),
            hints: Vec::new(),
            pagination: Pagination::new(page_size)?,
        })
    }

    /// Generation that produced these rows, `g0` before the first commit.
    pub fn generation(&self) -> GenerationId {
        self.generation
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    /// Epoch of the corpus the rows were computed against.
    pub fn corpus_epoch(&self) -> u64 {
        self.corpus_epoch
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn hints(&self) -> &[char] {
        &self.hints
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> &[ResultRecord] {
        &self.results[self.pagination.range(self.total())]
    }

    pub fn next_page(&mut self) -> bool {
        let total = self.total();
        self.pagination.next_page(total)
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev_page()
    }

    pub fn grow_page(&mut self) {
        let total = self.total();
        self.pagination.grow(total);
    }

    pub fn shrink_page(&mut self) -> bool {
        let total = self.total();
        self.pagination.shrink(total)
    }

    /// Replace the contents with a newly committed generation.
    ///
    /// The page size survives, the page does not.
    pub(crate) fn publish(
        &mut self,
        request: SearchRequest,
        corpus_epoch: u64,
        results: Vec<ResultRecord>,
        hints: Vec<char>,
    ) {
        self.generation = request.generation_id;
        self.request = request;
        self.corpus_epoch = corpus_epoch;
        self.results = results;
        self.hints = hints;
        self.pagination.reset();
    }
}
