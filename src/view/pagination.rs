// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Page arithmetic over a committed result list.
//!
//! Pages are zero-based. The page size moves in steps of [`PAGE_SIZE_STEP`]
//! and never drops below [`MIN_PAGE_SIZE`]. Every navigation call takes the
//! result total so the page can never point past the end.

use std::ops::Range;

use crate::error::ConfigError;

/// Smallest page size the user can shrink to.
pub const MIN_PAGE_SIZE: usize = 5;

/// How much "more"/"less" changes the page size.
pub const PAGE_SIZE_STEP: usize = 5;

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Result<Self, ConfigError> {
        if page_size < MIN_PAGE_SIZE {
            return Err(ConfigError::PageSizeTooSmall {
                requested: page_size,
                min: MIN_PAGE_SIZE,
            });
        }
        Ok(Self { page: 0, page_size })
    }

    /// Zero-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows. Zero rows, zero pages.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Row range of the current page, clipped to `total`.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Advance one page. No-op (returns false) on the last page.
    pub fn next_page(&mut self, total: usize) -> bool {
        if (self.page + 1) * self.page_size < total {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. No-op (returns false) on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Show [`PAGE_SIZE_STEP`] more rows per page.
    pub fn grow(&mut self, total: usize) {
        self.page_size += PAGE_SIZE_STEP;
        self.clamp(total);
    }

    /// Show [`PAGE_SIZE_STEP`] fewer rows per page, down to [`MIN_PAGE_SIZE`].
    ///
    /// Returns whether the size changed.
    pub fn shrink(&mut self, total: usize) -> bool {
        let shrunk = self.page_size.saturating_sub(PAGE_SIZE_STEP).max(MIN_PAGE_SIZE);
        let changed = shrunk != self.page_size;
        self.page_size = shrunk;
        self.clamp(total);
        changed
    }

    /// Pull the current page back inside `total` rows.
    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.total_pages(total).saturating_sub(1));
    }

    /// Back to the first page, keeping the size.
    pub fn reset(&mut self) {
        self.page = 0;
    }
}
