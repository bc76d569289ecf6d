// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The searchable snapshot: datasets in, flat parallel arrays out.
//!
//! A [`Corpus`] is built once per change to the set of enabled datasets and
//! then never touched again. Every search generation holds an `Arc<Corpus>`
//! for its whole lifetime, so there is nothing to lock: a dataset toggle makes
//! a *new* corpus, and whoever still holds the old one keeps reading a
//! consistent (if outdated) view until it is superseded.
//!
//! Storage is column-oriented. The filter matcher walks three name columns in
//! lockstep and the correction suggester hands one column to the distance
//! engine as a batch, so keeping each column contiguous is the natural layout.
//!
//! **Invariant**: all five columns have the same length, and index `i` in each
//! refers to the same record.

mod loader;

pub use loader::{load_catalog, load_dataset};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::ConfigError;
use crate::types::{Record, ResultRecord};

/// Source of corpus epochs. Each snapshot gets a fresh one.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// DATASET
// =============================================================================

/// Ordered records from one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// What an absent source file loads as.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// CORPUS
// =============================================================================

/// Immutable snapshot of every enabled dataset's records.
#[derive(Debug)]
pub struct Corpus {
    epoch: u64,
    countries: Vec<String>,
    standard_names: Vec<String>,
    unaccented_names: Vec<String>,
    uppercase_names: Vec<String>,
    department_codes: Vec<String>,
}

impl Default for Corpus {
    fn default() -> Self {
        Self::from_records(std::iter::empty())
    }
}

impl Corpus {
    /// Concatenate datasets in the order given.
    pub fn from_datasets<'a>(datasets: impl IntoIterator<Item = &'a Dataset>) -> Self {
        Self::from_records(
            datasets
                .into_iter()
                .flat_map(|dataset| dataset.records().iter().cloned()),
        )
    }

    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Self {
        let mut corpus = Self {
            epoch: NEXT_EPOCH.fetch_add(1, Ordering::Relaxed),
            countries: Vec::new(),
            standard_names: Vec::new(),
            unaccented_names: Vec::new(),
            uppercase_names: Vec::new(),
            department_codes: Vec::new(),
        };

        for record in records {
            corpus.countries.push(record.country);
            corpus.standard_names.push(record.standard_name);
            corpus.unaccented_names.push(record.unaccented_name);
            corpus.uppercase_names.push(record.uppercase_name);
            corpus.department_codes.push(record.department_code);
        }

        corpus
    }

    /// Unique id of this snapshot. Two corpora never share an epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn len(&self) -> usize {
        self.standard_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.standard_names.is_empty()
    }

    pub fn standard_names(&self) -> &[String] {
        &self.standard_names
    }

    pub fn unaccented_names(&self) -> &[String] {
        &self.unaccented_names
    }

    pub fn uppercase_names(&self) -> &[String] {
        &self.uppercase_names
    }

    pub fn department_codes(&self) -> &[String] {
        &self.department_codes
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Standard, unaccented and uppercase forms of record `index`.
    #[inline]
    pub fn representations(&self, index: usize) -> [&str; 3] {
        [
            &self.standard_names[index],
            &self.unaccented_names[index],
            &self.uppercase_names[index],
        ]
    }

    /// Borrowed standard names, the candidate list for the distance engine.
    pub fn standard_name_refs(&self) -> Vec<&str> {
        self.standard_names.iter().map(String::as_str).collect()
    }

    /// Unscored output row for record `index`.
    pub fn result_record(&self, index: usize) -> ResultRecord {
        ResultRecord {
            country: self.countries[index].clone(),
            standard_name: self.standard_names[index].clone(),
            department_code: self.department_codes[index].clone(),
            distance: None,
        }
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Every known dataset, in display order, with its enable flag.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Clone)]
struct CatalogEntry {
    dataset: Arc<Dataset>,
    enabled: bool,
}

/// Summary row for listing datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetStatus {
    pub name: String,
    pub records: usize,
    pub enabled: bool,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a dataset. Names are unique (case-insensitive).
    pub fn push(&mut self, dataset: Dataset, enabled: bool) -> Result<(), ConfigError> {
        if self.position(dataset.name()).is_some() {
            return Err(ConfigError::DuplicateDataset(dataset.name().to_string()));
        }
        self.entries.push(CatalogEntry {
            dataset: Arc::new(dataset),
            enabled,
        });
        Ok(())
    }

    /// Flip a dataset on or off. Returns whether anything changed.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> Result<bool, ConfigError> {
        let index = self
            .position(name)
            .ok_or_else(|| ConfigError::UnknownDataset(name.to_string()))?;
        let entry = &mut self.entries[index];
        let changed = entry.enabled != enabled;
        entry.enabled = enabled;
        Ok(changed)
    }

    /// Enable exactly the named datasets, disabling every other one.
    pub fn enable_only<S: AsRef<str>>(&mut self, names: &[S]) -> Result<(), ConfigError> {
        for name in names {
            if self.position(name.as_ref()).is_none() {
                return Err(ConfigError::UnknownDataset(name.as_ref().to_string()));
            }
        }
        for entry in &mut self.entries {
            entry.enabled = names
                .iter()
                .any(|name| name.as_ref().eq_ignore_ascii_case(entry.dataset.name()));
        }
        Ok(())
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.position(name)
            .is_some_and(|index| self.entries[index].enabled)
    }

    pub fn status(&self) -> Vec<DatasetStatus> {
        self.entries
            .iter()
            .map(|entry| DatasetStatus {
                name: entry.dataset.name().to_string(),
                records: entry.dataset.len(),
                enabled: entry.enabled,
            })
            .collect()
    }

    /// Build a fresh corpus from the enabled datasets, in catalog order.
    ///
    /// Catalog order, not toggle order: enabling Switzerland then France still
    /// lists French records first.
    pub fn snapshot(&self) -> Arc<Corpus> {
        let corpus = Corpus::from_datasets(
            self.entries
                .iter()
                .filter(|entry| entry.enabled)
                .map(|entry| entry.dataset.as_ref()),
        );
        tracing::info!(
            epoch = corpus.epoch(),
            records = corpus.len(),
            datasets = ?self.enabled_names(),
            "corpus rebuilt"
        );
        Arc::new(corpus)
    }

    fn enabled_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| entry.dataset.name())
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.dataset.name().eq_ignore_ascii_case(name))
    }
}
