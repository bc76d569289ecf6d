// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CSV dataset loading.
//!
//! The national exports are CSV with a header row and, usually, an unnamed
//! index column in front. Columns are found by header name so that column
//! order and extra columns do not matter. Both the French export headers
//! (`nom_standard`, `nom_sans_accent`, ...) and English ones are accepted.
//!
//! A file that does not exist loads as an empty dataset. A file that exists but
//! cannot be parsed is a [`DatasetError`].

use std::io;
use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{Catalog, Dataset};
use crate::config::DatasetSource;
use crate::error::DatasetError;
use crate::types::Record;
use crate::util::normalize::{strip_diacritics, uppercase};

const COUNTRY: &[&str] = &["pays", "country"];
const STANDARD: &[&str] = &["nom_standard", "standard_name", "name"];
const UNACCENTED: &[&str] = &["nom_sans_accent", "unaccented_name"];
const UPPERCASE: &[&str] = &["nom_standard_majuscule", "uppercase_name"];
const DEPARTMENT: &[&str] = &["dep_code", "department_code"];

/// Header positions of the columns we read.
struct Columns {
    country: Option<usize>,
    standard: usize,
    unaccented: Option<usize>,
    uppercase: Option<usize>,
    department: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord, path: &Path) -> Result<Self, DatasetError> {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|alias| h.trim().eq_ignore_ascii_case(alias)))
        };

        Ok(Self {
            country: find(COUNTRY),
            standard: find(STANDARD).ok_or_else(|| DatasetError::MissingColumn {
                path: path.to_path_buf(),
                column: "nom_standard",
            })?,
            unaccented: find(UNACCENTED),
            uppercase: find(UPPERCASE),
            department: find(DEPARTMENT),
        })
    }

    /// Build a record, deriving whatever representation the file lacks.
    fn record(&self, row: &csv::StringRecord, dataset: &str) -> Option<Record> {
        let field = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let standard_name = field(Some(self.standard))?;
        Some(Record {
            country: field(self.country).unwrap_or_else(|| dataset.to_string()),
            unaccented_name: field(self.unaccented)
                .unwrap_or_else(|| strip_diacritics(&standard_name)),
            uppercase_name: field(self.uppercase).unwrap_or_else(|| uppercase(&standard_name)),
            department_code: field(self.department).unwrap_or_default(),
            standard_name,
        })
    }
}

/// Load one dataset from a CSV file.
///
/// Rows without a standard name are skipped. A missing file yields an empty
/// dataset and a warning.
pub fn load_dataset(name: &str, path: &Path) -> Result<Dataset, DatasetError> {
    let csv_error = |source| DatasetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = match csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
    {
        Ok(reader) => reader,
        Err(e) if is_not_found(&e) => {
            tracing::warn!(dataset = name, path = %path.display(), "dataset file not found, loading as empty");
            return Ok(Dataset::empty(name));
        }
        Err(e) => return Err(csv_error(e)),
    };

    let headers = reader.headers().map_err(csv_error)?.clone();
    let columns = Columns::locate(&headers, path)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        match columns.record(&row, name) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(dataset = name, skipped, "rows without a name skipped");
    }
    tracing::info!(dataset = name, records = records.len(), "dataset loaded");
    Ok(Dataset::new(name, records))
}

/// Load every configured dataset into a catalog, preserving configured order.
///
/// Files are read in parallel when the `parallel` feature is on.
pub fn load_catalog(sources: &[DatasetSource], base_dir: &Path) -> Result<Catalog, DatasetError> {
    let load = |source: &DatasetSource| {
        let path = base_dir.join(&source.path);
        load_dataset(&source.name, &path).map(|dataset| (dataset, source.enabled))
    };

    #[cfg(feature = "parallel")]
    let loaded: Vec<(Dataset, bool)> = sources.par_iter().map(load).collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let loaded: Vec<(Dataset, bool)> = sources.iter().map(load).collect::<Result<_, _>>()?;

    let mut catalog = Catalog::new();
    for (dataset, enabled) in loaded {
        catalog.push(dataset, enabled)?;
    }
    Ok(catalog)
}

fn is_not_found(error: &csv::Error) -> bool {
    matches!(error.kind(), csv::ErrorKind::Io(e) if e.kind() == io::ErrorKind::NotFound)
}
