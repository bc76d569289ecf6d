// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a place-name search.
//!
//! A [`Record`] is one row of a national dataset. A [`SearchRequest`] is what a
//! keystroke (or a sort toggle, or a dataset toggle) turns into. A
//! [`ResultRecord`] is what the presentation layer gets back.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Record**: immutable once loaded. The three name forms are precomputed by
//!   the dataset; the engine never normalizes a name itself.
//!
//! - **ResultRecord**: `distance` is `None` until the annotation pass has run.
//!   Committed results always have it populated.
//!
//! - **GenerationId**: strictly increasing per dispatcher. Comparing two ids is
//!   how the dispatcher decides which output is allowed on screen.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// =============================================================================
// RECORDS
// =============================================================================

/// One place name, in the three representations the dataset ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    /// Display form, with accents and original casing ("Besançon").
    pub standard_name: String,
    /// Accent-stripped form ("Besancon").
    pub unaccented_name: String,
    /// Uppercase form ("BESANÇON").
    pub uppercase_name: String,
    pub department_code: String,
}

/// A row of the ranked output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub country: String,
    pub standard_name: String,
    pub department_code: String,
    /// Edit distance to the query, set by the annotation pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}

// =============================================================================
// REQUEST PARAMETERS
// =============================================================================

/// Which exact predicate the filter matcher applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Query appears anywhere in the name.
    #[default]
    Contains,
    /// Name starts with the query.
    Prefix,
    /// Name ends with the query.
    Suffix,
}

impl SearchType {
    /// Ordinal (byte-wise) predicate. The empty query satisfies all three.
    #[inline]
    pub fn matches(self, haystack: &str, query: &str) -> bool {
        match self {
            SearchType::Contains => haystack.contains(query),
            SearchType::Prefix => haystack.starts_with(query),
            SearchType::Suffix => haystack.ends_with(query),
        }
    }
}

impl FromStr for SearchType {
    type Err = ConfigError;

    /// Accepts the English names and the French labels of the search box.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "contains" | "contenant" => Ok(SearchType::Contains),
            "prefix" | "starts-with" | "commencant par" | "commençant par" => {
                Ok(SearchType::Prefix)
            }
            "suffix" | "ends-with" | "finissant par" => Ok(SearchType::Suffix),
            _ => Err(ConfigError::UnknownSearchType(value.to_string())),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchType::Contains => "contains",
            SearchType::Prefix => "prefix",
            SearchType::Suffix => "suffix",
        };
        f.write_str(name)
    }
}

/// Ranking key for the merged result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    /// Character count of the standard name.
    Length,
    DepartmentCode,
    /// Edit distance to the query (annotated rows only).
    Distance,
}

impl FromStr for SortKey {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "name" | "nom" => Ok(SortKey::Name),
            "length" | "longueur" => Ok(SortKey::Length),
            "department" | "department-code" | "departmentcode" | "département"
            | "departement" => Ok(SortKey::DepartmentCode),
            "distance" => Ok(SortKey::Distance),
            _ => Err(ConfigError::UnknownSortKey(value.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Name => "name",
            SortKey::Length => "length",
            SortKey::DepartmentCode => "department",
            SortKey::Distance => "distance",
        };
        f.write_str(name)
    }
}

// =============================================================================
// GENERATIONS
// =============================================================================

/// Identifier of one search attempt.
///
/// Issued by the dispatcher, strictly increasing. Zero is never issued, so it
/// doubles as "not yet dispatched".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[repr(transparent)]
pub struct GenerationId(pub u64);

impl GenerationId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GenerationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Everything one search generation needs to know about what the user asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub search_type: SearchType,
    pub correction_enabled: bool,
    pub sort_key: SortKey,
    pub sort_ascending: bool,
    /// Stamped by the dispatcher on submission.
    pub generation_id: GenerationId,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_type: SearchType::Contains,
            correction_enabled: false,
            sort_key: SortKey::Name,
            sort_ascending: true,
            generation_id: GenerationId::default(),
        }
    }
}

impl SearchRequest {
    /// Request with default options for `query`.
    ///
    /// The query is trimmed, as the search box does before dispatching.
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_string(),
            ..Self::default()
        }
    }

    /// Build a request from textual options (CLI flags, settings files).
    ///
    /// Unknown search types and sort keys are rejected here, so they never
    /// reach the matcher or the ranker.
    pub fn parse(
        query: &str,
        search_type: &str,
        sort_key: &str,
        sort_ascending: bool,
        correction_enabled: bool,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            query: query.trim().to_string(),
            search_type: search_type.parse()?,
            correction_enabled,
            sort_key: sort_key.parse()?,
            sort_ascending,
            generation_id: GenerationId::default(),
        })
    }

    pub fn with_search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey, ascending: bool) -> Self {
        self.sort_key = sort_key;
        self.sort_ascending = ascending;
        self
    }

    pub fn with_correction(mut self, enabled: bool) -> Self {
        self.correction_enabled = enabled;
        self
    }
}
