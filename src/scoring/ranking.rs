// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! One key at a time, chosen by the user. The sort is stable, and a descending
//! sort flips the comparator rather than reversing the output. The difference
//! matters for ties: with a reversed output, two names of equal length would
//! swap places every time the user toggled the direction. Flipping the
//! comparator keeps them in input order both ways.
//!
//! Rows without a distance weigh 0 under [`SortKey::Distance`]. In practice
//! the annotation pass fills every row before ranking, so this only shows up
//! when `merge_and_rank` is called on raw rows.

use std::cmp::Ordering;

use crate::types::{ResultRecord, SortKey};

/// Compare two results under `key`, ascending.
///
/// Sort keys:
/// 1. **Name** - lexicographic on the standard name (ordinal, not locale)
/// 2. **Length** - character count of the standard name
/// 3. **DepartmentCode** - lexicographic on the department code
/// 4. **Distance** - annotated edit distance, missing counts as 0
pub fn compare_by(key: SortKey, a: &ResultRecord, b: &ResultRecord) -> Ordering {
    match key {
        SortKey::Name => a.standard_name.cmp(&b.standard_name),
        SortKey::Length => a
            .standard_name
            .chars()
            .count()
            .cmp(&b.standard_name.chars().count()),
        SortKey::DepartmentCode => a.department_code.cmp(&b.department_code),
        SortKey::Distance => a.distance.unwrap_or(0).cmp(&b.distance.unwrap_or(0)),
    }
}

/// Sort `results` in place by `key`. Stable in both directions.
pub fn rank(results: &mut [ResultRecord], key: SortKey, ascending: bool) {
    if ascending {
        results.sort_by(|a, b| compare_by(key, a, b));
    } else {
        results.sort_by(|a, b| compare_by(key, b, a));
    }
}
