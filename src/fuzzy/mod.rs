// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy search: typo tolerance via edit distance.
//!
//! Two layers here: the Levenshtein kernel itself, and the [`DistanceEngine`]
//! boundary that the rest of the crate talks to. Everything above this module
//! only knows "give me one distance per candidate"; which backend answers, and
//! how it splits the work, is a deployment choice.

mod edit_distance;
mod engine;

pub use edit_distance::*;
pub use engine::*;
