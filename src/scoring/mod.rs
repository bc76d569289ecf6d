// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking: how merged results get their order.
//!
//! There is no relevance score here. The user picks one of four keys and a
//! direction, and the ranker applies it stably.

pub mod ranking;

pub use ranking::{compare_by, rank};
