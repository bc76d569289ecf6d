//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures and instrumented distance engines so that
//! unit tests, integration suites and benches all build corpora the same way.

#![doc(hidden)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::corpus::Corpus;
use crate::error::EngineError;
use crate::fuzzy::{DistanceEngine, SequentialEngine};
use crate::types::{Record, ResultRecord};
use crate::util::normalize::{strip_diacritics, uppercase};

/// Create a record with the derived unaccented and uppercase forms.
///
/// This is the canonical implementation used across all tests.
pub fn make_record(country: &str, standard_name: &str, department_code: &str) -> Record {
    Record {
        country: country.to_string(),
        standard_name: standard_name.to_string(),
        unaccented_name: strip_diacritics(standard_name),
        uppercase_name: uppercase(standard_name),
        department_code: department_code.to_string(),
    }
}

/// Create an unscored French result row.
pub fn make_result(standard_name: &str, department_code: &str) -> ResultRecord {
    ResultRecord {
        country: "France".to_string(),
        standard_name: standard_name.to_string(),
        department_code: department_code.to_string(),
        distance: None,
    }
}

/// Create a French corpus from `(name, department)` pairs, in order.
pub fn make_corpus(names: &[(&str, &str)]) -> Corpus {
    Corpus::from_records(
        names
            .iter()
            .map(|(name, department)| make_record("France", name, department)),
    )
}

// =============================================================================
// INSTRUMENTED ENGINES
// =============================================================================

/// Always unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEngine;

impl DistanceEngine for FailingEngine {
    fn name(&self) -> &str {
        "failing"
    }

    fn distance_many(&self, _query: &str, _candidates: &[&str]) -> Result<Vec<usize>, EngineError> {
        Err(EngineError::Unavailable {
            backend: "failing".to_string(),
            reason: "backend offline".to_string(),
        })
    }
}

/// Sequential engine that counts its batches.
#[derive(Debug, Default)]
pub struct CountingEngine {
    calls: AtomicUsize,
}

impl CountingEngine {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DistanceEngine for CountingEngine {
    fn name(&self) -> &str {
        "counting"
    }

    fn distance_many(&self, query: &str, candidates: &[&str]) -> Result<Vec<usize>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SequentialEngine.distance_many(query, candidates)
    }
}

/// Sequential engine that parks every call for one query until released.
///
/// Lets a test hold a generation inside its engine call, submit a newer one,
/// and then let the old one finish late.
#[derive(Debug)]
pub struct GatedEngine {
    gated_query: String,
    state: Mutex<GateState>,
    changed: Condvar,
}

#[derive(Debug, Default)]
struct GateState {
    entered: usize,
    open: bool,
}

impl GatedEngine {
    pub fn new(gated_query: &str) -> Self {
        Self {
            gated_query: gated_query.to_string(),
            state: Mutex::new(GateState::default()),
            changed: Condvar::new(),
        }
    }

    /// Block until some call for the gated query is parked, or `timeout`.
    pub fn wait_entered(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        while state.entered == 0 {
            if self.changed.wait_until(&mut state, deadline).timed_out() {
                return state.entered > 0;
            }
        }
        true
    }

    /// Let every parked and future call through.
    pub fn release(&self) {
        self.state.lock().open = true;
        self.changed.notify_all();
    }
}

impl DistanceEngine for GatedEngine {
    fn name(&self) -> &str {
        "gated"
    }

    fn distance_many(&self, query: &str, candidates: &[&str]) -> Result<Vec<usize>, EngineError> {
        if query == self.gated_query {
            let mut state = self.state.lock();
            state.entered += 1;
            self.changed.notify_all();
            while !state.open {
                self.changed.wait(&mut state);
            }
        }
        SequentialEngine.distance_many(query, candidates)
    }
}
