//! Engine failures: fatal for the current generation, silent for stale ones.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

use super::common::{catalog, dispatcher_with, expect_committed, TIMEOUT};
use toponym::testing::FailingEngine;
use toponym::{
    wait_for, DispatchEvent, DistanceEngine, EngineError, GenerationId, SequentialEngine,
};

/// Fails calls for one query, but only once the test lets it.
struct StallingFailure {
    query: &'static str,
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
}

impl StallingFailure {
    fn new(query: &'static str) -> (Self, Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let engine = Self {
            query,
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        };
        (engine, entered_rx, release_tx)
    }
}

impl DistanceEngine for StallingFailure {
    fn name(&self) -> &str {
        "stalling"
    }

    fn distance_many(&self, query: &str, candidates: &[&str]) -> Result<Vec<usize>, EngineError> {
        if query != self.query {
            return SequentialEngine.distance_many(query, candidates);
        }
        let _ = self.entered.lock().unwrap().send(());
        let _ = self.release.lock().unwrap().recv();
        Err(EngineError::Unavailable {
            backend: "stalling".to_string(),
            reason: "gave up".to_string(),
        })
    }
}

#[test]
fn test_engine_failure_fails_the_current_generation() {
    let (mut dispatcher, events) = dispatcher_with(Arc::new(FailingEngine), catalog(), 10);

    let generation = dispatcher.set_query("Pa").unwrap();
    match wait_for(&events, generation, TIMEOUT) {
        Some(DispatchEvent::Failed { error, .. }) => {
            assert!(matches!(error, EngineError::Unavailable { .. }));
        }
        other => panic!("expected a failure, got {:?}", other),
    }

    // Nothing was published
    assert_eq!(dispatcher.view().generation(), GenerationId::default());
    assert!(dispatcher.view().results().is_empty());
}

#[test]
fn test_no_matches_never_reach_the_engine() {
    let (mut dispatcher, events) = dispatcher_with(Arc::new(FailingEngine), catalog(), 10);
    let generation = dispatcher.set_query("Xyz").unwrap();
    assert_eq!(expect_committed(&events, generation), 0);
}

#[test]
fn test_stale_generation_failure_is_reported_as_superseded() {
    let (engine, entered, release) = StallingFailure::new("Pa");
    let (mut dispatcher, events) = dispatcher_with(Arc::new(engine), catalog(), 10);

    let g1 = dispatcher.set_query("Pa").unwrap();
    entered.recv_timeout(TIMEOUT).unwrap();

    let g2 = dispatcher.set_query("Pau").unwrap();
    assert_eq!(expect_committed(&events, g2), 1);

    release.send(()).unwrap();
    assert_eq!(
        wait_for(&events, g1, TIMEOUT),
        Some(DispatchEvent::Superseded { generation: g1 })
    );
    assert_eq!(dispatcher.view().generation(), g2);
}

#[test]
fn test_recovers_after_a_failure() {
    let (engine, entered, release) = StallingFailure::new("Pa");
    let (mut dispatcher, events) = dispatcher_with(Arc::new(engine), catalog(), 10);
    release.send(()).unwrap();

    let failed = dispatcher.set_query("Pa").unwrap();
    entered.recv_timeout(TIMEOUT).unwrap();
    assert!(matches!(
        wait_for(&events, failed, TIMEOUT),
        Some(DispatchEvent::Failed { .. })
    ));

    let generation = dispatcher.set_query("Lyon").unwrap();
    assert_eq!(expect_committed(&events, generation), 1);
    assert_eq!(dispatcher.view().request().query, "Lyon");
}
