//! A newer generation always wins, however late the older one finishes.

use std::collections::HashMap;
use std::sync::Arc;

use super::common::{catalog, dispatcher_with, expect_committed, names, numbered_catalog, TIMEOUT};
use toponym::testing::GatedEngine;
use toponym::{wait_for, DispatchEvent, GenerationId, SequentialEngine};

#[test]
fn test_late_generation_never_overwrites_newer_one() {
    let engine = Arc::new(GatedEngine::new("Pa"));
    let (mut dispatcher, events) = dispatcher_with(engine.clone(), catalog(), 10);

    // G1 parks inside its annotation call
    let g1 = dispatcher.set_query("Pa").unwrap();
    assert!(engine.wait_entered(TIMEOUT));

    let g2 = dispatcher.set_query("Pau").unwrap();
    assert!(g2 > g1);
    expect_committed(&events, g2);
    assert_eq!(dispatcher.view().generation(), g2);
    assert_eq!(names(dispatcher.view().results()), ["Pau"]);

    // G1 finishes now, after G2 committed
    engine.release();
    assert_eq!(
        wait_for(&events, g1, TIMEOUT),
        Some(DispatchEvent::Superseded { generation: g1 })
    );
    dispatcher.wait_idle();

    assert_eq!(dispatcher.view().generation(), g2);
    assert_eq!(names(dispatcher.view().results()), ["Pau"]);
}

#[test]
fn test_superseded_during_correction_stops_at_checkpoint() {
    let engine = Arc::new(GatedEngine::new("Lyo"));
    let (mut dispatcher, events) = dispatcher_with(engine.clone(), catalog(), 10);
    dispatcher.set_correction(true);

    let g1 = dispatcher.set_query("Lyo").unwrap();
    assert!(engine.wait_entered(TIMEOUT));
    let g2 = dispatcher.set_query("Lyon").unwrap();
    expect_committed(&events, g2);

    engine.release();
    assert_eq!(
        wait_for(&events, g1, TIMEOUT),
        Some(DispatchEvent::Superseded { generation: g1 })
    );
    assert_eq!(dispatcher.view().generation(), g2);
    assert_eq!(dispatcher.view().request().query, "Lyon");
}

#[test]
fn test_burst_commits_only_the_last_request() {
    let (mut dispatcher, events) = dispatcher_with(
        Arc::new(SequentialEngine),
        numbered_catalog(20_000),
        10,
    );
    dispatcher.set_correction(true);

    let query = "Commune-19999";
    let mut typed = String::new();
    let mut issued = Vec::new();
    for c in query.chars() {
        typed.push(c);
        issued.push(dispatcher.set_query(&typed).unwrap());
    }
    let last = *issued.last().unwrap();

    // Every generation reports exactly one terminal event
    let mut outcomes: HashMap<GenerationId, DispatchEvent> = HashMap::new();
    while outcomes.len() < issued.len() + 1 {
        let event = events.recv_timeout(TIMEOUT).expect("dispatcher went quiet");
        assert!(outcomes.insert(event.generation(), event).is_none());
    }

    assert!(matches!(outcomes[&last], DispatchEvent::Committed { .. }));
    dispatcher.wait_idle();
    assert_eq!(dispatcher.view().generation(), last);
    assert_eq!(dispatcher.view().request().query, query);
    assert!(dispatcher
        .view()
        .results()
        .iter()
        .any(|r| r.standard_name == query && r.distance == Some(0)));
}
