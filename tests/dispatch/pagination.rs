//! Paging through a committed view.

use std::sync::Arc;

use super::common::{dispatcher_with, expect_committed, numbered_catalog};
use toponym::{SequentialEngine, SortKey};

#[test]
fn test_pages_of_twenty_three_rows() {
    let (mut dispatcher, events) =
        dispatcher_with(Arc::new(SequentialEngine), numbered_catalog(23), 10);
    let generation = dispatcher.set_query("").unwrap();
    assert_eq!(expect_committed(&events, generation), 23);

    assert_eq!(dispatcher.page_rows().len(), 10);
    assert!(dispatcher.next_page());
    assert_eq!(dispatcher.page_rows().len(), 10);
    assert!(dispatcher.next_page());
    assert_eq!(dispatcher.page_rows().len(), 3);

    assert!(!dispatcher.next_page());
    assert_eq!(dispatcher.view().pagination().page(), 2);
    assert_eq!(dispatcher.page_rows().len(), 3);
}

#[test]
fn test_growing_the_page_clamps_it() {
    let (mut dispatcher, events) =
        dispatcher_with(Arc::new(SequentialEngine), numbered_catalog(23), 10);
    let generation = dispatcher.set_query("").unwrap();
    expect_committed(&events, generation);

    dispatcher.next_page();
    dispatcher.next_page();
    dispatcher.grow_page();

    let view = dispatcher.snapshot();
    assert_eq!(view.pagination().page_size(), 15);
    assert_eq!(view.pagination().page(), 1);
    assert_eq!(view.page_rows().len(), 8);
}

#[test]
fn test_new_generation_resets_page_but_keeps_size() {
    let (mut dispatcher, events) =
        dispatcher_with(Arc::new(SequentialEngine), numbered_catalog(23), 10);
    let generation = dispatcher.set_query("").unwrap();
    expect_committed(&events, generation);

    assert!(dispatcher.shrink_page());
    assert!(!dispatcher.shrink_page());
    dispatcher.next_page();
    assert_eq!(dispatcher.view().pagination().page(), 1);

    let generation = dispatcher.set_sort_key(SortKey::Length);
    expect_committed(&events, generation);

    let view = dispatcher.view();
    assert_eq!(view.pagination().page(), 0);
    assert_eq!(view.pagination().page_size(), 5);
    assert_eq!(view.page_rows().len(), 5);
}
