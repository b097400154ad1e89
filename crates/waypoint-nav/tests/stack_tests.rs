//! Navigation stack service tests
//!
//! Covers dedup, in-place refresh, the cap and back-link labels.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use waypoint_core::{NavigationEntry, PageKind};
use waypoint_nav::{NavigationStack, PageInit};
use waypoint_test_utils::{
    guardian_entry, memory_store, search_entry, seeded_store, veteran_entry, RecordingRouter,
};

fn stack_with_cap(cap: usize) -> NavigationStack {
    let (_, store, _) = memory_store(cap);
    NavigationStack::new(store)
}

#[test]
fn test_push_same_url_twice_is_deduplicated() {
    let stack = stack_with_cap(50);

    assert!(stack.push(veteran_entry(1)));
    assert!(!stack.push(veteran_entry(1)));
    assert_eq!(stack.len(), 1);

    // Same URL with a different title still counts as a duplicate
    let renamed = NavigationEntry::new(PageKind::VeteranDetail, "/veterans/1", "Renamed");
    assert!(!stack.push(renamed));
    assert_eq!(stack.peek(), Some(veteran_entry(1)));
}

#[test]
fn test_same_url_can_reappear_non_consecutively() {
    let stack = stack_with_cap(50);
    stack.push(search_entry());
    stack.push(veteran_entry(1));
    stack.push(search_entry());
    assert_eq!(stack.len(), 3);
}

#[test]
fn test_push_then_pop_round_trip() {
    let stack = stack_with_cap(50);
    let entry = guardian_entry(9);

    stack.push(entry.clone());
    assert_eq!(stack.pop(), Some(entry));
    assert_eq!(stack.pop(), None);
    assert!(stack.is_empty());
}

#[test]
fn test_peek_does_not_mutate() {
    let stack = stack_with_cap(50);
    assert_eq!(stack.peek(), None);

    stack.push(search_entry());
    stack.push(veteran_entry(2));
    assert_eq!(stack.peek(), Some(veteran_entry(2)));
    assert_eq!(stack.peek(), Some(veteran_entry(2)));
    assert_eq!(stack.len(), 2);
}

#[test]
fn test_initialize_pushes_new_page() {
    let stack = stack_with_cap(50);
    let router = RecordingRouter::new("/search?q=smith");

    let init = stack.initialize_current_page(PageKind::Search, "Search", &router);
    assert_eq!(init, PageInit::Pushed);
    assert_eq!(stack.entries(), vec![search_entry()]);
}

#[test]
fn test_initialize_same_url_replaces_top_in_place() {
    let stack = stack_with_cap(50);
    let router = RecordingRouter::new("/veterans/1");

    stack.initialize_current_page(PageKind::VeteranDetail, "Loading...", &router);
    let init = stack.initialize_current_page(PageKind::VeteranDetail, "John Smith", &router);

    assert_eq!(init, PageInit::Replaced);
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.peek().unwrap().title, "John Smith");
}

#[test]
fn test_initialize_after_link_push_refreshes_entry() {
    let stack = stack_with_cap(50);
    let router = RecordingRouter::new("/search?q=smith");
    stack.initialize_current_page(PageKind::Search, "Search", &router);

    // The link pushes a descriptive entry, then the detail page loads
    stack.push(NavigationEntry::new(PageKind::VeteranDetail, "/veterans/5", "Veteran"));
    router.set_url("/veterans/5");
    let init = stack.initialize_current_page(PageKind::VeteranDetail, "Jane Doe", &router);

    assert_eq!(init, PageInit::Replaced);
    assert_eq!(stack.len(), 2);
    assert_eq!(stack.peek().unwrap().title, "Jane Doe");
}

#[test]
fn test_filter_change_on_search_page_pushes_new_url() {
    let stack = stack_with_cap(50);
    let router = RecordingRouter::new("/search?q=smith");
    stack.initialize_current_page(PageKind::Search, "Search", &router);

    router.set_url("/search?q=smith&status=active");
    stack.initialize_current_page(PageKind::Search, "Search", &router);

    router.set_url("/search?q=smith&status=active");
    stack.initialize_current_page(PageKind::Search, "Search (active)", &router);

    assert_eq!(stack.len(), 2);
    assert_eq!(stack.peek().unwrap().title, "Search (active)");
}

#[test]
fn test_back_link_text() {
    let stack = stack_with_cap(50);
    assert_eq!(stack.back_link_text("Back to Search"), "Back to Search");

    stack.push(search_entry());
    assert_eq!(stack.back_link_text("Back to Search"), "Back to Search");

    stack.push(veteran_entry(1));
    stack.push(guardian_entry(2));
    assert_eq!(stack.back_link_text("Back to Search"), "Back to Veteran 1");
}

#[test]
fn test_back_link_text_never_double_prefixes() {
    let (_, store, _) = seeded_store(&[
        NavigationEntry::new(PageKind::Search, "/search", "Back to Results"),
        veteran_entry(1),
    ]);
    let stack = NavigationStack::new(store);
    assert_eq!(stack.back_link_text("Back to Search"), "Back to Results");
}

#[test]
fn test_clear() {
    let stack = stack_with_cap(50);
    stack.push(search_entry());
    stack.push(veteran_entry(1));
    stack.clear();
    assert!(stack.is_empty());
    assert_eq!(stack.previous(), None);
}

#[test]
fn test_cap_evicts_oldest() {
    let stack = stack_with_cap(3);
    for i in 0..5 {
        stack.push(veteran_entry(i));
    }
    assert_eq!(
        stack.entries(),
        vec![veteran_entry(2), veteran_entry(3), veteran_entry(4)]
    );
}

#[test]
fn test_stack_survives_reload() {
    let (backend, store, _) = memory_store(50);
    NavigationStack::new(store).push(search_entry());

    // A new page instance over the same session sees the same history
    let reloaded = NavigationStack::new(waypoint_store::EntryStore::new(backend, 50));
    assert_eq!(reloaded.entries(), vec![search_entry()]);
}

fn url_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/search".to_string()),
        Just("/search?q=smith".to_string()),
        (0u32..4).prop_map(|i| format!("/veterans/{i}")),
        (0u32..4).prop_map(|i| format!("/guardians/{i}")),
    ]
}

proptest! {
    #[test]
    fn prop_no_consecutive_duplicates_and_bounded(
        urls in proptest::collection::vec(url_strategy(), 0..80),
        cap in 1usize..20,
    ) {
        let stack = stack_with_cap(cap);
        for url in &urls {
            stack.push(NavigationEntry::new(PageKind::Search, url.clone(), "t"));
        }

        let entries = stack.entries();
        prop_assert!(entries.len() <= cap);
        for pair in entries.windows(2) {
            prop_assert_ne!(&pair[0].url, &pair[1].url);
        }
    }

    #[test]
    fn prop_initialize_never_duplicates_top(
        urls in proptest::collection::vec(url_strategy(), 1..40),
    ) {
        let stack = stack_with_cap(50);
        let router = RecordingRouter::new("/");
        for url in &urls {
            router.set_url(url);
            stack.initialize_current_page(PageKind::Search, "t", &router);
        }

        let entries = stack.entries();
        prop_assert_eq!(&entries.last().unwrap().url, urls.last().unwrap());
        for pair in entries.windows(2) {
            prop_assert_ne!(&pair[0].url, &pair[1].url);
        }
    }
}
