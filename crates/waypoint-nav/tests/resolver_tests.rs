//! Back-navigation resolver tests

use pretty_assertions::assert_eq;
use std::sync::Arc;
use waypoint_core::{NavigationEntry, PageKind, ScrollConfig, WaypointConfig};
use waypoint_nav::{BackResolver, BackTarget, NavigationStack};
use waypoint_test_utils::{
    guardian_entry, memory_store, search_entry, seeded_store, veteran_entry, RecordingRouter,
    RouterCall,
};

fn resolver_over(
    entries: &[NavigationEntry],
    router: &Arc<RecordingRouter>,
) -> (BackResolver, NavigationStack) {
    let (_, store, _) = seeded_store(entries);
    let stack = NavigationStack::new(store);
    let resolver = BackResolver::new(stack.clone(), router.clone(), "/search");
    (resolver, stack)
}

#[test]
fn test_back_from_veteran_detail_to_search() {
    let router = Arc::new(RecordingRouter::new("/veterans/1"));
    let (resolver, stack) = resolver_over(&[search_entry(), veteran_entry(1)], &router);

    let target = resolver.resolve_back(None).perform();

    assert_eq!(target, BackTarget::Entry(search_entry()));
    assert_eq!(stack.entries(), vec![search_entry()]);
    assert_eq!(router.navigations(), vec!["/search?q=smith".to_string()]);
}

#[test]
fn test_back_to_section_when_previous_kind_matches() {
    let router = Arc::new(RecordingRouter::new("/guardians/2"));
    let (resolver, stack) = resolver_over(
        &[search_entry(), veteran_entry(1), guardian_entry(2)],
        &router,
    );

    let scroll = ScrollConfig::new(PageKind::VeteranDetail, "guardians");
    let target = resolver.resolve_back(Some(scroll)).perform();

    assert_eq!(
        target,
        BackTarget::Section {
            entry: veteran_entry(1),
            section: "guardians".to_string(),
        }
    );
    assert_eq!(stack.len(), 2);
    assert_eq!(
        stack.side_channel().take_scroll_target().as_deref(),
        Some("guardians")
    );
    assert_eq!(router.navigations(), vec!["/veterans/1".to_string()]);
}

#[test]
fn test_scroll_config_ignored_when_kind_differs() {
    let router = Arc::new(RecordingRouter::new("/guardians/2"));
    let (resolver, stack) = resolver_over(&[search_entry(), guardian_entry(2)], &router);

    let scroll = ScrollConfig::new(PageKind::VeteranDetail, "guardians");
    let target = resolver.resolve_back(Some(scroll)).perform();

    assert_eq!(target, BackTarget::Entry(search_entry()));
    assert_eq!(stack.side_channel().take_scroll_target(), None);
}

#[test]
fn test_section_without_url_uses_platform_back() {
    let router = Arc::new(RecordingRouter::with_depth("/guardians/2", 3));
    let (resolver, stack) = resolver_over(
        &[NavigationEntry::new(PageKind::VeteranDetail, "", "Veteran"), guardian_entry(2)],
        &router,
    );

    let scroll = ScrollConfig::new(PageKind::VeteranDetail, "guardians");
    let target = resolver.resolve_back(Some(scroll)).perform();

    assert_eq!(target, BackTarget::PlatformBack);
    assert_eq!(router.calls(), vec![RouterCall::GoBackOneFrame]);
    assert_eq!(stack.len(), 1);
}

#[test]
fn test_section_without_url_and_no_history_falls_back() {
    let router = Arc::new(RecordingRouter::with_depth("/guardians/2", 1));
    let (resolver, _) = resolver_over(
        &[NavigationEntry::new(PageKind::VeteranDetail, "", "Veteran"), guardian_entry(2)],
        &router,
    );

    let scroll = ScrollConfig::new(PageKind::VeteranDetail, "guardians");
    let target = resolver.resolve_back(Some(scroll)).perform();

    assert_eq!(target, BackTarget::Fallback("/search".to_string()));
}

#[test]
fn test_cold_entry_goes_to_default_destination() {
    let router = Arc::new(RecordingRouter::new("/veterans/1"));
    let (resolver, _) = resolver_over(&[veteran_entry(1)], &router);

    let target = resolver.resolve_back(None).perform();

    assert_eq!(target, BackTarget::Fallback("/search".to_string()));
    assert_eq!(router.navigations(), vec!["/search".to_string()]);
}

#[test]
fn test_cold_entry_prefers_remembered_search_url() {
    let router = Arc::new(RecordingRouter::new("/veterans/1"));
    let (_, store, side) = memory_store(50);
    side.remember_search_url("/search?q=doe&page=2");
    let stack = NavigationStack::new(store);
    let resolver = BackResolver::from_config(
        stack,
        router.clone(),
        &WaypointConfig::new().with_default_destination("/home"),
    );

    assert_eq!(resolver.fallback_destination(), "/search?q=doe&page=2");
    let target = resolver.resolve_back(None).perform();
    assert_eq!(target.url(), Some("/search?q=doe&page=2"));
}

#[test]
fn test_resolves_at_invocation_time() {
    let router = Arc::new(RecordingRouter::new("/veterans/1"));
    let (resolver, stack) = resolver_over(&[veteran_entry(1)], &router);

    // Built before the history existed
    let back = resolver.resolve_back(None);
    stack.clear();
    stack.push(search_entry());
    stack.push(veteran_entry(1));

    assert_eq!(back.perform(), BackTarget::Entry(search_entry()));
}

#[test]
fn test_repeated_back_walks_the_stack() {
    let router = Arc::new(RecordingRouter::new("/guardians/2"));
    let (resolver, stack) = resolver_over(
        &[search_entry(), veteran_entry(1), guardian_entry(2)],
        &router,
    );

    let back = resolver.resolve_back(None);
    assert_eq!(back.perform(), BackTarget::Entry(veteran_entry(1)));
    assert_eq!(back.perform(), BackTarget::Entry(search_entry()));
    // Only the current page is left: nothing to go back to
    assert_eq!(back.perform(), BackTarget::Fallback("/search".to_string()));
    assert_eq!(stack.entries(), vec![search_entry()]);
}
