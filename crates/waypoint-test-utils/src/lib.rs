//! Testing utilities for Waypoint workspace
//!
//! Shared fakes and fixtures.

#![allow(missing_docs)]

use parking_lot::Mutex;
use std::sync::Arc;
use waypoint_core::{Location, NavigationEntry, PageKind, Router};
use waypoint_store::{EntryStore, MemoryBackend, SideChannel};

/// A call made on [`RecordingRouter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterCall {
    Navigate(String),
    GoBackOneFrame,
    PushSyntheticFrame,
}

#[derive(Debug)]
struct RouterState {
    url: String,
    depth: usize,
    calls: Vec<RouterCall>,
}

/// Router fake that records every call
///
/// `navigate` moves the current URL and adds a frame, `push_synthetic_frame`
/// adds a frame, `go_back_one_frame` removes one. No notifications are sent;
/// tests deliver them to the guard by hand.
#[derive(Debug)]
pub struct RecordingRouter {
    state: Mutex<RouterState>,
}

impl RecordingRouter {
    pub fn new(url: &str) -> Self {
        Self::with_depth(url, 1)
    }

    pub fn with_depth(url: &str, depth: usize) -> Self {
        Self {
            state: Mutex::new(RouterState {
                url: url.to_string(),
                depth,
                calls: Vec::new(),
            }),
        }
    }

    pub fn set_url(&self, url: &str) {
        self.state.lock().url = url.to_string();
    }

    pub fn calls(&self) -> Vec<RouterCall> {
        self.state.lock().calls.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RouterCall::Navigate(url) => Some(url),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &RouterCall) -> usize {
        self.state.lock().calls.iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

impl Location for RecordingRouter {
    fn current_url(&self) -> String {
        self.state.lock().url.clone()
    }
}

impl Router for RecordingRouter {
    fn history_depth(&self) -> usize {
        self.state.lock().depth
    }

    fn navigate(&self, url: &str) {
        let mut state = self.state.lock();
        state.url = url.to_string();
        state.depth += 1;
        state.calls.push(RouterCall::Navigate(url.to_string()));
    }

    fn go_back_one_frame(&self) {
        let mut state = self.state.lock();
        state.depth = state.depth.saturating_sub(1);
        state.calls.push(RouterCall::GoBackOneFrame);
    }

    fn push_synthetic_frame(&self) {
        let mut state = self.state.lock();
        state.depth += 1;
        state.calls.push(RouterCall::PushSyntheticFrame);
    }
}

pub fn search_entry() -> NavigationEntry {
    NavigationEntry::new(PageKind::Search, "/search?q=smith", "Search")
}

pub fn veteran_entry(id: u32) -> NavigationEntry {
    NavigationEntry::new(
        PageKind::VeteranDetail,
        format!("/veterans/{id}"),
        format!("Veteran {id}"),
    )
}

pub fn guardian_entry(id: u32) -> NavigationEntry {
    NavigationEntry::new(
        PageKind::GuardianDetail,
        format!("/guardians/{id}"),
        format!("Guardian {id}"),
    )
}

/// Fresh in-memory storage: backend, stack store and side channel sharing it
pub fn memory_store(max_entries: usize) -> (Arc<MemoryBackend>, EntryStore, SideChannel) {
    let backend = Arc::new(MemoryBackend::new());
    let store = EntryStore::new(backend.clone(), max_entries);
    let side = SideChannel::new(backend.clone());
    (backend, store, side)
}

/// In-memory storage pre-loaded with `entries`
pub fn seeded_store(entries: &[NavigationEntry]) -> (Arc<MemoryBackend>, EntryStore, SideChannel) {
    let (backend, store, side) = memory_store(50);
    store.write(entries);
    (backend, store, side)
}
