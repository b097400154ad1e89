//! Navigation Stack Service
//!
//! Stateless over the [`EntryStore`]: every operation reads the persisted
//! stack, changes it and writes it back, so two page instances in the same
//! tab (before and after a reload) always agree.
//!
//! # Invariants
//! - No two consecutive entries share a URL
//! - Length never exceeds the store's cap; oldest entries go first

use std::sync::Arc;
use waypoint_core::config::DEFAULT_BACK_PREFIX;
use waypoint_core::{Location, NavigationEntry, PageKind, WaypointConfig};
use waypoint_store::{EntryStore, SessionBackend, SideChannel};

/// What [`NavigationStack::initialize_current_page`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInit {
    /// The page was not on top; a new entry was pushed
    Pushed,
    /// The page was already on top; its kind and title were refreshed
    Replaced,
}

/// Ordered history of logical pages, newest last
#[derive(Debug, Clone)]
pub struct NavigationStack {
    store: EntryStore,
    side: SideChannel,
    back_prefix: String,
}

impl NavigationStack {
    /// Create over a store; side-channel values share the store's backend
    #[must_use]
    pub fn new(store: EntryStore) -> Self {
        let side = SideChannel::new(Arc::clone(store.backend()));
        Self {
            store,
            side,
            back_prefix: DEFAULT_BACK_PREFIX.to_string(),
        }
    }

    /// Create from configuration
    #[must_use]
    pub fn from_config(backend: Arc<dyn SessionBackend>, config: &WaypointConfig) -> Self {
        Self::new(EntryStore::from_config(backend, config)).with_back_prefix(&config.back_prefix)
    }

    /// With back-link prefix
    #[inline]
    #[must_use]
    pub fn with_back_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.back_prefix = prefix.into();
        self
    }

    /// Side channel sharing this stack's storage
    #[inline]
    #[must_use]
    pub fn side_channel(&self) -> &SideChannel {
        &self.side
    }

    /// Append `entry` unless the top already has its URL
    ///
    /// Returns `true` when the stack grew.
    pub fn push(&self, entry: NavigationEntry) -> bool {
        let mut entries = self.store.read();
        if entries.last().is_some_and(|top| top.url == entry.url) {
            tracing::debug!(url = %entry.url, "push skipped, already on top");
            return false;
        }
        tracing::debug!(%entry, depth = entries.len() + 1, "push");
        entries.push(entry);
        self.store.write(&entries);
        true
    }

    /// Remove and return the top entry
    pub fn pop(&self) -> Option<NavigationEntry> {
        let mut entries = self.store.read();
        let top = entries.pop()?;
        tracing::debug!(entry = %top, depth = entries.len(), "pop");
        self.store.write(&entries);
        Some(top)
    }

    /// Top entry
    #[must_use]
    pub fn peek(&self) -> Option<NavigationEntry> {
        self.store.read().pop()
    }

    /// Entry that becomes the top after a [`pop`](Self::pop)
    #[must_use]
    pub fn previous(&self) -> Option<NavigationEntry> {
        let mut entries = self.store.read();
        entries.pop()?;
        entries.pop()
    }

    /// Register the page being shown
    ///
    /// A navigation into a page pushes it. The page re-rendering itself under
    /// the same URL (or the link that led here having pushed it already)
    /// refreshes the top entry in place instead of growing the stack.
    pub fn initialize_current_page<L>(&self, kind: PageKind, title: &str, location: &L) -> PageInit
    where
        L: Location + ?Sized,
    {
        let url = location.current_url();
        if kind == PageKind::Search {
            self.side.remember_search_url(&url);
        }

        let mut entries = self.store.read();
        if let Some(top) = entries.last_mut().filter(|top| top.url == url) {
            top.kind = kind;
            top.title = title.to_string();
            tracing::debug!(%url, %kind, "current page refreshed");
            self.store.write(&entries);
            return PageInit::Replaced;
        }

        tracing::debug!(%url, %kind, depth = entries.len() + 1, "current page pushed");
        entries.push(NavigationEntry::new(kind, url, title));
        self.store.write(&entries);
        PageInit::Pushed
    }

    /// Label for the in-app back link
    ///
    /// `"Back to <previous title>"`, or `fallback` when there is nothing to
    /// go back to. Titles that already carry the prefix are used as is.
    #[must_use]
    pub fn back_link_text(&self, fallback: &str) -> String {
        match self.previous() {
            Some(prev) if prev.title.starts_with(&self.back_prefix) => prev.title,
            Some(prev) => format!("{}{}", self.back_prefix, prev.title),
            None => fallback.to_string(),
        }
    }

    /// Forget the whole history
    pub fn clear(&self) {
        tracing::debug!("navigation stack cleared");
        self.store.clear();
    }

    /// All entries, oldest first
    #[must_use]
    pub fn entries(&self) -> Vec<NavigationEntry> {
        self.store.read()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Whether the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
