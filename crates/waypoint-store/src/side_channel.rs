//! Hand-off values sharing the stack's storage
//!
//! Not part of the navigation stack. Each value is a plain string; the
//! `take_*` accessors consume the value so a later page load does not act on
//! it again.

use crate::backend::SessionBackend;
use crate::keys::StorageKey;
use std::sync::Arc;

/// Accessors for `scrollToSection`, `searchUrl` and `pairingVeteranId`
#[derive(Debug, Clone)]
pub struct SideChannel {
    backend: Arc<dyn SessionBackend>,
}

impl SideChannel {
    /// Create over a backend
    #[inline]
    #[must_use]
    pub fn new(backend: Arc<dyn SessionBackend>) -> Self {
        Self { backend }
    }

    /// Ask the next page to scroll `section` into view
    pub fn set_scroll_target(&self, section: &str) {
        self.put(StorageKey::ScrollToSection, section);
    }

    /// Consume the pending scroll target
    #[must_use]
    pub fn take_scroll_target(&self) -> Option<String> {
        self.take(StorageKey::ScrollToSection)
    }

    /// Remember the full URL of the search page last shown
    pub fn remember_search_url(&self, url: &str) {
        self.put(StorageKey::SearchUrl, url);
    }

    /// Last remembered search URL
    #[must_use]
    pub fn search_url(&self) -> Option<String> {
        self.get(StorageKey::SearchUrl)
    }

    /// Hand a veteran id to the pairing dialog of the next page
    pub fn set_pairing_veteran_id(&self, id: &str) {
        self.put(StorageKey::PairingVeteranId, id);
    }

    /// Consume the pending pairing hand-off
    #[must_use]
    pub fn take_pairing_veteran_id(&self) -> Option<String> {
        self.take(StorageKey::PairingVeteranId)
    }

    fn get(&self, key: StorageKey) -> Option<String> {
        match self.backend.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                tracing::warn!(%key, error = %e, "side channel unreadable");
                None
            }
        }
    }

    fn put(&self, key: StorageKey, value: &str) {
        if let Err(e) = self.backend.set(key, value) {
            tracing::warn!(%key, error = %e, "side channel not persisted");
        }
    }

    fn take(&self, key: StorageKey) -> Option<String> {
        let value = self.get(key)?;
        if let Err(e) = self.backend.remove(key) {
            tracing::warn!(%key, error = %e, "side channel value not consumed");
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn channel() -> SideChannel {
        SideChannel::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn scroll_target_is_consumed_once() {
        let side = channel();
        assert_eq!(side.take_scroll_target(), None);

        side.set_scroll_target("guardians");
        assert_eq!(side.take_scroll_target().as_deref(), Some("guardians"));
        assert_eq!(side.take_scroll_target(), None);
    }

    #[test]
    fn search_url_is_not_consumed() {
        let side = channel();
        side.remember_search_url("/search?q=smith&page=2");
        assert_eq!(side.search_url().as_deref(), Some("/search?q=smith&page=2"));
        assert_eq!(side.search_url().as_deref(), Some("/search?q=smith&page=2"));
    }

    #[test]
    fn pairing_id_is_consumed_once() {
        let side = channel();
        side.set_pairing_veteran_id("vet-42");
        assert_eq!(side.take_pairing_veteran_id().as_deref(), Some("vet-42"));
        assert_eq!(side.take_pairing_veteran_id(), None);
    }

    #[test]
    fn keys_do_not_collide_with_stack() {
        let backend = Arc::new(MemoryBackend::new());
        let side = SideChannel::new(backend.clone());
        side.set_scroll_target("guardians");
        assert_eq!(backend.get(StorageKey::NavigationStack).unwrap(), None);
    }

    #[test]
    fn unavailable_storage_reads_none() {
        let side = SideChannel::new(Arc::new(MemoryBackend::unavailable()));
        side.remember_search_url("/search");
        assert_eq!(side.search_url(), None);
        assert_eq!(side.take_scroll_target(), None);
    }
}
