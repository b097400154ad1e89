//! Navigation stack persistence
//!
//! Corruption and unavailability are non-fatal: a stack that cannot be read
//! is an empty history, a stack that cannot be written is lost. Both are
//! logged and neither reaches the caller.

use crate::backend::SessionBackend;
use crate::keys::StorageKey;
use std::sync::Arc;
use waypoint_core::{NavigationEntry, WaypointConfig};

/// Reads and writes the `navigationStack` key
#[derive(Debug, Clone)]
pub struct EntryStore {
    backend: Arc<dyn SessionBackend>,
    max_entries: usize,
}

impl EntryStore {
    /// Create a store capped at `max_entries` (at least one)
    #[inline]
    #[must_use]
    pub fn new(backend: Arc<dyn SessionBackend>, max_entries: usize) -> Self {
        Self {
            backend,
            max_entries: max_entries.max(1),
        }
    }

    /// Create a store using the configured cap
    #[inline]
    #[must_use]
    pub fn from_config(backend: Arc<dyn SessionBackend>, config: &WaypointConfig) -> Self {
        Self::new(backend, config.max_entries)
    }

    /// Stack cap
    #[inline]
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Backend shared with other storage users
    #[inline]
    #[must_use]
    pub fn backend(&self) -> &Arc<dyn SessionBackend> {
        &self.backend
    }

    /// Read the stack, oldest first
    ///
    /// Returns an empty stack when nothing is stored, storage is
    /// unavailable or the payload does not parse.
    #[must_use]
    pub fn read(&self) -> Vec<NavigationEntry> {
        let raw = match self.backend.get(StorageKey::NavigationStack) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "navigation stack unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<NavigationEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bytes = raw.len(),
                    "navigation stack corrupted, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Persist the stack, keeping only the newest `max_entries`
    pub fn write(&self, entries: &[NavigationEntry]) {
        let start = entries.len().saturating_sub(self.max_entries);
        if start > 0 {
            tracing::debug!(evicted = start, "navigation stack over cap, evicting oldest");
        }
        let kept = &entries[start..];

        let raw = match serde_json::to_string(kept) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "navigation stack not serializable, dropping write");
                return;
            }
        };

        if let Err(e) = self.backend.set(StorageKey::NavigationStack, &raw) {
            tracing::warn!(error = %e, len = kept.len(), "navigation stack not persisted");
        }
    }

    /// Forget the stack
    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(StorageKey::NavigationStack) {
            tracing::warn!(error = %e, "navigation stack not cleared");
        }
    }
}
