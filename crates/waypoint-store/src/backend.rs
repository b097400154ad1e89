//! Session storage backends
//!
//! [`SessionBackend`] is the seam between Waypoint and whatever the host
//! persists tab-scoped values in. Business logic never calls a backend
//! directly; it goes through [`EntryStore`](crate::EntryStore) and
//! [`SideChannel`](crate::SideChannel).

use crate::error::StoreError;
use crate::keys::StorageKey;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};

/// Tab-scoped string key/value storage
pub trait SessionBackend: Debug + Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent
    ///
    /// # Errors
    /// Storage unavailable or unreadable.
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    /// Storage unavailable or unwritable.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError>;

    /// Remove a value; removing an absent key is not an error
    ///
    /// # Errors
    /// Storage unavailable or unwritable.
    fn remove(&self, key: StorageKey) -> Result<(), StoreError>;

    /// Remove every Waypoint key
    ///
    /// # Errors
    /// Storage unavailable or unwritable.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory backend
///
/// Lives as long as the value does, which matches a single page session.
/// Can be switched off to exercise the "storage unavailable" path.
#[derive(Debug)]
pub struct MemoryBackend {
    values: Mutex<HashMap<StorageKey, String>>,
    available: AtomicBool,
}

impl MemoryBackend {
    /// Create an empty, available backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Create a backend that fails every call
    #[must_use]
    pub fn unavailable() -> Self {
        let backend = Self::new();
        backend.set_available(false);
        backend
    }

    /// Toggle availability
    #[inline]
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of keys currently stored
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.lock().len()
    }

    /// Whether nothing is stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.lock().is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory backend disabled".to_string()))
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBackend for MemoryBackend {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.values.lock().get(&key).cloned())
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.values.lock().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        self.check()?;
        self.values.lock().remove(&key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.check()?;
        self.values.lock().clear();
        Ok(())
    }
}
