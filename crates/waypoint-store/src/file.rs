//! File-backed session storage
//!
//! Each browsing session gets its own directory `<root>/<session-id>/`, one
//! `<key>.json` file per key. Ending the session deletes the directory, which
//! is what closing a tab does to session storage.

use crate::backend::SessionBackend;
use crate::error::StoreError;
use crate::keys::StorageKey;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Session storage persisted under a per-session directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    session_id: Uuid,
    dir: PathBuf,
}

impl FileBackend {
    /// Start a new session under `root`
    ///
    /// # Errors
    /// The session directory cannot be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::resume(root, Uuid::new_v4())
    }

    /// Reattach to an existing session, e.g. after a page reload
    ///
    /// # Errors
    /// The session directory cannot be created.
    pub fn resume(root: impl AsRef<Path>, session_id: Uuid) -> Result<Self, StoreError> {
        let dir = root.as_ref().join(session_id.to_string());
        fs::create_dir_all(&dir).map_err(|e| StoreError::io_error(&dir, e))?;
        tracing::debug!(session = %session_id, dir = %dir.display(), "opened session storage");
        Ok(Self { session_id, dir })
    }

    /// Session identifier
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Directory holding this session's values
    #[inline]
    #[must_use]
    pub fn session_dir(&self) -> &Path {
        &self.dir
    }

    /// End the session and delete everything it stored
    ///
    /// # Errors
    /// The directory exists but cannot be removed.
    pub fn end_session(self) -> Result<(), StoreError> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {
                tracing::debug!(session = %self.session_id, "ended session storage");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io_error(&self.dir, e)),
        }
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    fn ensure_session(&self) -> Result<(), StoreError> {
        if self.dir.is_dir() {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "session {} has ended",
                self.session_id
            )))
        }
    }
}

impl SessionBackend for FileBackend {
    fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io_error(path, e)),
        }
    }

    fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.ensure_session()?;
        let path = self.path_for(key);
        // Readers never see a half-written value
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StoreError::io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io_error(&path, e))
    }

    fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io_error(path, e)),
        }
    }

    fn clear(&self) -> Result<(), StoreError> {
        StorageKey::ALL.into_iter().try_for_each(|key| self.remove(key))
    }
}
