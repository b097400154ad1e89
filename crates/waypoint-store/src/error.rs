//! Error types for the Entry Store
//!
//! These never reach page code: [`EntryStore`](crate::EntryStore) and
//! [`SideChannel`](crate::SideChannel) log them and degrade to "no value".

use std::path::PathBuf;

/// Storage backend errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage is disabled or not reachable (private mode, quota, closed session)
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    /// IO error on a file-backed session
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stored payload could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_display() {
        let err = StoreError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "session storage unavailable: quota exceeded");
    }

    #[test]
    fn serde_error_converts() {
        let serde_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: StoreError = serde_err.into();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
