//! Waypoint Entry Store
//!
//! Durable, tab-scoped key/value persistence for the navigation stack and the
//! small hand-off values that share its storage.
//!
//! # Layers
//!
//! - [`SessionBackend`]: the only code that touches the underlying storage
//!   ([`MemoryBackend`], [`FileBackend`])
//! - [`EntryStore`]: reads and writes the `navigationStack` key, never fails
//!   towards the caller
//! - [`SideChannel`]: `scrollToSection`, `searchUrl`, `pairingVeteranId`
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use waypoint_core::{NavigationEntry, PageKind};
//! use waypoint_store::{EntryStore, MemoryBackend};
//!
//! let store = EntryStore::new(Arc::new(MemoryBackend::new()), 50);
//! assert!(store.read().is_empty());
//!
//! store.write(&[NavigationEntry::new(PageKind::Search, "/search", "Search")]);
//! assert_eq!(store.read().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod backend;
pub mod entry_store;
pub mod error;
pub mod file;
pub mod keys;
pub mod side_channel;

pub use backend::{MemoryBackend, SessionBackend};
pub use entry_store::EntryStore;
pub use error::StoreError;
pub use file::FileBackend;
pub use keys::StorageKey;
pub use side_channel::SideChannel;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
