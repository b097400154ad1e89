//! Waypoint Core
//!
//! Types shared by every Waypoint crate:
//!
//! - [`NavigationEntry`] and [`PageKind`]: one logical page visit
//! - [`Location`] and [`Router`]: the contract the host page/router provides
//! - [`WaypointConfig`]: stack cap, fallback destination, back-link prefix
//!
//! # Architecture
//!
//! ```text
//! page load ──► NavigationStack ──► EntryStore ──► SessionBackend
//!                     ▲
//! "Back" ──► UnsavedChangesGuard ──► BackResolver ──► Router::navigate
//!                     ▲
//!        native back / unload notifications from the host
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod entry;
pub mod error;
pub mod host;

pub use config::WaypointConfig;
pub use entry::{NavigationEntry, PageKind, ScrollConfig};
pub use error::{ConfigError, UnknownPageKind};
pub use host::{Location, Router};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Waypoint types
    pub use crate::config::WaypointConfig;
    pub use crate::entry::{NavigationEntry, PageKind, ScrollConfig};
    pub use crate::host::{Location, Router};
}
