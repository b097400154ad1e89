//! Waypoint Navigation
//!
//! Pure operations over the persisted navigation stack, and the resolver that
//! decides where "back" goes.
//!
//! # Flow
//!
//! 1. Every page calls [`NavigationStack::initialize_current_page`] on load
//! 2. Links into detail pages [`push`](NavigationStack::push) a descriptive
//!    entry before navigating
//! 3. "Back" runs a [`BackNavigation`] from [`BackResolver::resolve_back`]
//!
//! # Example
//!
//! ```rust,ignore
//! use waypoint_nav::{BackResolver, NavigationStack};
//!
//! let stack = NavigationStack::new(store);
//! stack.initialize_current_page(PageKind::VeteranDetail, "John Smith", &*router);
//!
//! let label = stack.back_link_text("Back to Search");
//! let back = BackResolver::new(stack, router, "/search").resolve_back(None);
//! back.perform();
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod resolver;
pub mod stack;

pub use resolver::{BackNavigation, BackResolver, BackTarget};
pub use stack::{NavigationStack, PageInit};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
