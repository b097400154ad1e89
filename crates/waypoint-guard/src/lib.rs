//! Waypoint Unsaved-Changes Guard
//!
//! Sits in front of every way of leaving an editing page:
//!
//! - in-app "Back"/"Cancel" links call [`UnsavedChangesGuard::request_navigation`]
//! - the platform back gesture is observed through one synthetic history
//!   frame and reported with [`UnsavedChangesGuard::handle_native_back`]
//! - closing the tab asks [`UnsavedChangesGuard::before_unload`]
//!
//! # States
//!
//! ```text
//! Idle --(request, dirty)--> PendingConfirm(Programmatic)
//! Idle --(native back, dirty)--> PendingConfirm(NativeBack)
//! PendingConfirm(*) --(cancel)--> Idle
//! PendingConfirm(Programmatic) --(discard)--> Navigating --(started)--> Idle
//! PendingConfirm(NativeBack) --(discard)--> UndoingFrame --(popped)--> Navigating --(started)--> Idle
//! ```
//!
//! Each step after a discard waits for the host's notification rather than a
//! timer, and `UndoingFrame`/`Navigating` swallow any further back gesture.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod guard;
pub mod state_machine;

pub use error::GuardError;
pub use guard::{
    GuardOptions, NativeBackReaction, NavigationRequestOutcome, UnloadDecision,
    UnsavedChangesGuard,
};
pub use state_machine::{GuardEvent, GuardState, NavigationOrigin};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
