//! Error types for the guard

use crate::state_machine::{GuardEvent, GuardState};

/// Guard errors
///
/// None of these is shown to the user; the page keeps its current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// Event not allowed in the current state
    #[error("illegal guard transition: {event:?} while {state:?}")]
    IllegalTransition {
        /// State the guard was in
        state: GuardState,
        /// Rejected event
        event: GuardEvent,
    },

    /// Guard was unmounted
    #[error("guard is detached from its page")]
    Detached,
}

impl GuardError {
    /// Create illegal transition error
    #[inline]
    #[must_use]
    pub fn illegal(state: GuardState, event: GuardEvent) -> Self {
        Self::IllegalTransition { state, event }
    }
}
