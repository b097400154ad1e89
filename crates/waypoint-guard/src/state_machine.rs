use crate::error::GuardError;

/// What opened the confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationOrigin {
    /// An in-app link or button
    Programmatic,
    /// The platform back gesture, caught by the synthetic frame
    NativeBack,
}

/// Guard state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GuardState {
    /// Nothing pending
    #[default]
    Idle,
    /// Dialog open, waiting for discard or cancel
    PendingConfirm {
        /// What opened the dialog
        origin: NavigationOrigin,
    },
    /// Discarded after a native back; waiting for the synthetic frame to be undone
    UndoingFrame,
    /// Navigation action invoked; waiting for the host to report it started
    Navigating,
}

impl GuardState {
    /// Whether the confirmation dialog is shown
    #[inline]
    #[must_use]
    pub const fn dialog_open(self) -> bool {
        matches!(self, Self::PendingConfirm { .. })
    }

    /// Whether a discard is in flight
    #[inline]
    #[must_use]
    pub const fn in_flight(self) -> bool {
        matches!(self, Self::UndoingFrame | Self::Navigating)
    }
}

/// Events that move the guard between states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuardEvent {
    /// A navigation attempt on a dirty page
    Intercept(NavigationOrigin),
    /// User chose to discard changes
    Discard,
    /// User chose to stay
    Cancel,
    /// The synthetic frame was popped by our own undo
    FrameUndone,
    /// The host reported the navigation started
    NavigationStarted,
}

/// Every state, for exhaustive checks
pub const ALL_STATES: [GuardState; 5] = [
    GuardState::Idle,
    GuardState::PendingConfirm {
        origin: NavigationOrigin::Programmatic,
    },
    GuardState::PendingConfirm {
        origin: NavigationOrigin::NativeBack,
    },
    GuardState::UndoingFrame,
    GuardState::Navigating,
];

/// Every event, for exhaustive checks
pub const ALL_EVENTS: [GuardEvent; 6] = [
    GuardEvent::Intercept(NavigationOrigin::Programmatic),
    GuardEvent::Intercept(NavigationOrigin::NativeBack),
    GuardEvent::Discard,
    GuardEvent::Cancel,
    GuardEvent::FrameUndone,
    GuardEvent::NavigationStarted,
];

/// Events accepted in `from`
pub fn allowed_events(from: GuardState) -> Vec<GuardEvent> {
    use GuardEvent::*;
    match from {
        GuardState::Idle => vec![
            Intercept(NavigationOrigin::Programmatic),
            Intercept(NavigationOrigin::NativeBack),
        ],
        GuardState::PendingConfirm { .. } => vec![Discard, Cancel],
        GuardState::UndoingFrame => vec![FrameUndone],
        GuardState::Navigating => vec![NavigationStarted],
    }
}

/// Next state for `event` in `from`.
///
/// Cancelling once a discard is in flight is rejected: the navigation the
/// user already confirmed completes.
pub fn transition(from: GuardState, event: GuardEvent) -> Result<GuardState, GuardError> {
    let to = match (from, event) {
        (GuardState::Idle, GuardEvent::Intercept(origin)) => GuardState::PendingConfirm { origin },
        (GuardState::PendingConfirm { .. }, GuardEvent::Cancel) => GuardState::Idle,
        (
            GuardState::PendingConfirm {
                origin: NavigationOrigin::Programmatic,
            },
            GuardEvent::Discard,
        ) => GuardState::Navigating,
        (
            GuardState::PendingConfirm {
                origin: NavigationOrigin::NativeBack,
            },
            GuardEvent::Discard,
        ) => GuardState::UndoingFrame,
        (GuardState::UndoingFrame, GuardEvent::FrameUndone) => GuardState::Navigating,
        (GuardState::Navigating, GuardEvent::NavigationStarted) => GuardState::Idle,
        _ => return Err(GuardError::illegal(from, event)),
    };
    Ok(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_discard_goes_through_undo() {
        let pending = transition(
            GuardState::Idle,
            GuardEvent::Intercept(NavigationOrigin::NativeBack),
        )
        .unwrap();
        let undoing = transition(pending, GuardEvent::Discard).unwrap();
        assert_eq!(undoing, GuardState::UndoingFrame);
        let navigating = transition(undoing, GuardEvent::FrameUndone).unwrap();
        assert_eq!(navigating, GuardState::Navigating);
        assert_eq!(
            transition(navigating, GuardEvent::NavigationStarted).unwrap(),
            GuardState::Idle
        );
    }

    #[test]
    fn cancel_mid_discard_is_rejected() {
        assert!(transition(GuardState::UndoingFrame, GuardEvent::Cancel).is_err());
        assert!(transition(GuardState::Navigating, GuardEvent::Cancel).is_err());
    }

    #[test]
    fn dialog_flags() {
        assert!(!GuardState::Idle.dialog_open());
        assert!(GuardState::PendingConfirm {
            origin: NavigationOrigin::Programmatic
        }
        .dialog_open());
        assert!(GuardState::UndoingFrame.in_flight());
        assert!(GuardState::Navigating.in_flight());
        assert!(!GuardState::Idle.in_flight());
    }
}
