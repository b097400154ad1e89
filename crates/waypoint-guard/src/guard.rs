//! The guard itself
//!
//! One guard per editing page instance. The host forwards its notifications
//! (native back, navigation started, unload) and reads `dialog_open()` to
//! render the confirmation dialog.

use crate::error::GuardError;
use crate::state_machine::{transition, GuardEvent, GuardState, NavigationOrigin};
use std::fmt;
use std::sync::Arc;
use waypoint_core::Router;

/// Guard settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuardOptions {
    /// Observe the platform back gesture through a synthetic history frame
    pub intercept_native_back: bool,
}

impl GuardOptions {
    /// Create default options (no interception)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With native back interception
    #[inline]
    #[must_use]
    pub fn with_native_back_interception(mut self, enabled: bool) -> Self {
        self.intercept_native_back = enabled;
        self
    }
}

/// Result of a programmatic navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationRequestOutcome {
    /// Page was clean; the action ran
    Navigated,
    /// Page is dirty; the dialog is now open
    ConfirmationRequired,
    /// The dialog was already open; the new request was dropped
    AlreadyPending,
    /// A discard is in flight; the request was ignored
    Suppressed,
    /// Guard was unmounted
    Detached,
}

/// What the guard did with a native back notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeBackReaction {
    /// Not intercepted; the back navigation proceeds
    PassThrough,
    /// Gesture undone by a fresh synthetic frame; dialog open
    Neutralized,
    /// Our own undo completed; the pending action ran
    FrameUndone,
    /// A discard is in flight; notification ignored
    Suppressed,
    /// Guard was unmounted
    Detached,
}

/// Answer to the platform's "page is unloading" question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadDecision {
    /// Let the tab close
    Allow,
    /// Ask the platform to show its own "leave site" prompt
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

enum PendingAction {
    OnNavigate,
    Custom(Box<dyn FnOnce()>),
}

/// Confirmation state machine for one editing page
pub struct UnsavedChangesGuard {
    router: Arc<dyn Router>,
    on_navigate: Box<dyn FnMut()>,
    options: GuardOptions,
    dirty: bool,
    state: GuardState,
    pending: Option<PendingAction>,
    /// A synthetic frame of ours is on the platform history
    frame_armed: bool,
    lifecycle: Lifecycle,
}

impl UnsavedChangesGuard {
    /// Create a guard; `on_navigate` runs once leaving is permitted
    pub fn new(
        router: Arc<dyn Router>,
        on_navigate: impl FnMut() + 'static,
        options: GuardOptions,
    ) -> Self {
        Self {
            router,
            on_navigate: Box::new(on_navigate),
            options,
            dirty: false,
            state: GuardState::Idle,
            pending: None,
            frame_armed: false,
            lifecycle: Lifecycle::Created,
        }
    }

    /// Attach to the page; pushes the synthetic frame when intercepting
    pub fn mount(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        if self.options.intercept_native_back {
            self.arm_frame();
        }
    }

    /// Detach from the page; later notifications are ignored
    pub fn unmount(&mut self) {
        self.lifecycle = Lifecycle::Unmounted;
        self.pending = None;
        tracing::debug!(state = ?self.state, "guard unmounted");
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Whether the confirmation dialog should be shown
    #[inline]
    #[must_use]
    pub fn dialog_open(&self) -> bool {
        self.state.dialog_open()
    }

    /// Origin of the open dialog
    #[inline]
    #[must_use]
    pub fn pending_origin(&self) -> Option<NavigationOrigin> {
        match self.state {
            GuardState::PendingConfirm { origin } => Some(origin),
            _ => None,
        }
    }

    /// Whether the open dialog came from the platform back gesture
    #[inline]
    #[must_use]
    pub fn triggered_by_native_back(&self) -> bool {
        self.pending_origin() == Some(NavigationOrigin::NativeBack)
    }

    /// Whether the page has unsaved edits
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Options this guard was built with
    #[inline]
    #[must_use]
    pub fn options(&self) -> GuardOptions {
        self.options
    }

    /// Update the dirty flag
    ///
    /// If a clean back gesture already consumed the synthetic frame, turning
    /// dirty pushes a new one so the next gesture is caught again.
    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
        if dirty
            && self.options.intercept_native_back
            && self.lifecycle == Lifecycle::Mounted
            && !self.frame_armed
            && self.state == GuardState::Idle
        {
            tracing::debug!("re-arming native back interception");
            self.arm_frame();
        }
    }

    /// Leave through the page's own `on_navigate` action
    pub fn request_navigation(&mut self) -> NavigationRequestOutcome {
        self.request(PendingAction::OnNavigate)
    }

    /// Leave through a one-off action instead of `on_navigate`
    pub fn request_navigation_with(
        &mut self,
        action: impl FnOnce() + 'static,
    ) -> NavigationRequestOutcome {
        self.request(PendingAction::Custom(Box::new(action)))
    }

    /// The platform reported a history pop
    pub fn handle_native_back(&mut self) -> NativeBackReaction {
        if self.lifecycle == Lifecycle::Unmounted {
            return NativeBackReaction::Detached;
        }
        if !self.options.intercept_native_back {
            return NativeBackReaction::PassThrough;
        }

        match self.state {
            GuardState::Navigating => {
                tracing::debug!("native back ignored, navigation in flight");
                NativeBackReaction::Suppressed
            }
            GuardState::UndoingFrame => {
                // Our own go_back_one_frame landed
                self.apply(GuardEvent::FrameUndone);
                self.run_pending();
                NativeBackReaction::FrameUndone
            }
            GuardState::PendingConfirm { .. } => {
                // Gesture while the dialog is up: keep the page, keep the action
                self.frame_armed = false;
                self.arm_frame();
                NativeBackReaction::Neutralized
            }
            GuardState::Idle => {
                self.frame_armed = false;
                if !self.dirty {
                    return NativeBackReaction::PassThrough;
                }
                self.arm_frame();
                self.pending = Some(PendingAction::OnNavigate);
                self.apply(GuardEvent::Intercept(NavigationOrigin::NativeBack));
                NativeBackReaction::Neutralized
            }
        }
    }

    /// User chose to discard changes and leave
    ///
    /// # Errors
    /// `IllegalTransition` when no dialog is open, `Detached` after unmount.
    pub fn discard(&mut self) -> Result<(), GuardError> {
        self.ensure_attached()?;
        let next = transition(self.state, GuardEvent::Discard)?;
        self.set_state(next);

        match next {
            GuardState::UndoingFrame => {
                // Two notches for one navigation: undo ours, the action does the rest
                self.frame_armed = false;
                self.router.go_back_one_frame();
            }
            _ => self.run_pending(),
        }
        Ok(())
    }

    /// User chose to stay on the page
    ///
    /// Any neutralizing frame stays in place.
    ///
    /// # Errors
    /// `IllegalTransition` when no dialog is open, including once a discard
    /// is in flight.
    pub fn cancel(&mut self) -> Result<(), GuardError> {
        self.ensure_attached()?;
        let next = transition(self.state, GuardEvent::Cancel)?;
        self.pending = None;
        self.set_state(next);
        Ok(())
    }

    /// The host reported that a navigation started
    ///
    /// Clears the in-flight state; harmless in any other state.
    pub fn navigation_started(&mut self) {
        if self.state == GuardState::Navigating {
            self.apply(GuardEvent::NavigationStarted);
        }
    }

    /// The tab is closing or reloading
    #[must_use]
    pub fn before_unload(&self) -> UnloadDecision {
        if self.dirty && self.lifecycle != Lifecycle::Unmounted {
            UnloadDecision::Prompt
        } else {
            UnloadDecision::Allow
        }
    }

    fn request(&mut self, action: PendingAction) -> NavigationRequestOutcome {
        if self.lifecycle == Lifecycle::Unmounted {
            return NavigationRequestOutcome::Detached;
        }

        match self.state {
            GuardState::UndoingFrame | GuardState::Navigating => {
                tracing::debug!(state = ?self.state, "navigation request ignored, discard in flight");
                NavigationRequestOutcome::Suppressed
            }
            GuardState::PendingConfirm { .. } => NavigationRequestOutcome::AlreadyPending,
            GuardState::Idle if !self.dirty => {
                Self::invoke(self.on_navigate.as_mut(), action);
                NavigationRequestOutcome::Navigated
            }
            GuardState::Idle => {
                self.pending = Some(action);
                self.apply(GuardEvent::Intercept(NavigationOrigin::Programmatic));
                NavigationRequestOutcome::ConfirmationRequired
            }
        }
    }

    fn arm_frame(&mut self) {
        self.router.push_synthetic_frame();
        self.frame_armed = true;
    }

    fn run_pending(&mut self) {
        let action = self.pending.take().unwrap_or(PendingAction::OnNavigate);
        Self::invoke(self.on_navigate.as_mut(), action);
    }

    fn invoke(on_navigate: &mut dyn FnMut(), action: PendingAction) {
        match action {
            PendingAction::OnNavigate => on_navigate(),
            PendingAction::Custom(f) => f(),
        }
    }

    // Only called with events that are legal in the current state
    fn apply(&mut self, event: GuardEvent) {
        match transition(self.state, event) {
            Ok(next) => self.set_state(next),
            Err(e) => tracing::warn!(error = %e, "guard event dropped"),
        }
    }

    fn set_state(&mut self, next: GuardState) {
        tracing::debug!(from = ?self.state, to = ?next, "guard transition");
        self.state = next;
    }

    fn ensure_attached(&self) -> Result<(), GuardError> {
        if self.lifecycle == Lifecycle::Unmounted {
            Err(GuardError::Detached)
        } else {
            Ok(())
        }
    }
}

impl fmt::Debug for UnsavedChangesGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsavedChangesGuard")
            .field("options", &self.options)
            .field("dirty", &self.dirty)
            .field("state", &self.state)
            .field("has_pending", &self.pending.is_some())
            .field("frame_armed", &self.frame_armed)
            .field("lifecycle", &self.lifecycle)
            .finish_non_exhaustive()
    }
}
