//! Back-Navigation Resolver
//!
//! Decides where "back" goes and always ends at a concrete destination:
//!
//! 1. A previous page of the kind named in a [`ScrollConfig`]: leave a scroll
//!    target for it, pop, go there (platform back if it has no URL)
//! 2. Any previous page: pop, go there
//! 3. No history (deep link, fresh tab): the remembered search URL, else the
//!    configured default destination

use crate::stack::NavigationStack;
use std::fmt;
use std::sync::Arc;
use waypoint_core::{NavigationEntry, Router, ScrollConfig, WaypointConfig};

/// Where a [`BackNavigation`] went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackTarget {
    /// Navigated to the previous entry
    Entry(NavigationEntry),
    /// Navigated to the previous entry and asked it to scroll to `section`
    Section {
        /// Destination entry
        entry: NavigationEntry,
        /// Section the destination scrolls into view
        section: String,
    },
    /// Previous entry had no URL; stepped the platform history back instead
    PlatformBack,
    /// No usable history; navigated to the fallback destination
    Fallback(String),
}

impl BackTarget {
    /// URL navigated to, if the target was an in-app navigation
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Entry(entry) | Self::Section { entry, .. } => Some(entry.url.as_str()),
            Self::Fallback(url) => Some(url.as_str()),
            Self::PlatformBack => None,
        }
    }
}

/// Computes "back" destinations over a navigation stack
#[derive(Clone)]
pub struct BackResolver {
    stack: NavigationStack,
    router: Arc<dyn Router>,
    default_destination: String,
}

impl BackResolver {
    /// Create a resolver
    #[must_use]
    pub fn new(
        stack: NavigationStack,
        router: Arc<dyn Router>,
        default_destination: impl Into<String>,
    ) -> Self {
        Self {
            stack,
            router,
            default_destination: default_destination.into(),
        }
    }

    /// Create a resolver using the configured default destination
    #[must_use]
    pub fn from_config(
        stack: NavigationStack,
        router: Arc<dyn Router>,
        config: &WaypointConfig,
    ) -> Self {
        Self::new(stack, router, config.default_destination.clone())
    }

    /// Stack this resolver reads
    #[inline]
    #[must_use]
    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    /// Build the "back" action
    ///
    /// Nothing is read or changed until the returned action is performed, so
    /// it can be handed to a guard and run after a confirmation.
    #[must_use]
    pub fn resolve_back(&self, scroll: Option<ScrollConfig>) -> BackNavigation {
        BackNavigation {
            resolver: self.clone(),
            scroll,
        }
    }

    /// Destination used when there is no history
    #[must_use]
    pub fn fallback_destination(&self) -> String {
        self.stack
            .side_channel()
            .search_url()
            .unwrap_or_else(|| self.default_destination.clone())
    }

    fn go_to_fallback(&self) -> BackTarget {
        let url = self.fallback_destination();
        tracing::info!(%url, "no history to go back to, using fallback destination");
        self.router.navigate(&url);
        BackTarget::Fallback(url)
    }

    fn perform(&self, scroll: Option<&ScrollConfig>) -> BackTarget {
        let Some(previous) = self.stack.previous() else {
            return self.go_to_fallback();
        };

        match scroll {
            Some(config) if previous.kind == config.from_page => {
                self.stack
                    .side_channel()
                    .set_scroll_target(&config.to_section);
                self.stack.pop();

                if previous.has_url() {
                    tracing::info!(entry = %previous, section = %config.to_section, "back to section");
                    self.router.navigate(&previous.url);
                    BackTarget::Section {
                        entry: previous,
                        section: config.to_section.clone(),
                    }
                } else if self.router.history_depth() > 1 {
                    tracing::info!(entry = %previous, "previous entry has no url, using platform back");
                    self.router.go_back_one_frame();
                    BackTarget::PlatformBack
                } else {
                    self.go_to_fallback()
                }
            }
            _ => {
                self.stack.pop();
                if previous.has_url() {
                    tracing::info!(entry = %previous, "back");
                    self.router.navigate(&previous.url);
                    BackTarget::Entry(previous)
                } else {
                    self.go_to_fallback()
                }
            }
        }
    }
}

impl fmt::Debug for BackResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackResolver")
            .field("stack", &self.stack)
            .field("default_destination", &self.default_destination)
            .finish_non_exhaustive()
    }
}

/// A resolved "back" action, run with [`perform`](Self::perform)
#[derive(Debug, Clone)]
pub struct BackNavigation {
    resolver: BackResolver,
    scroll: Option<ScrollConfig>,
}

impl BackNavigation {
    /// Read the stack and navigate
    ///
    /// Each call resolves against the stack as it is at that moment.
    pub fn perform(&self) -> BackTarget {
        self.resolver.perform(self.scroll.as_ref())
    }

    /// Scroll config this action was resolved with
    #[inline]
    #[must_use]
    pub fn scroll(&self) -> Option<&ScrollConfig> {
        self.scroll.as_ref()
    }

    /// Box as a plain callback, e.g. a guard's navigate action
    #[must_use]
    pub fn into_callback(self) -> Box<dyn FnMut()> {
        Box::new(move || {
            self.perform();
        })
    }
}
