//! Simulated browser history
//!
//! A frame list with a cursor. `navigate` and back steps are queued and only
//! take effect when the runner drains the queue, the way a real browser
//! commits them after the current task. `push_synthetic_frame` is
//! synchronous, like `history.pushState`.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use waypoint_core::{Location, Router};

/// URL reported before anything is loaded
pub const BLANK_URL: &str = "about:blank";

/// One history frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Address shown for this frame
    pub url: String,
    /// Pushed by a guard rather than by a navigation
    pub synthetic: bool,
}

/// Queued browser work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// Load a new document
    Navigate(String),
    /// Step one frame back
    Back,
}

/// What happened when an event was committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Committed {
    /// A new frame was created for `url`
    Navigated {
        /// Loaded address
        url: String,
    },
    /// The cursor moved back onto `url`
    Popped {
        /// Address of the frame now current
        url: String,
    },
    /// Back at the first frame; nothing to pop
    AtStart,
}

#[derive(Debug, Default)]
struct BrowserState {
    frames: Vec<Frame>,
    cursor: usize,
    queue: VecDeque<BrowserEvent>,
    navigations: Vec<String>,
}

impl BrowserState {
    fn current(&self) -> Option<&Frame> {
        self.frames.get(self.cursor)
    }

    fn push_frame(&mut self, frame: Frame) {
        if !self.frames.is_empty() {
            self.frames.truncate(self.cursor + 1);
        }
        self.frames.push(frame);
        self.cursor = self.frames.len() - 1;
    }
}

/// One tab's history
#[derive(Debug, Default)]
pub struct SimulatedBrowser {
    state: Mutex<BrowserState>,
}

impl SimulatedBrowser {
    /// Empty tab showing [`BLANK_URL`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The user pressed the platform back button
    pub fn press_back(&self) {
        self.state.lock().queue.push_back(BrowserEvent::Back);
    }

    /// Commit the oldest queued event
    pub fn commit_next(&self) -> Option<Committed> {
        let mut state = self.state.lock();
        let event = state.queue.pop_front()?;

        let committed = match event {
            BrowserEvent::Navigate(url) => {
                state.push_frame(Frame {
                    url: url.clone(),
                    synthetic: false,
                });
                state.navigations.push(url.clone());
                Committed::Navigated { url }
            }
            BrowserEvent::Back if state.cursor == 0 => Committed::AtStart,
            BrowserEvent::Back => {
                state.cursor -= 1;
                let url = state
                    .current()
                    .map_or_else(|| BLANK_URL.to_string(), |frame| frame.url.clone());
                Committed::Popped { url }
            }
        };
        tracing::trace!(?committed, "browser event committed");
        Some(committed)
    }

    /// Whether events are waiting
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.state.lock().queue.is_empty()
    }

    /// Drop queued events and every frame; the tab is gone
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.queue.clear();
        state.frames.clear();
        state.cursor = 0;
    }

    /// All frames, oldest first
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.state.lock().frames.clone()
    }

    /// Every committed navigation, in order
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().navigations.clone()
    }
}

impl Location for SimulatedBrowser {
    fn current_url(&self) -> String {
        self.state
            .lock()
            .current()
            .map_or_else(|| BLANK_URL.to_string(), |frame| frame.url.clone())
    }
}

impl Router for SimulatedBrowser {
    fn history_depth(&self) -> usize {
        let state = self.state.lock();
        if state.frames.is_empty() {
            0
        } else {
            state.cursor + 1
        }
    }

    fn navigate(&self, url: &str) {
        self.state
            .lock()
            .queue
            .push_back(BrowserEvent::Navigate(url.to_string()));
    }

    fn go_back_one_frame(&self) {
        self.state.lock().queue.push_back(BrowserEvent::Back);
    }

    fn push_synthetic_frame(&self) {
        let mut state = self.state.lock();
        let url = state
            .current()
            .map_or_else(|| BLANK_URL.to_string(), |frame| frame.url.clone());
        state.push_frame(Frame {
            url,
            synthetic: true,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed_all(browser: &SimulatedBrowser) -> Vec<Committed> {
        std::iter::from_fn(|| browser.commit_next()).collect()
    }

    #[test]
    fn navigate_is_queued_until_committed() {
        let browser = SimulatedBrowser::new();
        browser.navigate("/search");
        assert_eq!(browser.current_url(), BLANK_URL);
        assert_eq!(browser.history_depth(), 0);

        assert_eq!(
            committed_all(&browser),
            vec![Committed::Navigated {
                url: "/search".to_string()
            }]
        );
        assert_eq!(browser.current_url(), "/search");
        assert_eq!(browser.history_depth(), 1);
    }

    #[test]
    fn synthetic_frame_keeps_url() {
        let browser = SimulatedBrowser::new();
        browser.navigate("/veterans/1/edit");
        committed_all(&browser);

        browser.push_synthetic_frame();
        assert_eq!(browser.history_depth(), 2);
        assert_eq!(browser.current_url(), "/veterans/1/edit");
        assert!(browser.frames()[1].synthetic);

        browser.press_back();
        assert_eq!(
            browser.commit_next(),
            Some(Committed::Popped {
                url: "/veterans/1/edit".to_string()
            })
        );
        assert_eq!(browser.history_depth(), 1);
    }

    #[test]
    fn navigating_drops_forward_frames() {
        let browser = SimulatedBrowser::new();
        browser.navigate("/a");
        browser.navigate("/b");
        browser.go_back_one_frame();
        browser.navigate("/c");
        committed_all(&browser);

        let urls: Vec<_> = browser.frames().into_iter().map(|f| f.url).collect();
        assert_eq!(urls, vec!["/a", "/c"]);
        assert_eq!(browser.navigations(), vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn back_at_first_frame_goes_nowhere() {
        let browser = SimulatedBrowser::new();
        browser.navigate("/search");
        browser.press_back();
        let committed = committed_all(&browser);
        assert_eq!(committed.last(), Some(&Committed::AtStart));
        assert_eq!(browser.current_url(), "/search");
    }

    #[test]
    fn close_forgets_everything_but_the_log() {
        let browser = SimulatedBrowser::new();
        browser.navigate("/search");
        committed_all(&browser);
        browser.navigate("/veterans/1");
        browser.close();

        assert!(!browser.has_pending());
        assert_eq!(browser.current_url(), BLANK_URL);
        assert_eq!(browser.navigations(), vec!["/search"]);
    }
}
