//! Scenario runner
//!
//! Plays a [`Scenario`] against one simulated tab: a [`SimulatedBrowser`],
//! session storage, the navigation stack and resolver, and a fresh guard for
//! every guarded page that loads. Browser events are drained after each step.

use crate::browser::{Committed, SimulatedBrowser};
use crate::scenario::{Expectation, Route, Scenario, Step};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use waypoint_core::{Location, NavigationEntry, Router, ScrollConfig, WaypointConfig};
use waypoint_guard::{GuardOptions, UnloadDecision, UnsavedChangesGuard};
use waypoint_nav::{BackResolver, NavigationStack};
use waypoint_store::{MemoryBackend, SessionBackend};

/// Upper bound on browser events committed for a single step
pub const MAX_EVENTS_PER_STEP: usize = 64;

/// Back-link label shown when there is no previous page
pub const BACK_LINK_FALLBACK: &str = "Back";

/// A check or step that did not go as scripted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// 1-based step number
    pub step: usize,
    /// What was checked
    pub check: String,
    /// What went wrong
    pub detail: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} [{}]: {}", self.step, self.check, self.detail)
    }
}

/// Outcome of one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Scenario name
    pub name: String,
    /// Steps executed
    pub steps_run: usize,
    /// Everything that did not match
    pub failures: Vec<Failure>,
    /// What happened, step by step
    pub transcript: Vec<String>,
    /// Address shown at the end
    pub final_url: String,
    /// Navigation stack at the end
    pub final_stack: Vec<NavigationEntry>,
}

impl ScenarioReport {
    /// Whether every expectation held
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable report
    #[must_use]
    pub fn generate_text(&self) -> String {
        let mut report = String::new();

        let _ = writeln!(report, "=== Scenario: {} ===", self.name);
        let _ = writeln!(report, "Steps Run: {}", self.steps_run);
        let _ = writeln!(report, "Final URL: {}", self.final_url);
        let _ = writeln!(report, "Final Stack Depth: {}", self.final_stack.len());
        for entry in &self.final_stack {
            let _ = writeln!(report, "  - {entry}");
        }

        if !self.failures.is_empty() {
            report.push_str("\n=== Failures ===\n");
            for (i, failure) in self.failures.iter().enumerate() {
                let _ = writeln!(report, "{}. {failure}", i + 1);
            }
            report.push_str("\n=== Transcript ===\n");
            for line in &self.transcript {
                let _ = writeln!(report, "  {line}");
            }
        }

        let _ = writeln!(
            report,
            "\n=== Result: {} ===",
            if self.passed() { "PASS" } else { "FAIL" }
        );
        report
    }
}

/// Runs scenarios with a shared base configuration
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: WaypointConfig,
}

impl ScenarioRunner {
    /// Create a runner
    #[must_use]
    pub fn new(config: WaypointConfig) -> Self {
        Self { config }
    }

    /// Base configuration
    #[must_use]
    pub fn config(&self) -> &WaypointConfig {
        &self.config
    }

    /// Play `scenario` in a fresh tab
    ///
    /// The scenario's own `max_entries` takes precedence over the runner's.
    #[must_use]
    pub fn run(&self, scenario: &Scenario) -> ScenarioReport {
        let mut config = self.config.clone();
        if let Some(max) = scenario.max_entries {
            config = config.with_max_entries(max);
        }

        tracing::info!(scenario = %scenario.name, steps = scenario.steps.len(), "running scenario");
        let mut session = Session::new(scenario, &config);
        let mut steps_run = 0;

        for (index, step) in scenario.steps.iter().enumerate() {
            let number = index + 1;
            steps_run = number;
            session.step(number, step);
            if let Err(detail) = session.settle() {
                session.fail(number, "browser", detail);
                break;
            }
        }

        let report = session.into_report(steps_run);
        if report.passed() {
            tracing::info!(scenario = %report.name, "scenario passed");
        } else {
            tracing::warn!(scenario = %report.name, failures = report.failures.len(), "scenario failed");
        }
        report
    }
}

struct LoadedPage {
    route: Route,
    guard: Option<UnsavedChangesGuard>,
    scroll_target: Option<String>,
}

struct Session<'a> {
    scenario: &'a Scenario,
    browser: Arc<SimulatedBrowser>,
    backend: Arc<MemoryBackend>,
    stack: NavigationStack,
    resolver: BackResolver,
    options: GuardOptions,
    current: Option<LoadedPage>,
    unload_prompted: bool,
    transcript: Vec<String>,
    failures: Vec<Failure>,
}

impl<'a> Session<'a> {
    fn new(scenario: &'a Scenario, config: &WaypointConfig) -> Self {
        let browser = Arc::new(SimulatedBrowser::new());
        let backend = Arc::new(MemoryBackend::new());
        let storage: Arc<dyn SessionBackend> = backend.clone();
        let router: Arc<dyn Router> = browser.clone();

        let stack = NavigationStack::from_config(storage, config);
        let resolver = BackResolver::from_config(stack.clone(), router, config);

        Self {
            scenario,
            browser,
            backend,
            stack,
            resolver,
            options: GuardOptions::new()
                .with_native_back_interception(scenario.intercept_native_back),
            current: None,
            unload_prompted: false,
            transcript: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn step(&mut self, number: usize, step: &Step) {
        tracing::debug!(step = number, ?step, "step");
        match step {
            Step::Open { url } => {
                self.unload_prompted = self.before_unload();
                self.note(format!("open {url}"));
                self.browser.navigate(url);
            }
            Step::Follow { url } => self.follow(number, url),
            Step::Edit => self.set_dirty(number, true),
            Step::Save => self.set_dirty(number, false),
            Step::BackLink => {
                let scroll = self
                    .current
                    .as_ref()
                    .and_then(|page| page.route.back_scroll.clone());
                self.back(scroll);
            }
            Step::BackToSection { from_page, section } => {
                self.back(Some(ScrollConfig::new(*from_page, section.clone())));
            }
            Step::NativeBack => {
                self.note("native back");
                self.browser.press_back();
            }
            Step::Discard => {
                let result = self.guard_mut().map(UnsavedChangesGuard::discard);
                match result {
                    Some(Ok(())) => self.note("discard"),
                    Some(Err(e)) => self.note(format!("discard rejected: {e}")),
                    None => self.fail(number, "discard", "no guarded page is loaded"),
                }
            }
            Step::Cancel => {
                let result = self.guard_mut().map(UnsavedChangesGuard::cancel);
                match result {
                    Some(Ok(())) => self.note("cancel"),
                    Some(Err(e)) => self.note(format!("cancel rejected: {e}")),
                    None => self.fail(number, "cancel", "no guarded page is loaded"),
                }
            }
            Step::CloseTab => self.close_tab(),
            Step::Expect(expectation) => self.check(number, expectation),
        }
    }

    fn follow(&mut self, number: usize, url: &str) {
        let Some(route) = self.scenario.page(url) else {
            self.fail(number, "follow", format!("'{url}' is not a listed page"));
            return;
        };

        // Links push a descriptive entry before navigating
        let entry = NavigationEntry::new(route.kind, route.url.clone(), route.title.clone());
        let stack = self.stack.clone();
        let browser = Arc::clone(&self.browser);
        let target = url.to_string();
        let go = move || {
            stack.push(entry);
            browser.navigate(&target);
        };

        self.note(format!("follow {url}"));
        match self.guard_mut() {
            Some(guard) => {
                let outcome = guard.request_navigation_with(go);
                self.note(format!("guard: {outcome:?}"));
            }
            None => go(),
        }
    }

    fn back(&mut self, scroll: Option<ScrollConfig>) {
        let navigation = self.resolver.resolve_back(scroll);
        match self.guard_mut() {
            Some(guard) => {
                let outcome = guard.request_navigation_with(move || {
                    navigation.perform();
                });
                self.note(format!("back link, guard: {outcome:?}"));
            }
            None => {
                let target = navigation.perform();
                self.note(format!("back link to {target:?}"));
            }
        }
    }

    fn set_dirty(&mut self, number: usize, dirty: bool) {
        match self.guard_mut() {
            Some(guard) => guard.set_dirty(dirty),
            None => {
                let check = if dirty { "edit" } else { "save" };
                self.fail(number, check, "no guarded page is loaded");
            }
        }
    }

    fn close_tab(&mut self) {
        self.unload_prompted = self.before_unload();
        if let Some(mut page) = self.current.take() {
            if let Some(guard) = page.guard.as_mut() {
                guard.unmount();
            }
        }
        self.browser.close();
        if let Err(e) = self.backend.clear() {
            tracing::warn!(error = %e, "failed to clear session storage");
        }
        self.note(format!("tab closed, unload prompted: {}", self.unload_prompted));
    }

    fn before_unload(&self) -> bool {
        self.current
            .as_ref()
            .and_then(|page| page.guard.as_ref())
            .is_some_and(|guard| guard.before_unload() == UnloadDecision::Prompt)
    }

    /// Commit queued browser events until the tab is quiet
    fn settle(&mut self) -> Result<(), String> {
        for _ in 0..MAX_EVENTS_PER_STEP {
            let Some(committed) = self.browser.commit_next() else {
                return Ok(());
            };
            match committed {
                Committed::Navigated { url } => {
                    if let Some(guard) = self.guard_mut() {
                        guard.navigation_started();
                    }
                    self.load(&url);
                }
                Committed::Popped { url } => {
                    if let Some(guard) = self.guard_mut() {
                        let reaction = guard.handle_native_back();
                        self.note(format!("popped to {url}, guard: {reaction:?}"));
                    } else {
                        self.note(format!("popped to {url}"));
                    }
                    let same_document = self
                        .current
                        .as_ref()
                        .is_some_and(|page| page.route.url == self.browser.current_url());
                    if !same_document {
                        let now = self.browser.current_url();
                        self.load(&now);
                    }
                }
                Committed::AtStart => self.note("back ignored, first frame"),
            }
        }
        Err(format!(
            "still busy after {MAX_EVENTS_PER_STEP} browser events"
        ))
    }

    fn load(&mut self, url: &str) {
        if let Some(mut page) = self.current.take() {
            if let Some(guard) = page.guard.as_mut() {
                guard.unmount();
            }
        }

        let Some(route) = self.scenario.page(url).cloned() else {
            tracing::warn!(%url, "no page registered for url");
            self.note(format!("left the app at {url}"));
            return;
        };

        let scroll_target = self.stack.side_channel().take_scroll_target();
        let init = self
            .stack
            .initialize_current_page(route.kind, &route.title, self.browser.as_ref());

        let guard = route.guarded.then(|| {
            let router: Arc<dyn Router> = self.browser.clone();
            let on_navigate = self
                .resolver
                .resolve_back(route.back_scroll.clone())
                .into_callback();
            let mut guard = UnsavedChangesGuard::new(router, on_navigate, self.options);
            guard.mount();
            guard
        });

        self.note(format!("loaded {url} ({init:?})"));
        self.current = Some(LoadedPage {
            route,
            guard,
            scroll_target,
        });
    }

    fn check(&mut self, number: usize, expected: &Expectation) {
        let page = self.current.as_ref();
        let guard = page.and_then(|p| p.guard.as_ref());

        let mut mismatches = Vec::new();
        let mut compare = |check: &str, want: Option<String>, got: String| {
            if let Some(want) = want {
                if want != got {
                    mismatches.push((check.to_string(), format!("expected {want}, got {got}")));
                }
            }
        };

        compare("url", expected.url.clone(), self.browser.current_url());
        compare(
            "stack_len",
            expected.stack_len.map(|n| n.to_string()),
            self.stack.len().to_string(),
        );
        compare(
            "dialog_open",
            expected.dialog_open.map(|b| b.to_string()),
            guard.is_some_and(UnsavedChangesGuard::dialog_open).to_string(),
        );
        compare(
            "top_title",
            expected.top_title.clone(),
            self.stack
                .peek()
                .map_or_else(|| "<none>".to_string(), |entry| entry.title),
        );
        compare(
            "back_link_text",
            expected.back_link_text.clone(),
            self.stack.back_link_text(BACK_LINK_FALLBACK),
        );
        compare(
            "scroll_target",
            expected.scroll_target.clone(),
            page.and_then(|p| p.scroll_target.clone())
                .unwrap_or_else(|| "<none>".to_string()),
        );
        compare(
            "navigations",
            expected.navigations.map(|n| n.to_string()),
            self.browser.navigations().len().to_string(),
        );
        compare(
            "unload_prompted",
            expected.unload_prompted.map(|b| b.to_string()),
            self.unload_prompted.to_string(),
        );

        for (check, detail) in mismatches {
            self.fail(number, &check, detail);
        }
    }

    fn guard_mut(&mut self) -> Option<&mut UnsavedChangesGuard> {
        self.current.as_mut().and_then(|page| page.guard.as_mut())
    }

    fn note(&mut self, line: impl Into<String>) {
        self.transcript.push(line.into());
    }

    fn fail(&mut self, step: usize, check: &str, detail: impl Into<String>) {
        let failure = Failure {
            step,
            check: check.to_string(),
            detail: detail.into(),
        };
        tracing::debug!(%failure, "expectation failed");
        self.failures.push(failure);
    }

    fn into_report(self, steps_run: usize) -> ScenarioReport {
        ScenarioReport {
            name: self.scenario.name.clone(),
            steps_run,
            failures: self.failures,
            transcript: self.transcript,
            final_url: self.browser.current_url(),
            final_stack: self.stack.entries(),
        }
    }
}
