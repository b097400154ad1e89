//! Scenario files
//!
//! ```yaml
//! name: back from an edit page
//! pages:
//!   - { url: /search, kind: search, title: Search }
//!   - { url: /veterans/7/edit, kind: veteran-detail, title: Edit veteran, guarded: true }
//! steps:
//!   - { action: open, url: /search }
//!   - { action: follow, url: /veterans/7/edit }
//!   - { action: edit }
//!   - { action: native_back }
//!   - { action: expect, dialog_open: true }
//! ```

use crate::error::ScenarioError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use waypoint_core::{PageKind, ScrollConfig};

/// A page the simulated app can show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Exact address of the page
    pub url: String,
    /// Logical kind registered on load
    pub kind: PageKind,
    /// Title registered on load
    pub title: String,
    /// Page has an unsaved-changes guard
    #[serde(default)]
    pub guarded: bool,
    /// Scroll hand-off used by the page's back link
    #[serde(default)]
    pub back_scroll: Option<ScrollConfig>,
}

/// Checks run against the simulated tab; unset fields are not checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// Address of the current frame
    pub url: Option<String>,
    /// Navigation stack length
    pub stack_len: Option<usize>,
    /// Confirmation dialog shown
    pub dialog_open: Option<bool>,
    /// Title of the top stack entry
    pub top_title: Option<String>,
    /// Label of the in-app back link
    pub back_link_text: Option<String>,
    /// Section the current page scrolled to on load
    pub scroll_target: Option<String>,
    /// Committed navigations so far
    pub navigations: Option<usize>,
    /// Whether the last unload asked the user to confirm
    pub unload_prompted: Option<bool>,
}

/// One thing the user (or the test) does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Type an address
    Open {
        /// Address to load
        url: String,
    },
    /// Click an in-app link to a listed page
    Follow {
        /// Target page address
        url: String,
    },
    /// Make the current page dirty
    Edit,
    /// Make the current page clean
    Save,
    /// Click the in-app back link
    BackLink,
    /// Click a back link that returns to a section of the previous page
    BackToSection {
        /// Kind the previous page must have
        from_page: PageKind,
        /// Section to scroll into view
        section: String,
    },
    /// Press the platform back button
    NativeBack,
    /// Dialog: discard changes
    Discard,
    /// Dialog: stay on the page
    Cancel,
    /// Close the tab, ending the session
    CloseTab,
    /// Check the current state
    Expect(Expectation),
}

/// A scripted session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Display name
    pub name: String,
    /// Stack cap for this scenario
    #[serde(default)]
    pub max_entries: Option<usize>,
    /// Guards observe the platform back button
    #[serde(default = "default_intercept")]
    pub intercept_native_back: bool,
    /// Routes of the simulated app
    pub pages: Vec<Route>,
    /// Script
    pub steps: Vec<Step>,
}

fn default_intercept() -> bool {
    true
}

impl Scenario {
    /// Parse and validate YAML
    ///
    /// # Errors
    /// Malformed YAML or an inconsistent page table.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_yaml::from_str(contents)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load from a file
    ///
    /// # Errors
    /// Unreadable file or invalid contents.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| ScenarioError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "loading scenario");
        Self::from_yaml_str(&contents)
    }

    /// Page registered at `url`
    #[must_use]
    pub fn page(&self, url: &str) -> Option<&Route> {
        self.pages.iter().find(|page| page.url == url)
    }

    /// Check that pages are unique and every step targets a listed page
    ///
    /// # Errors
    /// `ScenarioError::Invalid` naming the first problem.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.max_entries == Some(0) {
            return Err(self.invalid("max_entries must be at least 1"));
        }

        let mut seen = HashSet::new();
        for page in &self.pages {
            if page.url.trim().is_empty() {
                return Err(self.invalid("page with an empty url"));
            }
            if !seen.insert(page.url.as_str()) {
                return Err(self.invalid(format!("page '{}' listed twice", page.url)));
            }
        }

        for (index, step) in self.steps.iter().enumerate() {
            if let Step::Open { url } | Step::Follow { url } = step {
                if self.page(url).is_none() {
                    return Err(self.invalid(format!(
                        "step {}: '{url}' is not a listed page",
                        index + 1
                    )));
                }
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> ScenarioError {
        ScenarioError::Invalid {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r"
name: minimal
pages:
  - { url: /search, kind: search, title: Search }
  - url: /veterans/7/edit
    kind: veteran-detail
    title: Edit veteran
    guarded: true
    back_scroll: { from_page: veteran-detail, to_section: guardians }
steps:
  - { action: open, url: /search }
  - { action: edit }
  - { action: back_to_section, from_page: guardian-detail, section: notes }
  - { action: expect, stack_len: 1, dialog_open: false }
";

    #[test]
    fn parses_steps_and_pages() {
        let scenario = Scenario::from_yaml_str(MINIMAL).unwrap();
        assert!(scenario.intercept_native_back);
        assert_eq!(scenario.pages.len(), 2);
        assert_eq!(
            scenario.page("/veterans/7/edit").unwrap().back_scroll,
            Some(ScrollConfig::new(PageKind::VeteranDetail, "guardians"))
        );
        assert_eq!(scenario.steps[1], Step::Edit);
        assert_eq!(
            scenario.steps[2],
            Step::BackToSection {
                from_page: PageKind::GuardianDetail,
                section: "notes".to_string(),
            }
        );
        assert_eq!(
            scenario.steps[3],
            Step::Expect(Expectation {
                stack_len: Some(1),
                dialog_open: Some(false),
                ..Expectation::default()
            })
        );
    }

    #[test]
    fn rejects_unlisted_page() {
        let yaml = r"
name: broken
pages:
  - { url: /search, kind: search, title: Search }
steps:
  - { action: follow, url: /veterans/1 }
";
        let err = Scenario::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("/veterans/1"));
    }

    #[test]
    fn rejects_duplicate_page() {
        let yaml = r"
name: broken
pages:
  - { url: /search, kind: search, title: Search }
  - { url: /search, kind: search, title: Again }
steps: []
";
        assert!(matches!(
            Scenario::from_yaml_str(yaml),
            Err(ScenarioError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_unknown_page_kind() {
        let yaml = r"
name: broken
pages:
  - { url: /x, kind: dashboard, title: X }
steps: []
";
        assert!(matches!(
            Scenario::from_yaml_str(yaml),
            Err(ScenarioError::Parse(_))
        ));
    }
}
