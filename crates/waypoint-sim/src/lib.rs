//! Waypoint Scenario Simulator
//!
//! Drives the navigation stack, back resolver and unsaved-changes guard
//! through scripted user sessions against a simulated browser tab.
//!
//! # Example
//!
//! ```rust
//! use waypoint_sim::{Scenario, ScenarioRunner};
//!
//! let scenario = Scenario::from_yaml_str(r"
//! name: search then detail
//! pages:
//!   - { url: /search, kind: search, title: Search }
//!   - { url: /veterans/7, kind: veteran-detail, title: Veteran 7 }
//! steps:
//!   - { action: open, url: /search }
//!   - { action: follow, url: /veterans/7 }
//!   - { action: expect, stack_len: 2, back_link_text: Back to Search }
//! ").unwrap();
//!
//! let report = ScenarioRunner::default().run(&scenario);
//! assert!(report.passed());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod browser;
pub mod error;
pub mod runner;
pub mod scenario;

pub use browser::{Committed, Frame, SimulatedBrowser};
pub use error::ScenarioError;
pub use runner::{Failure, ScenarioReport, ScenarioRunner};
pub use scenario::{Expectation, Route, Scenario, Step};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
