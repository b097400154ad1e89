//! Error types for the simulator

use std::path::PathBuf;

/// Errors loading a scenario
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Scenario file could not be read
    #[error("io error on {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Not valid scenario YAML
    #[error("scenario parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Parsed, but inconsistent
    #[error("invalid scenario '{name}': {reason}")]
    Invalid {
        /// Scenario name
        name: String,
        /// What is wrong
        reason: String,
    },
}

impl ScenarioError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
