use std::path::PathBuf;
use thiserror::Error;

/// Fatal configuration and context errors
///
/// Any of these stops the run before a single API call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is required for the pull request action")]
    Missing(&'static str),

    #[error("Invalid repository '{0}', expected 'owner/name'")]
    InvalidRepository(String),

    #[error("Cannot find GitHub events file at {}", .0.display())]
    EventFileNotFound(PathBuf),

    #[error("Failed to read GitHub events file {}: {source}", path.display())]
    EventFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse GitHub events file {}: {source}", path.display())]
    EventFileInvalid {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("State is required to be one of 'open' or 'closed', got '{0}'")]
    InvalidState(String),

    #[error("You are required to define PULL_REQUEST_FROM_BRANCH in the environment")]
    MissingSourceBranch,
}
