//! Behaviour switches for existing pull requests and failed API calls

use log::warn;
use std::fmt;

/// What to do when an open pull request for the branch already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistingPolicy {
    /// Leave it alone and finish successfully
    #[default]
    Skip,
    /// Exit successfully right away (`PASS_IF_EXISTS`)
    Pass,
    /// Update title, body, base and state (`PULL_REQUEST_UPDATE`)
    Update,
}

impl ExistingPolicy {
    /// `PASS_IF_EXISTS` takes precedence over `PULL_REQUEST_UPDATE`
    pub fn from_flags(pass_if_exists: bool, update_if_exists: bool) -> Self {
        if pass_if_exists {
            ExistingPolicy::Pass
        } else if update_if_exists {
            ExistingPolicy::Update
        } else {
            ExistingPolicy::Skip
        }
    }
}

/// How failed API calls are treated
///
/// Applies to transport and API failures only. Configuration errors are
/// always fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Stop the run with the error
    #[default]
    Abort,
    /// Log the error and carry on with the next step (`PASS_ON_ERROR`)
    Continue,
}

impl ErrorPolicy {
    pub fn from_flag(pass_on_error: bool) -> Self {
        if pass_on_error {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Abort
        }
    }

    /// Apply the policy to a failure
    ///
    /// Returns the error back under `Abort`. Under `Continue` the error is
    /// logged and swallowed.
    pub fn handle<E: fmt::Display>(&self, error: E) -> Result<(), E> {
        match self {
            ErrorPolicy::Abort => Err(error),
            ErrorPolicy::Continue => {
                warn!("Error, but PASS_ON_ERROR is set, continuing: {}", error);
                Ok(())
            }
        }
    }
}
