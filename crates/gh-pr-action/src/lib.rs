//! Open or update a pull request for a pushed branch
//!
//! [`action::run`] holds the whole decision procedure. It is generic over
//! the GitHub client and the output sink so it can be driven by mocks.

pub mod action;
pub mod error;

pub use action::{run, Outcome, PullRequestReport, ReturnCode};
pub use error::{ActionError, Operation};
