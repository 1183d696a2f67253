use gh_actions_output::OutputError;
use gh_client::ApiResponse;
use gh_pr_config::ConfigError;
use std::fmt;
use thiserror::Error;

/// The API calls the action makes, named for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPullRequests,
    CreatePullRequest,
    UpdatePullRequest,
    AddAssignees,
    RequestReviewers,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Operation::ListPullRequests => "Unable to retrieve information about pull requests",
            Operation::CreatePullRequest => "Unable to create pull request",
            Operation::UpdatePullRequest => "Unable to update pull request",
            Operation::AddAssignees => "Unable to create assignees",
            Operation::RequestReviewers => "Unable to assign reviewers",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to set up the GitHub client: {0:#}")]
    Client(anyhow::Error),

    /// GitHub answered with a status other than the expected one
    #[error("{operation}: {status}: {reason}\n {body}")]
    Api {
        operation: Operation,
        status: u16,
        reason: String,
        body: String,
    },

    /// No HTTP response was received (connection failure, timeout)
    #[error("{operation}: {cause:#}")]
    Transport {
        operation: Operation,
        cause: anyhow::Error,
    },

    /// The expected status came back but the body could not be decoded
    #[error("{operation}: unexpected response body: {cause:#}")]
    InvalidResponse {
        operation: Operation,
        cause: anyhow::Error,
    },

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl ActionError {
    pub fn api(operation: Operation, response: &ApiResponse) -> Self {
        ActionError::Api {
            operation,
            status: response.status,
            reason: response.reason().to_string(),
            body: response.body.to_string(),
        }
    }

    /// HTTP status behind this error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            ActionError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
