//! GitHub client trait
//!
//! This module defines the `GitHubClient` trait covering the handful of
//! pull request endpoints the action talks to. Every method is scoped to the
//! repository the client was built for.

use crate::types::{ApiResponse, NewPullRequest, PullRequestUpdate};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Implementations return the raw [`ApiResponse`] for every call, whatever
/// its status code. Deciding whether a status counts as success is left to
/// the caller. `Err` is reserved for failures where no HTTP response was
/// received at all (connection errors, timeouts).
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::GitHubClient;
///
/// async fn open_count(client: &dyn GitHubClient) -> anyhow::Result<usize> {
///     let response = client.list_pull_requests("master", "feature/x").await?;
///     Ok(response.pull_requests()?.len())
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// List open pull requests from `head` into `base`
    ///
    /// The first attempt is anonymous. If GitHub answers 401 or 404 the
    /// request is retried once with credentials.
    async fn list_pull_requests(&self, base: &str, head: &str) -> anyhow::Result<ApiResponse>;

    /// Open a new pull request
    ///
    /// GitHub answers `201 Created` on success.
    async fn create_pull_request(&self, request: &NewPullRequest)
        -> anyhow::Result<ApiResponse>;

    /// Update an existing pull request by number
    ///
    /// GitHub answers `200 OK` on success.
    async fn update_pull_request(
        &self,
        pr_number: u64,
        update: &PullRequestUpdate,
    ) -> anyhow::Result<ApiResponse>;

    /// Add assignees to the issue backing a pull request
    ///
    /// GitHub answers `201 Created` on success.
    async fn add_assignees(
        &self,
        issue_number: u64,
        assignees: &[String],
    ) -> anyhow::Result<ApiResponse>;

    /// Request reviews from users and teams in a single call
    ///
    /// GitHub answers `201 Created` on success.
    async fn request_reviewers(
        &self,
        pr_number: u64,
        reviewers: &[String],
        team_reviewers: &[String],
    ) -> anyhow::Result<ApiResponse>;
}
