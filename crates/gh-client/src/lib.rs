//! GitHub API client for the pull request action
//!
//! This crate provides a trait-based client over the few pull request
//! endpoints the action needs. The decision logic only ever sees the
//! `GitHubClient` trait, so it can run against a scripted fake in tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              GitHubClient trait                  │
//! │  - list_pull_requests()                          │
//! │  - create_pull_request() / update_pull_request() │
//! │  - add_assignees() / request_reviewers()         │
//! └─────────────────────────────────────────────────┘
//!                        │
//!                        ▼
//!              ┌─────────────────┐
//!              │ OctocrabClient  │
//!              │ (direct API)    │
//!              └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use gh_client::{GitHubClient, OctocrabClient, DEFAULT_API_URL};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = OctocrabClient::connect(DEFAULT_API_URL, "token", "octo", "repo")?;
//! let response = client.list_pull_requests("master", "feature/x").await?;
//! println!("{} open PRs", response.pull_requests()?.len());
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

pub mod client;
pub mod octocrab_client;
pub mod types;

/// Default GitHub API base URL (public GitHub)
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Timeout applied to connecting, reading and writing each request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub use client::GitHubClient;
pub use octocrab_client::OctocrabClient;
pub use types::{
    ApiResponse, BranchRef, NewPullRequest, PullRequest, PullRequestState, PullRequestUpdate,
};

// Re-export octocrab so consumers don't need to depend on it directly
pub use octocrab;
