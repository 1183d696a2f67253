//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.
//! Requests go through octocrab's raw `_get` / `_post` / `_patch` helpers so the
//! status code of every response reaches the caller untouched.

use crate::client::GitHubClient;
use crate::types::{
    ApiResponse, AssigneesRequest, NewPullRequest, PullRequestUpdate, ReviewersRequest,
};
use crate::{DEFAULT_API_URL, REQUEST_TIMEOUT};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Serialize;
use std::sync::Arc;

/// Query string of the pull request list call
#[derive(Debug, Serialize)]
struct ListQuery<'a> {
    state: &'a str,
    base: &'a str,
    head: String,
    per_page: u8,
}

/// Direct GitHub API client using octocrab
///
/// Holds two octocrab instances: an anonymous one for the first listing
/// attempt and an authenticated one for everything else.
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    anonymous: Arc<Octocrab>,
    authenticated: Arc<Octocrab>,
    owner: String,
    repo: String,
}

impl OctocrabClient {
    /// Create a new client from prepared octocrab instances
    pub fn new(
        anonymous: Arc<Octocrab>,
        authenticated: Arc<Octocrab>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            anonymous,
            authenticated,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Build a client for `owner/repo` against the given API base URL
    ///
    /// Both instances use a fixed request timeout and have octocrab's retry
    /// layer disabled. Only the authenticated one sends the token; octocrab
    /// adds the `x-github-api-version` header to every request itself.
    pub fn connect(api_url: &str, token: &str, owner: &str, repo: &str) -> anyhow::Result<Self> {
        debug!("Creating GitHub client for {}/{} at {}", owner, repo, api_url);

        let api_url = api_url.trim_end_matches('/');
        // Shared settings for both instances
        let base_builder = || -> anyhow::Result<_> {
            let mut builder = Octocrab::builder()
                .add_retry_config(RetryConfig::None)
                .set_connect_timeout(Some(REQUEST_TIMEOUT))
                .set_read_timeout(Some(REQUEST_TIMEOUT))
                .set_write_timeout(Some(REQUEST_TIMEOUT));
            if api_url != DEFAULT_API_URL {
                builder = builder
                    .base_uri(api_url)
                    .with_context(|| format!("Invalid API base URL: {}", api_url))?;
            }
            Ok(builder)
        };

        let anonymous = base_builder()?
            .build()
            .context("Failed to build anonymous Octocrab client")?;

        let authenticated = base_builder()?
            .personal_token(token.to_string())
            .build()
            .context("Failed to build Octocrab client")?;

        Ok(Self::new(
            Arc::new(anonymous),
            Arc::new(authenticated),
            owner,
            repo,
        ))
    }

    /// Route prefix for the configured repository
    fn repo_route(&self) -> String {
        format!("/repos/{}/{}", self.owner, self.repo)
    }

    fn pulls_route(&self) -> String {
        format!("{}/pulls", self.repo_route())
    }

    fn list_route(&self, base: &str, head: &str) -> anyhow::Result<String> {
        let query = ListQuery {
            state: "open",
            base,
            head: format!("{}:{}", self.owner, head),
            per_page: 100,
        };
        let query = serde_urlencoded::to_string(&query).context("Failed to encode list query")?;
        Ok(format!("{}?{}", self.pulls_route(), query))
    }

    async fn get(&self, octocrab: &Octocrab, route: &str) -> anyhow::Result<ApiResponse> {
        let response = octocrab
            ._get(route)
            .await
            .with_context(|| format!("GET {} failed", route))?;
        let status = response.status().as_u16();
        let text = octocrab.body_to_string(response).await?;
        debug!("GET {} -> {}", route, status);
        Ok(ApiResponse::from_text(status, &text))
    }

    async fn post<B: Serialize + Sync + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> anyhow::Result<ApiResponse> {
        let octocrab = &self.authenticated;
        let response = octocrab
            ._post(route, Some(body))
            .await
            .with_context(|| format!("POST {} failed", route))?;
        let status = response.status().as_u16();
        let text = octocrab.body_to_string(response).await?;
        debug!("POST {} -> {}", route, status);
        Ok(ApiResponse::from_text(status, &text))
    }

    async fn patch<B: Serialize + Sync + ?Sized>(
        &self,
        route: &str,
        body: &B,
    ) -> anyhow::Result<ApiResponse> {
        let octocrab = &self.authenticated;
        let response = octocrab
            ._patch(route, Some(body))
            .await
            .with_context(|| format!("PATCH {} failed", route))?;
        let status = response.status().as_u16();
        let text = octocrab.body_to_string(response).await?;
        debug!("PATCH {} -> {}", route, status);
        Ok(ApiResponse::from_text(status, &text))
    }
}

/// Whether an anonymous listing should be retried with credentials
pub fn needs_credentials(status: u16) -> bool {
    matches!(status, 401 | 404)
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn list_pull_requests(&self, base: &str, head: &str) -> anyhow::Result<ApiResponse> {
        debug!("Listing open PRs {} -> {} in {}/{}", head, base, self.owner, self.repo);
        let route = self.list_route(base, head)?;

        let response = self.get(&self.anonymous, &route).await?;
        if !needs_credentials(response.status) {
            return Ok(response);
        }

        debug!(
            "Anonymous listing rejected with {}, retrying with token",
            response.status
        );
        self.get(&self.authenticated, &route).await
    }

    async fn create_pull_request(
        &self,
        request: &NewPullRequest,
    ) -> anyhow::Result<ApiResponse> {
        self.post(&self.pulls_route(), request).await
    }

    async fn update_pull_request(
        &self,
        pr_number: u64,
        update: &PullRequestUpdate,
    ) -> anyhow::Result<ApiResponse> {
        let route = format!("{}/{}", self.pulls_route(), pr_number);
        self.patch(&route, update).await
    }

    async fn add_assignees(
        &self,
        issue_number: u64,
        assignees: &[String],
    ) -> anyhow::Result<ApiResponse> {
        let route = format!("{}/issues/{}/assignees", self.repo_route(), issue_number);
        self.post(&route, &AssigneesRequest { assignees }).await
    }

    async fn request_reviewers(
        &self,
        pr_number: u64,
        reviewers: &[String],
        team_reviewers: &[String],
    ) -> anyhow::Result<ApiResponse> {
        let route = format!("{}/{}/requested_reviewers", self.pulls_route(), pr_number);
        self.post(
            &route,
            &ReviewersRequest {
                reviewers,
                team_reviewers,
            },
        )
        .await
    }
}
