//! GitHub API data transfer objects
//!
//! These types represent the pull request shapes exchanged with the GitHub
//! API. Response types only model the fields the action reads; everything
//! else in the payload is ignored.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pull request as returned by the list, create and update endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number (e.g., 123)
    pub number: u64,

    /// PR title
    #[serde(default)]
    pub title: Option<String>,

    /// PR URL for opening in browser
    #[serde(default)]
    pub html_url: Option<String>,

    /// HEAD branch reference
    #[serde(default)]
    pub head: BranchRef,

    /// Base branch reference
    #[serde(default)]
    pub base: BranchRef,
}

impl PullRequest {
    /// HEAD branch name (e.g., "feature/foo")
    pub fn head_branch(&self) -> &str {
        &self.head.ref_field
    }
}

/// A branch reference nested in a pull request (`head` / `base`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    #[serde(rename = "ref", default)]
    pub ref_field: String,
}

/// Requested state of a pull request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestState {
    #[default]
    Open,
    Closed,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestState::Open => "open",
            PullRequestState::Closed => "closed",
        }
    }
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    /// Target branch
    pub base: String,
    /// Source branch
    pub head: String,
    pub draft: bool,
    pub maintainer_can_modify: bool,
}

/// Body of `PATCH /repos/{owner}/{repo}/pulls/{pull_number}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestUpdate {
    pub title: String,
    pub body: String,
    /// Target branch
    pub base: String,
    pub state: PullRequestState,
    pub maintainer_can_modify: bool,
}

/// Body of `POST /repos/{owner}/{repo}/issues/{issue_number}/assignees`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssigneesRequest<'a> {
    pub assignees: &'a [String],
}

/// Body of `POST /repos/{owner}/{repo}/pulls/{pull_number}/requested_reviewers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewersRequest<'a> {
    pub reviewers: &'a [String],
    pub team_reviewers: &'a [String],
}

/// Raw outcome of a single API call
///
/// Write endpoints are judged by their exact status code rather than by the
/// 2xx range, so the status is kept alongside the decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,

    /// JSON body, or the raw text as a JSON string if it wasn't JSON
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    /// Build a response from a status code and raw body text
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(text)
                .unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
        };
        Self { status, body }
    }

    /// Canonical reason phrase for the status code (e.g., "Not Found")
    pub fn reason(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
    }

    pub fn is(&self, expected: u16) -> bool {
        self.status == expected
    }

    /// Decode the body as a pull request
    ///
    /// Returns `None` when the body isn't a pull request object (e.g. an
    /// error payload).
    pub fn pull_request(&self) -> Option<PullRequest> {
        serde_json::from_value(self.body.clone()).ok()
    }

    /// Decode the body as a list of pull requests
    pub fn pull_requests(&self) -> anyhow::Result<Vec<PullRequest>> {
        Ok(serde_json::from_value(self.body.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pull_request_deserialize_ignores_extra_fields() {
        let body = json!({
            "number": 42,
            "title": "Update from feature/x",
            "html_url": "https://github.com/octo/repo/pull/42",
            "head": { "ref": "feature/x", "sha": "abc123", "label": "octo:feature/x" },
            "base": { "ref": "master" },
            "user": { "login": "octocat" },
            "draft": false
        });
        let pr: PullRequest = serde_json::from_value(body).unwrap();
        assert_eq!(pr.number, 42);
        assert_eq!(pr.title.as_deref(), Some("Update from feature/x"));
        assert_eq!(pr.head_branch(), "feature/x");
        assert_eq!(pr.base.ref_field, "master");
        assert_eq!(
            pr.html_url.as_deref(),
            Some("https://github.com/octo/repo/pull/42")
        );
    }

    #[test]
    fn test_pull_request_missing_head_defaults() {
        let pr: PullRequest = serde_json::from_value(json!({ "number": 7 })).unwrap();
        assert_eq!(pr.head_branch(), "");
        assert!(pr.html_url.is_none());
    }

    #[test]
    fn test_new_pull_request_serialize() {
        let body = NewPullRequest {
            title: "t".into(),
            body: "b".into(),
            base: "master".into(),
            head: "feature/x".into(),
            draft: true,
            maintainer_can_modify: false,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "title": "t",
                "body": "b",
                "base": "master",
                "head": "feature/x",
                "draft": true,
                "maintainer_can_modify": false
            })
        );
    }

    #[test]
    fn test_update_serializes_state_lowercase() {
        let body = PullRequestUpdate {
            title: "t".into(),
            body: "b".into(),
            base: "main".into(),
            state: PullRequestState::Closed,
            maintainer_can_modify: true,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["state"], "closed");
    }

    #[test]
    fn test_api_response_from_text() {
        let ok = ApiResponse::from_text(201, r#"{"number": 3}"#);
        assert_eq!(ok.pull_request().map(|pr| pr.number), Some(3));

        let plain = ApiResponse::from_text(502, "Bad gateway");
        assert_eq!(plain.body, json!("Bad gateway"));
        assert!(plain.pull_request().is_none());

        let empty = ApiResponse::from_text(204, "");
        assert_eq!(empty.body, serde_json::Value::Null);
    }

    #[test]
    fn test_api_response_reason() {
        assert_eq!(ApiResponse::new(404, json!({})).reason(), "Not Found");
        assert_eq!(ApiResponse::new(422, json!({})).reason(), "Unprocessable Entity");
        assert_eq!(ApiResponse::new(599, json!({})).reason(), "Unknown");
    }

    #[test]
    fn test_error_payload_is_not_a_pull_request_list() {
        let response = ApiResponse::new(200, json!({"message": "Bad credentials"}));
        assert!(response.pull_requests().is_err());
    }
}
