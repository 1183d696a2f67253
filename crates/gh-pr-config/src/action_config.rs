//! Action configuration
//!
//! Resolved once from the environment at startup and handed to the
//! pull request procedure by reference.

use crate::error::ConfigError;
use crate::event::{check_event_path, EventPayload};
use crate::policy::{ErrorPolicy, ExistingPolicy};
use crate::recipients::parse_recipients;
use gh_client::{PullRequestState, DEFAULT_API_URL};
use log::info;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_TARGET_BRANCH: &str = "master";

/// Connection settings for the GitHub API
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// API base URL (`GITHUB_API_URL`), for GitHub Enterprise support
    pub url: String,
    pub token: String,
    pub owner: String,
    pub repo: String,
}

impl fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSettings")
            .field("url", &self.url)
            .field("token", &"***")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish()
    }
}

/// Everything the action needs to know about this run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub api: ApiSettings,

    /// Base branch of the pull request
    pub target_branch: String,

    /// Head branch of the pull request
    pub source_branch: String,

    /// Only branches starting with this prefix get a pull request
    pub branch_prefix: Option<String>,

    pub title: String,
    pub body: String,
    pub draft: bool,
    pub maintainer_can_modify: bool,

    /// State applied when updating an existing pull request
    pub state: PullRequestState,

    pub assignees: Vec<String>,
    pub reviewers: Vec<String>,
    pub team_reviewers: Vec<String>,

    pub existing: ExistingPolicy,
    pub error_policy: ErrorPolicy,
}

/// Environment reader that treats empty values as unset
struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.is_empty())
    }

    fn flag(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// First set variable among `keys`, in order
    fn require(&self, keys: &[&'static str]) -> Result<String, ConfigError> {
        keys.iter()
            .find_map(|key| self.get(key))
            .ok_or(ConfigError::Missing(keys[keys.len() - 1]))
    }
}

impl ActionConfig {
    /// Resolve the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary key lookup
    ///
    /// Fails on missing credentials, repository or event file, an invalid
    /// state, or when no source branch can be determined.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let token = env.require(&["PULL_REQUEST_TOKEN", "GITHUB_TOKEN"])?;
        let repository = env.require(&["PULL_REQUEST_REPOSITORY", "GITHUB_REPOSITORY"])?;
        let (owner, repo) = split_repository(&repository)?;
        let url = env
            .get("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let event_path = check_event_path(PathBuf::from(env.require(&["GITHUB_EVENT_PATH"])?))?;

        let branch_prefix = env.get("BRANCH_PREFIX");
        match &branch_prefix {
            Some(prefix) => info!("Branch prefix is {}", prefix),
            None => info!("No branch prefix is set, all branches will be used."),
        }

        let target_branch = env
            .get("PULL_REQUEST_BRANCH")
            .unwrap_or_else(|| DEFAULT_TARGET_BRANCH.to_string());
        info!("Pull requests will go to {}", target_branch);

        let draft = env.flag("PULL_REQUEST_DRAFT");
        if draft {
            info!("PULL_REQUEST_DRAFT set to a value: created PRs will be draft PRs.");
        } else {
            info!("No explicit preference for draft PR: created PRs will be normal PRs.");
        }

        let state = parse_state(env.get("PULL_REQUEST_STATE").as_deref())?;

        let maintainer_can_modify = !env.flag("MAINTAINER_CANT_MODIFY");
        if maintainer_can_modify {
            info!("No preference for maintainer being able to modify: default is true.");
        } else {
            info!("MAINTAINER_CANT_MODIFY set to a value: maintainer will not be able to modify.");
        }

        let assignees = recipients(&env, "PULL_REQUEST_ASSIGNEES");
        let reviewers = recipients(&env, "PULL_REQUEST_REVIEWERS");
        let team_reviewers = recipients(&env, "PULL_REQUEST_TEAM_REVIEWERS");

        let source_branch = match env.get("PULL_REQUEST_FROM_BRANCH") {
            Some(branch) => {
                info!("PULL_REQUEST_FROM_BRANCH is set.");
                branch
            }
            None => {
                info!("PULL_REQUEST_FROM_BRANCH is not set, checking branch in payload.");
                EventPayload::load(&event_path)?
                    .branch()
                    .ok_or(ConfigError::MissingSourceBranch)?
            }
        };
        info!("Found branch {} to open PR from", source_branch);

        let title = env
            .get("PULL_REQUEST_TITLE")
            .unwrap_or_else(|| format!("Update from {}", source_branch));
        let body = env.get("PULL_REQUEST_BODY").unwrap_or_else(|| {
            format!(
                "This is an automated pull request to update from branch {}",
                source_branch
            )
        });

        let existing = ExistingPolicy::from_flags(
            env.flag("PASS_IF_EXISTS"),
            env.flag("PULL_REQUEST_UPDATE"),
        );
        let error_policy = ErrorPolicy::from_flag(env.flag("PASS_ON_ERROR"));

        Ok(Self {
            api: ApiSettings {
                url,
                token,
                owner,
                repo,
            },
            target_branch,
            source_branch,
            branch_prefix,
            title,
            body,
            draft,
            maintainer_can_modify,
            state,
            assignees,
            reviewers,
            team_reviewers,
            existing,
            error_policy,
        })
    }

    /// Whether the source branch passes the configured prefix filter
    pub fn matches_prefix(&self) -> bool {
        self.branch_prefix
            .as_deref()
            .is_none_or(|prefix| self.source_branch.starts_with(prefix))
    }
}

fn recipients<F: Fn(&str) -> Option<String>>(env: &Env<F>, key: &str) -> Vec<String> {
    match env.get(key) {
        Some(value) => {
            info!("{} is set, {}", key, value);
            parse_recipients(&value)
        }
        None => {
            info!("{} is not set.", key);
            Vec::new()
        }
    }
}

fn split_repository(repository: &str) -> Result<(String, String), ConfigError> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidRepository(repository.to_string())),
    }
}

fn parse_state(value: Option<&str>) -> Result<PullRequestState, ConfigError> {
    match value {
        None | Some("open") => Ok(PullRequestState::Open),
        Some("closed") => Ok(PullRequestState::Closed),
        Some(other) => Err(ConfigError::InvalidState(other.to_string())),
    }
}
