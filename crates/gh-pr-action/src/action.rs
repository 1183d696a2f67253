//! Decide what to do with the pushed branch and talk to GitHub accordingly
//!
//! The flow is strictly sequential:
//!
//! ```text
//! same branch / prefix mismatch ──► done
//!            │
//!            ▼
//!   list open PRs head → base
//!            │
//!   ┌────────┴──────────────┐
//!   ▼ no match              ▼ match
//! create          pass / update / leave alone
//!   │                       │ (update)
//!   └──────────┬────────────┘
//!              ▼
//!   report outputs ──► assignees ──► reviewers
//! ```

use crate::error::{ActionError, Operation};
use gh_actions_output::{commands, OutputSink};
use gh_client::{
    ApiResponse, GitHubClient, NewPullRequest, PullRequest, PullRequestUpdate,
};
use gh_pr_config::{ActionConfig, ErrorPolicy, ExistingPolicy};
use log::info;
use std::fmt;

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;

/// Return code reported to downstream steps
///
/// `0` when the call answered with its expected status, the HTTP status
/// otherwise, and `-1` when no response arrived at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Success,
    Status(u16),
    NoResponse,
}

impl ReturnCode {
    pub fn from_status(status: u16, expected: u16) -> Self {
        if status == expected {
            ReturnCode::Success
        } else {
            ReturnCode::Status(status)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ReturnCode::Success)
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnCode::Success => f.write_str("0"),
            ReturnCode::Status(status) => write!(f, "{}", status),
            ReturnCode::NoResponse => f.write_str("-1"),
        }
    }
}

/// What a create or update attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestReport {
    pub number: Option<u64>,
    pub url: Option<String>,
    pub return_code: ReturnCode,
}

/// How the run ended (every variant is a successful exit)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Source and target branch are the same
    SameBranch,
    /// Source branch does not start with the configured prefix
    PrefixMismatch,
    /// A PR is open and `PASS_IF_EXISTS` is set
    PassedExisting { number: u64 },
    /// A PR is open and nothing was asked of it
    AlreadyOpen { number: u64, title: Option<String> },
    Created(PullRequestReport),
    Updated(PullRequestReport),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::SameBranch => f.write_str("target and source branch are identical, skipped"),
            Outcome::PrefixMismatch => f.write_str("branch does not match the prefix, skipped"),
            Outcome::PassedExisting { number } => {
                write!(f, "pull request #{} already open, PASS_IF_EXISTS is set", number)
            }
            Outcome::AlreadyOpen { number, title } => match title {
                Some(title) => write!(f, "pull request #{} '{}' already open", number, title),
                None => write!(f, "pull request #{} already open", number),
            },
            Outcome::Created(report) => write!(f, "created pull request ({})", report),
            Outcome::Updated(report) => write!(f, "updated pull request ({})", report),
        }
    }
}

impl fmt::Display for PullRequestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(number) => write!(f, "#{}, return code {}", number, self.return_code),
            None => write!(f, "no number, return code {}", self.return_code),
        }
    }
}

/// Result of one API call judged against its expected status
struct Step {
    return_code: ReturnCode,
    response: Option<ApiResponse>,
    failure: Option<ActionError>,
}

impl Step {
    fn judge(operation: Operation, expected: u16, result: anyhow::Result<ApiResponse>) -> Self {
        match result {
            Ok(response) if response.is(expected) => Step {
                return_code: ReturnCode::Success,
                response: Some(response),
                failure: None,
            },
            Ok(response) => Step {
                return_code: ReturnCode::from_status(response.status, expected),
                failure: Some(ActionError::api(operation, &response)),
                response: Some(response),
            },
            Err(cause) => Step {
                return_code: ReturnCode::NoResponse,
                response: None,
                failure: Some(ActionError::Transport { operation, cause }),
            },
        }
    }

    /// Hand a failure to the error policy; `Err` means the run stops
    fn settle(&mut self, policy: ErrorPolicy) -> Result<(), ActionError> {
        match self.failure.take() {
            Some(error) => tolerate(policy, error),
            None => Ok(()),
        }
    }
}

fn tolerate(policy: ErrorPolicy, error: ActionError) -> Result<(), ActionError> {
    let message = error.to_string();
    policy.handle(error)?;
    commands::warning(message);
    Ok(())
}

/// First listed pull request whose head branch is exactly `source`
pub fn find_pull_request<'a>(listing: &'a [PullRequest], source: &str) -> Option<&'a PullRequest> {
    let found = listing.iter().find(|pr| pr.head_branch() == source);
    if let Some(pr) = found {
        info!(
            "Pull request #{} '{}' from {} is already open!",
            pr.number,
            pr.title.as_deref().unwrap_or_default(),
            source
        );
    }
    found
}

fn print_response(title: &str, response: Option<&ApiResponse>) {
    if let Some(response) = response {
        let body = serde_json::to_string_pretty(&response.body)
            .unwrap_or_else(|_| response.body.to_string());
        commands::group(title, body);
    }
}

/// Run the action for one push
///
/// Makes at most one listing, one create or update, one assignee and one
/// reviewer call, in that order. Outputs go to `outputs` as soon as each
/// write call returns.
pub async fn run<C, O>(
    config: &ActionConfig,
    client: &C,
    outputs: &mut O,
) -> Result<Outcome, ActionError>
where
    C: GitHubClient + ?Sized,
    O: OutputSink + ?Sized,
{
    let source = config.source_branch.as_str();
    let target = config.target_branch.as_str();

    if source == target {
        info!(
            "Target and current branch are identical ({}), skipping.",
            source
        );
        return Ok(Outcome::SameBranch);
    }

    if !config.matches_prefix() {
        info!(
            "Branch {} does not start with prefix {}, skipping.",
            source,
            config.branch_prefix.as_deref().unwrap_or_default()
        );
        return Ok(Outcome::PrefixMismatch);
    }

    commands::group("pull request body", &config.body);
    commands::group("pull request title", &config.title);

    let listing = list_pull_requests(config, client).await?;

    let outcome = match (find_pull_request(&listing, source), config.existing) {
        (Some(existing), ExistingPolicy::Pass) => {
            info!("PASS_IF_EXISTS is set, exiting with success status.");
            return Ok(Outcome::PassedExisting {
                number: existing.number,
            });
        }
        (Some(existing), ExistingPolicy::Skip) => {
            info!(
                "Pull request #{} is already open and PULL_REQUEST_UPDATE is not set, nothing to do.",
                existing.number
            );
            return Ok(Outcome::AlreadyOpen {
                number: existing.number,
                title: existing.title.clone(),
            });
        }
        (Some(existing), ExistingPolicy::Update) => {
            info!("PULL_REQUEST_UPDATE is set, updating existing pull request.");
            let update = PullRequestUpdate {
                title: config.title.clone(),
                body: config.body.clone(),
                base: target.to_string(),
                state: config.state,
                maintainer_can_modify: config.maintainer_can_modify,
            };
            info!("Data for updating pull request: {:?}", update);
            let result = client.update_pull_request(existing.number, &update).await;
            let mut step = Step::judge(Operation::UpdatePullRequest, STATUS_OK, result);
            let (report, pr) = report_pull_request(&step, outputs)?;
            step.settle(config.error_policy)?;
            attach_recipients(config, client, outputs, report.return_code, pr).await?;
            Outcome::Updated(report)
        }
        (None, _) => {
            info!(
                "No pull request from {} to {} is open, continuing!",
                source, target
            );
            let request = NewPullRequest {
                title: config.title.clone(),
                body: config.body.clone(),
                base: target.to_string(),
                head: source.to_string(),
                draft: config.draft,
                maintainer_can_modify: config.maintainer_can_modify,
            };
            info!("Data for opening pull request: {:?}", request);
            let result = client.create_pull_request(&request).await;
            let mut step = Step::judge(Operation::CreatePullRequest, STATUS_CREATED, result);
            let (report, pr) = report_pull_request(&step, outputs)?;
            step.settle(config.error_policy)?;
            attach_recipients(config, client, outputs, report.return_code, pr).await?;
            Outcome::Created(report)
        }
    };

    Ok(outcome)
}

/// Open pull requests from the source into the target branch
///
/// A tolerated failure yields an empty listing.
async fn list_pull_requests<C>(
    config: &ActionConfig,
    client: &C,
) -> Result<Vec<PullRequest>, ActionError>
where
    C: GitHubClient + ?Sized,
{
    info!(
        "Checking for open pull requests from {} to {}",
        config.source_branch, config.target_branch
    );
    let result = client
        .list_pull_requests(&config.target_branch, &config.source_branch)
        .await;

    let mut step = Step::judge(Operation::ListPullRequests, STATUS_OK, result);
    step.settle(config.error_policy)?;

    let Some(response) = step.response.filter(|r| r.is(STATUS_OK)) else {
        return Ok(Vec::new());
    };

    match response.pull_requests() {
        Ok(listing) => Ok(listing),
        Err(cause) => {
            tolerate(
                config.error_policy,
                ActionError::InvalidResponse {
                    operation: Operation::ListPullRequests,
                    cause,
                },
            )?;
            Ok(Vec::new())
        }
    }
}

/// Print the create/update response and write the three PR outputs
fn report_pull_request<O>(
    step: &Step,
    outputs: &mut O,
) -> Result<(PullRequestReport, Option<PullRequest>), ActionError>
where
    O: OutputSink + ?Sized,
{
    print_response("github response", step.response.as_ref());

    let pr = step.response.as_ref().and_then(ApiResponse::pull_request);
    let report = PullRequestReport {
        number: pr.as_ref().map(|pr| pr.number),
        url: pr.as_ref().and_then(|pr| pr.html_url.clone()),
        return_code: step.return_code,
    };

    let number = report.number.map(|n| n.to_string()).unwrap_or_default();
    info!("Number opened for PR is {}", number);
    outputs.set_output("PULL_REQUEST_NUMBER", &number)?;
    outputs.set_output("PULL_REQUEST_RETURN_CODE", &report.return_code.to_string())?;
    outputs.set_output("PULL_REQUEST_URL", report.url.as_deref().unwrap_or_default())?;

    Ok((report, pr))
}

/// Add assignees, then request reviewers, on a freshly written PR
async fn attach_recipients<C, O>(
    config: &ActionConfig,
    client: &C,
    outputs: &mut O,
    return_code: ReturnCode,
    pr: Option<PullRequest>,
) -> Result<(), ActionError>
where
    C: GitHubClient + ?Sized,
    O: OutputSink + ?Sized,
{
    let Some(pr) = pr.filter(|_| return_code.is_success()) else {
        return Ok(());
    };

    if !config.assignees.is_empty() {
        info!(
            "Attempting to assign {:?} to pull request with number {}",
            config.assignees, pr.number
        );
        let result = client.add_assignees(pr.number, &config.assignees).await;
        let mut step = Step::judge(Operation::AddAssignees, STATUS_CREATED, result);
        print_response("github assignees response", step.response.as_ref());
        outputs.set_output("ASSIGNEES_RETURN_CODE", &step.return_code.to_string())?;
        step.settle(config.error_policy)?;
    }

    if !config.reviewers.is_empty() || !config.team_reviewers.is_empty() {
        info!(
            "Requesting reviews from {:?} and teams {:?} on pull request {}",
            config.reviewers, config.team_reviewers, pr.number
        );
        let result = client
            .request_reviewers(pr.number, &config.reviewers, &config.team_reviewers)
            .await;
        let mut step = Step::judge(Operation::RequestReviewers, STATUS_CREATED, result);
        print_response("github reviewers response", step.response.as_ref());
        outputs.set_output("REVIEWERS_RETURN_CODE", &step.return_code.to_string())?;
        step.settle(config.error_policy)?;
    }

    Ok(())
}
