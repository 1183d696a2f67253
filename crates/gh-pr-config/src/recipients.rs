//! Recipient list parsing
//!
//! Assignees, reviewers and team reviewers are configured as a single
//! whitespace separated string. Workflow files often quote each entry, so
//! quotes are dropped before splitting.

/// Parse a whitespace separated, optionally quoted list of identifiers
///
/// Order and duplicates are kept as given. Empty or whitespace-only input
/// yields an empty list.
///
/// ```
/// use gh_pr_config::parse_recipients;
///
/// assert_eq!(parse_recipients(r#"'alice' "bob""#), vec!["alice", "bob"]);
/// assert!(parse_recipients("  ").is_empty());
/// ```
pub fn parse_recipients(value: &str) -> Vec<String> {
    value
        .replace(['"', '\''], "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
