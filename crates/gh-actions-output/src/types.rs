//! Workflow command definitions

use std::fmt;

/// A GitHub Actions workflow command
///
/// The `Display` form is the exact line the runner expects on stdout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowCommand {
    /// Start of a collapsible group: `::group::title`
    GroupStart { title: String },
    /// End of the current group: `::endgroup::`
    GroupEnd,
    /// Error annotation: `::error::message`
    Error { message: String },
    /// Warning annotation: `::warning::message`
    Warning { message: String },
}

impl fmt::Display for WorkflowCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowCommand::GroupStart { title } => write!(f, "::group::{}", escape_data(title)),
            WorkflowCommand::GroupEnd => f.write_str("::endgroup::"),
            WorkflowCommand::Error { message } => write!(f, "::error::{}", escape_data(message)),
            WorkflowCommand::Warning { message } => {
                write!(f, "::warning::{}", escape_data(message))
            }
        }
    }
}

/// Escape command data so multi-line messages stay on one line
pub fn escape_data(data: &str) -> String {
    data.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
