//! Printing workflow commands
//!
//! Commands go straight to stdout, where the runner picks them up. They are
//! not routed through the logger so no prefix ends up in front of `::`.

use crate::types::WorkflowCommand;
use std::fmt::Display;

/// Print a single workflow command
pub fn issue(command: &WorkflowCommand) {
    println!("{}", command);
}

/// Print `content` inside a collapsible group
pub fn group(title: &str, content: impl Display) {
    issue(&WorkflowCommand::GroupStart {
        title: title.to_string(),
    });
    println!("{}", content);
    issue(&WorkflowCommand::GroupEnd);
}

/// Annotate the run with an error
pub fn error(message: impl Display) {
    issue(&WorkflowCommand::Error {
        message: message.to_string(),
    });
}

/// Annotate the run with a warning
pub fn warning(message: impl Display) {
    issue(&WorkflowCommand::Warning {
        message: message.to_string(),
    });
}
