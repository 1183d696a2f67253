//! GitHub Actions output helpers
//!
//! Emits workflow commands (`::group::`, `::error::`, `::warning::`) on
//! stdout and records step outputs in the files the runner hands out through
//! `GITHUB_OUTPUT` and `GITHUB_ENV`.
//!
//! # Example
//!
//! ```no_run
//! use gh_actions_output::{commands, EnvFileSink, OutputSink};
//!
//! commands::group("pull request title", "Update from feature/x");
//!
//! let mut outputs = EnvFileSink::from_env();
//! outputs.set_output("PULL_REQUEST_NUMBER", "42")?;
//! # Ok::<(), gh_actions_output::OutputError>(())
//! ```

pub mod commands;
mod outputs;
mod types;

pub use outputs::{format_entry, EnvFileSink, MemorySink, OutputError, OutputSink};
pub use types::WorkflowCommand;
