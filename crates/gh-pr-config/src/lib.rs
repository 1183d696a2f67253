//! Configuration for the pull request action
//!
//! This crate provides:
//! - `ActionConfig`, resolved once from the environment
//! - Event payload reading and source branch derivation
//! - Recipient list parsing (assignees, reviewers, team reviewers)
//! - The existing-PR and error-tolerance policies

pub mod action_config;
pub mod error;
pub mod event;
pub mod policy;
pub mod recipients;

pub use action_config::{ActionConfig, ApiSettings};
pub use error::ConfigError;
pub use event::{branch_from_ref, EventPayload};
pub use policy::{ErrorPolicy, ExistingPolicy};
pub use recipients::parse_recipients;
