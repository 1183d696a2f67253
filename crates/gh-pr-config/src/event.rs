//! GitHub event payload handling
//!
//! Only the `ref` of the triggering push is read from the payload.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// The part of the event payload the action cares about
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    /// Full git ref that was pushed (e.g., "refs/heads/feature/x")
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
}

impl EventPayload {
    /// Read and parse the payload file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::EventFileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::EventFileInvalid {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Branch name derived from the pushed ref, if there is one
    pub fn branch(&self) -> Option<String> {
        self.git_ref
            .as_deref()
            .map(branch_from_ref)
            .filter(|branch| !branch.is_empty())
    }
}

/// Make sure the events file exists, which also tells us we run inside an action
pub fn check_event_path(path: PathBuf) -> Result<PathBuf, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::EventFileNotFound(path));
    }
    log::info!("Found GITHUB_EVENT_PATH at {}", path.display());
    Ok(path)
}

/// Strip the leading `refs/heads/` and any surrounding slashes from a ref
pub fn branch_from_ref(git_ref: &str) -> String {
    git_ref
        .strip_prefix(BRANCH_REF_PREFIX)
        .unwrap_or(git_ref)
        .trim_matches('/')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn payload_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_branch_from_ref() {
        assert_eq!(branch_from_ref("refs/heads/feature/x"), "feature/x");
        assert_eq!(branch_from_ref("refs/heads/main/"), "main");
        assert_eq!(branch_from_ref("update"), "update");
        assert_eq!(branch_from_ref("refs/heads/"), "");
    }

    #[test]
    fn test_load_push_event() {
        let file = payload_file(r#"{"ref": "refs/heads/feature/x", "before": "abc"}"#);
        let payload = EventPayload::load(file.path()).unwrap();
        assert_eq!(payload.branch().as_deref(), Some("feature/x"));
    }

    #[test]
    fn test_payload_without_ref() {
        let file = payload_file(r#"{"action": "opened"}"#);
        let payload = EventPayload::load(file.path()).unwrap();
        assert!(payload.branch().is_none());
    }

    #[test]
    fn test_invalid_payload() {
        let file = payload_file("not json");
        let err = EventPayload::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::EventFileInvalid { .. }));
    }

    #[test]
    fn test_missing_event_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = check_event_path(dir.path().join("event.json")).unwrap_err();
        assert!(matches!(err, ConfigError::EventFileNotFound(_)));
    }
}
