//! Step outputs
//!
//! Outputs are appended as `name=value` lines to the files named by
//! `GITHUB_OUTPUT` (step outputs) and `GITHUB_ENV` (environment for later
//! steps). Values spanning several lines use the heredoc form.

use log::{info, warn};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variables naming the files outputs are written to
const OUTPUT_FILE_VARS: [&str; 2] = ["GITHUB_ENV", "GITHUB_OUTPUT"];

const HEREDOC_DELIMITER: &str = "ghadelimiter";

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {name} to {}: {source}", path.display())]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for step outputs
pub trait OutputSink {
    /// Record `name=value` for downstream steps
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError>;
}

/// Render a single output entry, including the trailing newline
pub fn format_entry(name: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{}={}\n", name, value);
    }

    let mut delimiter = HEREDOC_DELIMITER.to_string();
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    format!("{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)
}

/// Appends outputs to the runner's env and output files
#[derive(Debug, Clone, Default)]
pub struct EnvFileSink {
    files: Vec<(String, PathBuf)>,
}

impl EnvFileSink {
    /// Use the files named by `GITHUB_ENV` and `GITHUB_OUTPUT`
    ///
    /// Unset variables are skipped; outputs are then only logged.
    pub fn from_env() -> Self {
        let files = OUTPUT_FILE_VARS
            .iter()
            .filter_map(|var| match std::env::var_os(var) {
                Some(path) if !path.is_empty() => Some((var.to_string(), PathBuf::from(path))),
                _ => {
                    warn!("{} is not set, outputs will not be written there", var);
                    None
                }
            })
            .collect();
        Self { files }
    }

    /// Write to an explicit list of `(label, path)` files
    pub fn new(files: Vec<(String, PathBuf)>) -> Self {
        Self { files }
    }
}

impl OutputSink for EnvFileSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        let entry = format_entry(name, value);
        for (label, path) in &self.files {
            info!("Writing {}={} to {}", name, value, label);
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut file| file.write_all(entry.as_bytes()))
                .map_err(|source| OutputError::Io {
                    name: name.to_string(),
                    path: path.clone(),
                    source,
                })?;
        }
        if self.files.is_empty() {
            info!("Output {}={}", name, value);
        }
        Ok(())
    }
}

/// Keeps outputs in memory, in the order they were set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub entries: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of the most recent output with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl OutputSink for MemorySink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<(), OutputError> {
        self.entries.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
