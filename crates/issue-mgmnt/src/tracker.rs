//! Loading issues from the tracker.
//!
//! Issues come from the GitHub CLI:
//!
//! ```text
//! gh issue -R <repo> list --limit <limit> --json id,title,labels,assignees,milestone,state
//! ```
//!
//! The client must be installed and signed in; it is located on `PATH` (or
//! at an explicit path) before running so a missing executable is reported
//! as such rather than as a generic spawn failure.
//!
//! # Example
//!
//! ```no_run
//! use issue_mgmnt::tracker::{GhCli, IssueSource};
//!
//! let source = GhCli::new("gh", "CMPUT301F25rocket/rocket-radar", 1000);
//! let issues = source.list_issues().unwrap();
//! println!("Loaded {} issues", issues.len());
//! ```

use crate::domain::{parse_issues, Issue, ISSUE_FIELDS};
use crate::errors::{self, ActionableError};
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading issues from the tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The client executable could not be found
    #[error("tracker client '{tool}' is not installed")]
    ToolNotFound { tool: String },

    /// The client was found but could not be started
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The client ran and exited unsuccessfully
    #[error("'{command}' exited with {status}")]
    CommandFailed {
        command: String,
        status: String,
        stdout: String,
        stderr: String,
    },

    /// The client succeeded but its output is not a valid issue list
    #[error("invalid issue list from '{command}': {source}")]
    InvalidOutput {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TrackerError {
    /// User-facing explanation with causes and remedies.
    pub fn to_actionable(&self) -> ActionableError {
        match self {
            TrackerError::ToolNotFound { tool } => errors::tool_not_installed(tool),
            TrackerError::Spawn { command, source } => {
                ActionableError::new(format!("Failed to run '{}'", command))
                    .with_cause(source.to_string())
                    .with_remedy("Check that the tracker client is executable")
            }
            TrackerError::CommandFailed {
                command, status, ..
            } => errors::tool_failed(command, status),
            TrackerError::InvalidOutput { command, source } => {
                errors::tool_output_invalid(command, &source.to_string())
            }
        }
    }
}

/// A source of tracker issues.
///
/// Handlers are written against this trait so they can be exercised with
/// [`InMemorySource`] instead of a live tracker.
pub trait IssueSource {
    /// Load every issue the source knows about, in tracker order.
    fn list_issues(&self) -> Result<Vec<Issue>, TrackerError>;
}

/// Issue source backed by the GitHub CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GhCli {
    tool: String,
    repo: String,
    limit: usize,
}

impl GhCli {
    pub fn new(tool: impl Into<String>, repo: impl Into<String>, limit: usize) -> Self {
        Self {
            tool: tool.into(),
            repo: repo.into(),
            limit,
        }
    }

    /// Arguments passed to the client, excluding the executable itself.
    pub fn args(&self) -> Vec<String> {
        vec![
            "issue".to_string(),
            "-R".to_string(),
            self.repo.clone(),
            "list".to_string(),
            "--limit".to_string(),
            self.limit.to_string(),
            "--json".to_string(),
            ISSUE_FIELDS.to_string(),
        ]
    }

    /// The full invocation, for messages.
    pub fn command_line(&self) -> String {
        format!("{} {}", self.tool, self.args().join(" "))
    }
}

impl IssueSource for GhCli {
    fn list_issues(&self) -> Result<Vec<Issue>, TrackerError> {
        let executable = which::which(&self.tool).map_err(|_| TrackerError::ToolNotFound {
            tool: self.tool.clone(),
        })?;
        let command = self.command_line();
        debug!(executable = %executable.display(), %command, "invoking tracker client");

        let output = Command::new(&executable)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => TrackerError::ToolNotFound {
                    tool: self.tool.clone(),
                },
                _ => TrackerError::Spawn {
                    command: command.clone(),
                    source,
                },
            })?;

        if !output.status.success() {
            return Err(TrackerError::CommandFailed {
                command,
                status: output.status.to_string(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let issues = parse_issues(&stdout)
            .map_err(|source| TrackerError::InvalidOutput { command, source })?;

        info!(count = issues.len(), repo = %self.repo, "loaded issues");
        Ok(issues)
    }
}

/// Fixed issue list, for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    issues: Vec<Issue>,
}

impl InMemorySource {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self { issues }
    }
}

impl IssueSource for InMemorySource {
    fn list_issues(&self) -> Result<Vec<Issue>, TrackerError> {
        Ok(self.issues.clone())
    }
}
