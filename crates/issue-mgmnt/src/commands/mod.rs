//! Command execution logic for the CLI subcommands.
//!
//! The `CommandExecutor` holds the issue list loaded at startup together
//! with the planning settings, and computes the result of each subcommand.
//! Printing is left to the binary.
//!
//! - `query`: filtered issue listing with estimated work
//! - `assign`: target milestone and per-contributor load report

mod assign;
mod query;

#[cfg(test)]
pub mod test_helpers;

use crate::config::Config;
use crate::difficulty::DifficultyTable;
use crate::domain::Issue;
use crate::milestone::Checkpoint;
use crate::query::QueryContext;
use crate::tracker::IssueSource;
use anyhow::Result;
use tracing::debug;

/// Runs subcommands over one snapshot of the tracker's issues.
pub struct CommandExecutor {
    issues: Vec<Issue>,
    difficulties: DifficultyTable,
    checkpoint: Checkpoint,
    contributors: Vec<String>,
}

impl CommandExecutor {
    /// Create an executor over `issues` with the standard difficulty table
    /// and the roster and checkpoint from `config`.
    pub fn new(issues: Vec<Issue>, config: &Config) -> Self {
        Self {
            issues,
            difficulties: DifficultyTable::standard(),
            checkpoint: config.checkpoint(),
            contributors: config.contributors(),
        }
    }

    /// Fetch every issue from `source`, then build the executor.
    ///
    /// This is the only tracker round-trip of a run. Errors stay typed so
    /// `main` can pick the exit code.
    pub fn load<S: IssueSource>(source: &S, config: &Config) -> Result<Self> {
        let issues = source.list_issues()?;
        debug!(count = issues.len(), "issues loaded at startup");
        Ok(Self::new(issues, config))
    }

    fn query_context(&self) -> QueryContext {
        QueryContext::new(self.difficulties.clone(), self.checkpoint.clone())
    }

    /// Work over issues with a difficulty label, split between their assignees.
    fn work_of(&self, issues: &[&Issue]) -> f64 {
        let diffs: Vec<(&str, usize)> = issues
            .iter()
            .filter_map(|issue| {
                issue
                    .difficulty()
                    .map(|label| (label, issue.assignees.len()))
            })
            .collect();
        self.difficulties.compute_work(&diffs)
    }

    /// Whole-issue estimate, 0 without a difficulty label.
    fn hours_of(&self, issue: &Issue) -> u32 {
        issue
            .difficulty()
            .map(|label| self.difficulties.hours(label))
            .unwrap_or(0)
    }
}
