//! Effort estimation and milestone planning over GitHub issues.
//!
//! Issues are loaded through the GitHub CLI, difficulty labels (`D-Easy`,
//! `D-Hard`, ...) are turned into estimated hours, and the next milestone's
//! work is broken down per contributor.

pub mod cli;
pub mod commands;
pub mod config;
pub mod difficulty;
pub mod domain;
pub mod errors;
pub mod fuzzy;
pub mod milestone;
pub mod output;
pub mod query;
pub mod tracker;

// Re-export commonly used types
pub use commands::CommandExecutor;
pub use config::Config;
pub use difficulty::{compute_work, DifficultyTable};
pub use domain::{Issue, IssueState};
pub use fuzzy::levenshtein_distance;
pub use milestone::{select_target_milestone, Checkpoint, TargetMilestone};
pub use output::{ExitCode, JsonError, JsonOutput};
pub use tracker::{GhCli, InMemorySource, IssueSource, TrackerError};
