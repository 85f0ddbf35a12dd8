//! Configuration file loading and parsing.
//!
//! Settings live in `issue-mgmnt.toml`. If no config file exists, every
//! section falls back to the defaults for the rocket-radar project.

use crate::milestone::Checkpoint;
use crate::tracker::GhCli;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "issue-mgmnt.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "ISSUE_MGMNT_CONFIG";

pub const DEFAULT_TOOL: &str = "gh";
pub const DEFAULT_REPO: &str = "CMPUT301F25rocket/rocket-radar";
pub const DEFAULT_LIMIT: usize = 1000;

/// Contributors in planning order.
pub const DEFAULT_CONTRIBUTORS: [&str; 5] = [
    "bitokn",
    "bwoodsy",
    "lauriesama",
    "ArtDynasty13",
    "GenericConfluent",
];

/// Root configuration structure loaded from `issue-mgmnt.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tracker client settings (optional).
    pub tracker: Option<TrackerConfig>,
    /// Contributor roster (optional).
    pub roster: Option<RosterConfig>,
    /// Checkpoint label standing in for a milestone (optional).
    pub checkpoint: Option<CheckpointConfig>,
}

/// How to reach the tracker.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    /// Client executable name or path (default: "gh").
    pub tool: Option<String>,
    /// Repository in `owner/name` form.
    pub repo: Option<String>,
    /// Maximum number of issues to list (default: 1000).
    pub limit: Option<usize>,
}

impl TrackerConfig {
    pub fn tool(&self) -> String {
        self.tool.clone().unwrap_or_else(|| DEFAULT_TOOL.to_string())
    }

    pub fn repo(&self) -> String {
        self.repo.clone().unwrap_or_else(|| DEFAULT_REPO.to_string())
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}

/// Who work is planned for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RosterConfig {
    /// Contributor logins in planning order.
    pub contributors: Option<Vec<String>>,
}

impl RosterConfig {
    pub fn contributors(&self) -> Vec<String> {
        self.contributors.clone().unwrap_or_else(|| {
            DEFAULT_CONTRIBUTORS
                .iter()
                .map(|login| login.to_string())
                .collect()
        })
    }
}

/// Checkpoint label overrides.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckpointConfig {
    pub label: Option<String>,
    pub number: Option<u64>,
    /// RFC 3339 deadline, e.g. "2025-10-21T00:00:00Z".
    pub due_on: Option<DateTime<Utc>>,
}

impl CheckpointConfig {
    pub fn checkpoint(&self) -> Checkpoint {
        let defaults = Checkpoint::default();
        Checkpoint {
            label: self.label.clone().unwrap_or(defaults.label),
            number: self.number.unwrap_or(defaults.number),
            due_on: self.due_on.unwrap_or(defaults.due_on),
        }
    }
}

impl Config {
    /// Load configuration from `path` if it exists.
    ///
    /// Returns the default config if the file doesn't exist.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(config)
    }

    /// The tracker client described by this config.
    pub fn tracker(&self) -> GhCli {
        let tracker = self.tracker.clone().unwrap_or_default();
        GhCli::new(tracker.tool(), tracker.repo(), tracker.limit())
    }

    pub fn contributors(&self) -> Vec<String> {
        self.roster.clone().unwrap_or_default().contributors()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint.clone().unwrap_or_default().checkpoint()
    }
}
