//! Command-line interface definitions using clap.

use crate::config::CONFIG_ENV_VAR;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Effort estimation and milestone planning over GitHub issues
///
/// Issues are loaded with the GitHub CLI (`gh`), which must be installed and
/// signed in.
///
/// Exit Codes:
///   0  - Command succeeded (an unimplemented subcommand is reported, not failed)
///   1  - Tracker client, config or data error
///   2  - Invalid arguments or query filter
#[derive(Parser, Debug)]
#[command(name = "issue-mgmnt")]
#[command(about = "Effort estimation and milestone planning over GitHub issues", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: ./issue-mgmnt.toml)
    #[arg(long, global = true, env = CONFIG_ENV_VAR, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List issues matching a filter with their estimated work
    ///
    /// Filter syntax:
    ///   state:open|closed     label:NAME or label:PREFIX*
    ///   assignee:LOGIN        milestone:NUMBER
    ///   difficulty:LABEL      unassigned    nomilestone
    ///
    /// Combine with AND, OR, NOT and parentheses; adjacent conditions are
    /// ANDed. Quote values with spaces: label:"D-Super Easy"
    ///
    /// Examples:
    ///   issue-mgmnt query "state:open unassigned"
    ///   issue-mgmnt query "milestone:1 AND NOT label:D-*"
    Query {
        /// Filter expression (default: every issue)
        filter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report the next milestone and each contributor's estimated load
    ///
    /// Considers open issues only. Nothing is assigned on the tracker.
    Assign {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Any other subcommand is reported as not implemented
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &str {
        match self {
            Commands::Query { .. } => "query",
            Commands::Assign { .. } => "assign",
            Commands::External(args) => args.first().map(String::as_str).unwrap_or(""),
        }
    }

    pub fn is_json(&self) -> bool {
        match self {
            Commands::Query { json, .. } | Commands::Assign { json } => *json,
            Commands::External(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_query_with_filter() {
        let cli = Cli::try_parse_from(["issue-mgmnt", "query", "state:open unassigned", "--json"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Query {
                filter: Some("state:open unassigned".to_string()),
                json: true,
            })
        );
    }

    #[test]
    fn test_parse_assign_with_global_flags() {
        let cli = Cli::try_parse_from(["issue-mgmnt", "assign", "-q", "--config", "alt.toml"])
            .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert_eq!(cli.command, Some(Commands::Assign { json: false }));
    }

    #[test]
    fn test_unknown_subcommand_is_captured() {
        let cli = Cli::try_parse_from(["issue-mgmnt", "balance", "--now"]).unwrap();
        let command = cli.command.unwrap();
        assert_eq!(command.name(), "balance");
        assert_eq!(
            command,
            Commands::External(vec!["balance".to_string(), "--now".to_string()])
        );
        assert!(!command.is_json());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["issue-mgmnt"]).unwrap();
        assert!(cli.command.is_none());
    }
}
