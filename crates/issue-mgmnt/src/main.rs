//! issue-mgmnt
//!
//! Effort estimation and milestone planning over the issues of a GitHub
//! repository, read through the GitHub CLI.

use anyhow::Result;
use clap::Parser;
use issue_mgmnt::cli::{Cli, Commands};
use issue_mgmnt::config::{Config, CONFIG_FILE_NAME};
use issue_mgmnt::output::{
    AssignResponse, ErrorCode, ExitCode, JsonError, JsonOutput, OutputContext, QueryResponse,
};
use issue_mgmnt::query::QueryError;
use issue_mgmnt::tracker::TrackerError;
use issue_mgmnt::CommandExecutor;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Usage error raised after the issues are loaded, before any handler runs
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct UsageError(String);

fn error_code(error: &anyhow::Error) -> &'static str {
    if error.downcast_ref::<TrackerError>().is_some() {
        ErrorCode::TRACKER_ERROR
    } else if error.downcast_ref::<QueryError>().is_some() {
        ErrorCode::INVALID_QUERY
    } else if error.downcast_ref::<UsageError>().is_some() {
        ErrorCode::INVALID_ARGUMENT
    } else if error.downcast_ref::<toml::de::Error>().is_some() {
        ErrorCode::CONFIG_ERROR
    } else if error.downcast_ref::<std::io::Error>().is_some() {
        ErrorCode::IO_ERROR
    } else {
        ErrorCode::GENERIC_ERROR
    }
}

fn error_to_exit_code(error: &anyhow::Error) -> ExitCode {
    ErrorCode::to_exit_code(error_code(error))
}

/// Print a failed run the way the user can act on it.
fn report_error(error: &anyhow::Error) {
    match error.downcast_ref::<TrackerError>() {
        Some(tracker_error) => {
            // Usually a signed-out client; its own output explains why.
            if let TrackerError::CommandFailed { stdout, stderr, .. } = tracker_error {
                if !stdout.is_empty() {
                    print!("{}", stdout);
                }
                if !stderr.is_empty() {
                    eprint!("{}", stderr);
                }
            }
            eprint!("{}", tracker_error.to_actionable());
        }
        None => eprintln!("Error: {:#}", error),
    }
}

/// The `--json` rendition of a failed run.
fn json_error(error: &anyhow::Error, command: &str) -> JsonError {
    let code = error_code(error);
    let Some(tracker_error) = error.downcast_ref::<TrackerError>() else {
        return JsonError::new(code, format!("{:#}", error), command);
    };

    let actionable = tracker_error.to_actionable();
    let mut json_error = JsonError::new(code, actionable.message(), command);
    if let TrackerError::CommandFailed {
        command: tool_command,
        status,
        stdout,
        stderr,
    } = tracker_error
    {
        json_error = json_error.with_details(json!({
            "command": tool_command,
            "status": status,
            "stdout": stdout,
            "stderr": stderr,
        }));
    }
    actionable
        .remedies()
        .iter()
        .fold(json_error, |json_error, remedy| json_error.with_suggestion(remedy))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json_command = cli
        .command
        .as_ref()
        .filter(|command| command.is_json())
        .map(|command| command.name().to_string());

    let exit_code = match run(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => match &json_command {
            Some(command) => {
                let json_error = json_error(&e, command);
                match json_error.to_json_string() {
                    Ok(json) => println!("{}", json),
                    Err(_) => report_error(&e),
                }
                json_error.exit_code()
            }
            None => {
                report_error(&e);
                error_to_exit_code(&e)
            }
        },
    };

    if exit_code != ExitCode::Success {
        std::process::exit(exit_code.code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = Config::load(&config_path)?;

    // Nothing else happens until the tracker has answered.
    let executor = CommandExecutor::load(&config.tracker(), &config)?;

    let command = cli
        .command
        .ok_or_else(|| UsageError("No command provided. Use --help for usage.".to_string()))?;
    let output = OutputContext::new(cli.quiet, command.is_json());

    match &command {
        Commands::Query { filter, .. } => {
            let response = executor.query_issues(filter.as_deref())?;
            if output.is_json() {
                output.print_json(&JsonOutput::success(&response, "query"))?;
            } else {
                print_query(&output, &response)?;
            }
        }
        Commands::Assign { .. } => {
            let response = executor.assign_report()?;
            if output.is_json() {
                output.print_json(&JsonOutput::success(&response, "assign"))?;
            } else {
                print_assign(&output, &response)?;
            }
        }
        // Reported, not failed.
        Commands::External(_) => {
            output.print_error(format!(
                "The subcommand {} is not implemented",
                command.name()
            ))?;
        }
    }

    Ok(())
}

fn print_query(output: &OutputContext, response: &QueryResponse) -> Result<()> {
    if response.issues.is_empty() {
        output.print_info("No matching issues")?;
    }
    for issue in &response.issues {
        output.print_data(format!(
            "{:>2}  {:<14} {:>3}h  {}",
            issue.assignees.len(),
            issue.difficulty.as_deref().unwrap_or("-"),
            issue.hours,
            issue.title
        ))?;
    }
    output.print_data(format!(
        "Total work: {:.1}h across {} issue(s)",
        response.total_work, response.count
    ))?;
    Ok(())
}

fn print_assign(output: &OutputContext, response: &AssignResponse) -> Result<()> {
    match &response.milestone {
        Some(milestone) => {
            let due = milestone
                .due_on
                .map(|due| due.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "no due date".to_string());
            output.print_data(format!("Target milestone: #{} ({})", milestone.number, due))?;
        }
        None => {
            output.print_data("Target milestone: none")?;
            output.print_info("No open issue has a milestone or the checkpoint label")?;
            return Ok(());
        }
    }

    output.print_info(format!("Open issues: {}", response.open_issues))?;
    output.print_data("Estimated load:")?;
    for load in &response.contributors {
        output.print_data(format!(
            "  {:<18} {:>6.1}h  ({} issue(s))",
            load.login,
            load.hours,
            load.issues.len()
        ))?;
    }

    output.print_data(format!("Unassigned: {}", response.unassigned.len()))?;
    for issue in &response.unassigned {
        output.print_data(format!(
            "  {:<14} {:>3}h  {}",
            issue.difficulty.as_deref().unwrap_or("-"),
            issue.hours,
            issue.title
        ))?;
    }
    Ok(())
}
