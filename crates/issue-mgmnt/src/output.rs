//! Structured output formatting for CLI commands.
//!
//! Human-readable lines go through [`OutputContext`]; `--json` output is
//! wrapped in a [`JsonOutput`] envelope with metadata, and failures in a
//! [`JsonError`] envelope.

use chrono::Utc;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt::Display;
use std::io::{self, Write};

use crate::domain::Issue;
use crate::milestone::TargetMilestone;

/// Version of the JSON output format
const OUTPUT_VERSION: &str = "0.1.0";

// ============================================================================
// Output Context for Quiet Mode
// ============================================================================

/// Context for controlling output verbosity
pub struct OutputContext {
    quiet: bool,
    json: bool,
}

impl OutputContext {
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Print essential output (always shown unless --json)
    pub fn print_data(&self, msg: impl Display) -> io::Result<()> {
        if !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print informational message (suppressed by --quiet or --json)
    pub fn print_info(&self, msg: impl Display) -> io::Result<()> {
        if !self.quiet && !self.json {
            writeln_safe(&format!("{}", msg))
        } else {
            Ok(())
        }
    }

    /// Print error (always shown to stderr)
    pub fn print_error(&self, msg: impl Display) -> io::Result<()> {
        writeln_safe_stderr(&format!("Error: {}", msg))
    }

    /// Print a JSON document (only in --json mode)
    pub fn print_json<T: Serialize>(&self, output: &JsonOutput<T>) -> io::Result<()> {
        if !self.json {
            return Ok(());
        }
        let json = output.to_json_string().map_err(io::Error::other)?;
        writeln_safe(&json)
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Safe println that handles broken pipes gracefully
fn writeln_safe(msg: &str) -> io::Result<()> {
    match writeln!(io::stdout(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            // Expected when piping to head
            std::process::exit(0);
        }
        Err(e) => Err(e),
    }
}

fn writeln_safe_stderr(msg: &str) -> io::Result<()> {
    match writeln!(io::stderr(), "{}", msg) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => std::process::exit(0),
        Err(e) => Err(e),
    }
}

// ============================================================================
// JSON Output Types
// ============================================================================

/// Wrapper for successful command output with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub metadata: Metadata,
}

impl<T: Serialize> JsonOutput<T> {
    /// Create a new successful output with the given data
    pub fn success(data: T, command: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            metadata: Metadata::new(command),
        }
    }

    /// Serialize to JSON string with pretty formatting
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Wrapper for error output in `--json` mode
#[derive(Debug, Serialize)]
pub struct JsonError {
    pub success: bool,
    pub error: ErrorDetail,
    pub metadata: Metadata,
}

/// Error code, message and what to try next
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// One of the [`ErrorCode`] constants
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl JsonError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
                suggestions: Vec::new(),
            },
            metadata: Metadata::new(command),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.error.details = Some(details);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.error.suggestions.push(suggestion.into());
        self
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Exit code matching the error code
    pub fn exit_code(&self) -> ExitCode {
        ErrorCode::to_exit_code(&self.error.code)
    }
}

/// Error codes carried by [`JsonError`]
pub struct ErrorCode;

impl ErrorCode {
    pub const TRACKER_ERROR: &'static str = "TRACKER_ERROR";
    pub const CONFIG_ERROR: &'static str = "CONFIG_ERROR";
    pub const INVALID_QUERY: &'static str = "INVALID_QUERY";
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const IO_ERROR: &'static str = "IO_ERROR";
    pub const GENERIC_ERROR: &'static str = "ERROR";

    pub fn to_exit_code(code: &str) -> ExitCode {
        match code {
            Self::INVALID_QUERY | Self::INVALID_ARGUMENT => ExitCode::InvalidArgument,
            _ => ExitCode::GenericError,
        }
    }
}

/// Standard exit codes for the CLI
///
/// # Examples
///
/// ```
/// use issue_mgmnt::output::ExitCode;
///
/// assert_eq!(ExitCode::InvalidArgument.code(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded, or an unknown subcommand was reported (0)
    Success = 0,

    /// Tracker, config or data error (1)
    GenericError = 1,

    /// Invalid arguments, usage error or invalid query filter (2)
    InvalidArgument = 2,
}

impl ExitCode {
    /// Convert exit code to i32 for `std::process::exit`
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Command succeeded",
            ExitCode::GenericError => "Tracker client, config or data error",
            ExitCode::InvalidArgument => "Invalid arguments or query filter",
        }
    }
}

/// Metadata included in all responses
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// Timestamp when the response was generated
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: chrono::DateTime<Utc>,
    /// Version of the output format
    pub version: String,
    /// Command that generated this response
    pub command: String,
}

impl Metadata {
    fn new(command: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            version: OUTPUT_VERSION.to_string(),
            command: command.into(),
        }
    }
}

fn serialize_timestamp<S>(dt: &chrono::DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// Response Types
// ============================================================================

/// One issue as listed by `query`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueSummary {
    pub id: String,
    pub title: String,
    pub state: String,
    pub assignees: Vec<String>,
    /// Difficulty label as found on the issue
    pub difficulty: Option<String>,
    /// Estimated hours for the whole issue (not split between assignees)
    pub hours: u32,
    pub milestone: Option<u64>,
}

impl IssueSummary {
    pub fn new(issue: &Issue, hours: u32, milestone: Option<u64>) -> Self {
        Self {
            id: issue.id.clone(),
            title: issue.title.clone(),
            state: issue.state.to_string(),
            assignees: issue.assignee_logins().map(str::to_string).collect(),
            difficulty: issue.difficulty().map(str::to_string),
            hours,
            milestone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub filter: Option<String>,
    pub issues: Vec<IssueSummary>,
    pub count: usize,
    /// `compute_work` over every match
    pub total_work: f64,
}

/// Estimated load of one contributor within the target milestone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContributorLoad {
    pub login: String,
    pub issues: Vec<String>,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignResponse {
    /// `None` when no open issue has a milestone or the checkpoint label
    pub milestone: Option<TargetMilestone>,
    pub open_issues: usize,
    pub contributors: Vec<ContributorLoad>,
    /// Open issues of the target milestone nobody is assigned to
    pub unassigned: Vec<IssueSummary>,
}
