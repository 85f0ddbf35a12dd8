//! Actionable error formatting for improved user experience.
//!
//! Errors surfaced to the user carry a description, possible causes and
//! remediation steps, so that a failed tracker invocation explains itself.

use std::fmt;

/// An error with diagnostic context and remediation steps.
///
/// # Example
///
/// ```
/// use issue_mgmnt::errors::ActionableError;
///
/// let error = ActionableError::new("gh exited with status 4")
///     .with_cause("You may not be signed in")
///     .with_remedy("Sign in: gh auth login");
///
/// eprintln!("{}", error);
/// ```
#[derive(Debug, Clone)]
pub struct ActionableError {
    /// The main error message
    error: String,
    /// Possible causes (diagnostic hints)
    causes: Vec<String>,
    /// Remediation steps (how to fix)
    remediation: Vec<String>,
}

impl ActionableError {
    /// Create a new actionable error with the given message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            causes: Vec::new(),
            remediation: Vec::new(),
        }
    }

    /// Add a possible cause (diagnostic hint).
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Add a remediation step (actionable fix).
    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remediation.push(remedy.into());
        self
    }

    /// The main error message, without causes or remediation.
    pub fn message(&self) -> &str {
        &self.error
    }

    /// Remediation steps in the order they were added.
    pub fn remedies(&self) -> &[String] {
        &self.remediation
    }

    /// Convert to a formatted error message suitable for display.
    pub fn to_error_message(&self) -> String {
        let mut msg = format!("Error: {}\n", self.error);

        if !self.causes.is_empty() {
            msg.push_str("\nPossible causes:\n");
            for cause in &self.causes {
                msg.push_str(&format!("  • {}\n", cause));
            }
        }

        if !self.remediation.is_empty() {
            msg.push_str("\nTo fix:\n");
            for remedy in &self.remediation {
                msg.push_str(&format!("  • {}\n", remedy));
            }
        }

        msg
    }
}

impl fmt::Display for ActionableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_error_message())
    }
}

impl std::error::Error for ActionableError {}

/// The tracker client could not be found.
pub fn tool_not_installed(tool: &str) -> ActionableError {
    ActionableError::new(format!(
        "This tool requires the GitHub CLI executable ('{}') to be installed",
        tool
    ))
    .with_cause(format!("'{}' is not installed or not in PATH", tool))
    .with_cause("[tracker] tool in the config file may point to the wrong path")
    .with_remedy("Install the GitHub CLI: https://cli.github.com")
    .with_remedy(format!("Verify the installation: {} --version", tool))
}

/// The tracker client ran but reported failure.
pub fn tool_failed(command: &str, status: &str) -> ActionableError {
    ActionableError::new(format!("Tracker command failed ({}): {}", status, command))
        .with_cause("You may not be signed in to the tracker")
        .with_cause("The repository name may be wrong or inaccessible")
        .with_remedy("Sign in: gh auth login")
        .with_remedy("Check access: gh repo view <owner>/<repo>")
}

/// The tracker client's output could not be understood.
pub fn tool_output_invalid(command: &str, detail: &str) -> ActionableError {
    ActionableError::new(format!("Could not parse issues from: {}", command))
        .with_cause(format!("JSON error: {}", detail))
        .with_cause("The tracker client may be too old to support --json output")
        .with_remedy("Run the command manually and inspect its output")
        .with_remedy("Upgrade the GitHub CLI: gh --version")
}
