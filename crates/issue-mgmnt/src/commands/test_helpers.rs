//! Test helper functions for command tests.

use crate::commands::CommandExecutor;
use crate::config::Config;
use crate::domain::{Assignee, Issue, IssueState, Label, Milestone};
use chrono::{TimeZone, Utc};

/// Open issue with the given labels and assignees and no milestone.
pub fn issue(id: &str, labels: &[&str], assignees: &[&str]) -> Issue {
    Issue {
        id: id.to_string(),
        title: format!("Issue {}", id),
        labels: labels
            .iter()
            .map(|name| Label {
                name: name.to_string(),
            })
            .collect(),
        assignees: assignees
            .iter()
            .map(|login| Assignee {
                login: login.to_string(),
            })
            .collect(),
        milestone: None,
        state: IssueState::Open,
    }
}

/// Attach tracker milestone `number`, due at midnight UTC on 2025-11-`day`.
pub fn with_milestone(mut issue: Issue, number: u64, day: u32) -> Issue {
    issue.milestone = Some(Milestone {
        number,
        title: format!("Milestone {}", number),
        due_on: Utc.with_ymd_and_hms(2025, 11, day, 0, 0, 0).single(),
    });
    issue
}

pub fn closed(mut issue: Issue) -> Issue {
    issue.state = IssueState::Closed;
    issue
}

/// Executor over a fixed issue list with default settings.
pub fn setup(issues: Vec<Issue>) -> CommandExecutor {
    CommandExecutor::new(issues, &Config::default())
}
