//! Issue types as reported by the tracker client.
//!
//! These mirror the objects produced by
//! `gh issue list --json id,title,labels,assignees,milestone,state`.
//! They are read-only snapshots: nothing here is ever written back.

use crate::difficulty::DIFFICULTY_PREFIX;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fields requested from the tracker client, in request order.
pub const ISSUE_FIELDS: &str = "id,title,labels,assignees,milestone,state";

/// Issue lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IssueState {
    Open,
    Closed,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Open => write!(f, "open"),
            IssueState::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for IssueState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(IssueState::Open),
            "closed" => Ok(IssueState::Closed),
            _ => Err(format!("Invalid state: '{}' (expected open or closed)", s)),
        }
    }
}

/// A label attached to an issue. Only the name is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

/// A user assigned to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub login: String,
}

/// A tracker-native milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    /// Deadline, if one was set on the tracker
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
}

/// An issue as listed by the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Opaque tracker node ID
    pub id: String,
    pub title: String,
    /// Labels in tracker order
    pub labels: Vec<Label>,
    pub assignees: Vec<Assignee>,
    /// Absent and `null` both mean "no milestone"
    #[serde(default)]
    pub milestone: Option<Milestone>,
    pub state: IssueState,
}

impl Issue {
    pub fn is_open(&self) -> bool {
        self.state == IssueState::Open
    }

    /// First label carrying the difficulty prefix, if any.
    pub fn difficulty(&self) -> Option<&str> {
        self.labels
            .iter()
            .map(|label| label.name.as_str())
            .find(|name| name.starts_with(DIFFICULTY_PREFIX))
    }

    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }

    pub fn is_assigned_to(&self, login: &str) -> bool {
        self.assignees.iter().any(|assignee| assignee.login == login)
    }

    pub fn assignee_logins(&self) -> impl Iterator<Item = &str> {
        self.assignees.iter().map(|assignee| assignee.login.as_str())
    }
}

/// Parse the tracker's JSON issue list.
///
/// Missing required fields (`id`, `title`, `labels`, `assignees`, `state`)
/// are an error; a missing or `null` milestone is not.
pub fn parse_issues(json: &str) -> serde_json::Result<Vec<Issue>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const GH_PAYLOAD: &str = r#"[
      {
        "assignees": [{"id": "MDQ6VXNlcjE=", "login": "bitokn", "name": "Bit"}],
        "id": "I_kwDOPv7Z0M7OFv2D",
        "labels": [
          {"id": "LA_1", "name": "F-Checkpoint", "description": "", "color": "ededed"},
          {"id": "LA_2", "name": "D-Easy", "description": "Half day", "color": "0e8a16"}
        ],
        "milestone": {"number": 2, "title": "Part 3", "description": "", "dueOn": "2025-11-03T00:00:00Z"},
        "state": "OPEN",
        "title": "Waitlist screen"
      },
      {
        "assignees": [],
        "id": "I_kwDOPv7Z0M7OFv2E",
        "labels": [],
        "milestone": null,
        "state": "CLOSED",
        "title": "Project setup"
      }
    ]"#;

    #[test]
    fn test_parse_gh_payload() {
        let issues = parse_issues(GH_PAYLOAD).unwrap();
        assert_eq!(issues.len(), 2);

        let first = &issues[0];
        assert_eq!(first.title, "Waitlist screen");
        assert!(first.is_open());
        assert_eq!(first.labels.len(), 2);
        assert!(first.is_assigned_to("bitokn"));

        let milestone = first.milestone.as_ref().unwrap();
        assert_eq!(milestone.number, 2);
        assert_eq!(milestone.title, "Part 3");
        assert_eq!(
            milestone.due_on,
            Some(Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap())
        );

        let second = &issues[1];
        assert_eq!(second.state, IssueState::Closed);
        assert!(second.milestone.is_none());
    }

    #[test]
    fn test_parse_accepts_missing_milestone() {
        let json = r#"[{"id": "1", "title": "t", "labels": [], "assignees": [], "state": "OPEN"}]"#;
        let issues = parse_issues(json).unwrap();
        assert!(issues[0].milestone.is_none());
    }

    #[test]
    fn test_parse_accepts_milestone_without_due_date() {
        let json = r#"[{"id": "1", "title": "t", "labels": [], "assignees": [], "state": "OPEN",
                        "milestone": {"number": 4, "title": "Backlog", "dueOn": null}}]"#;
        let issues = parse_issues(json).unwrap();
        let milestone = issues[0].milestone.as_ref().unwrap();
        assert_eq!(milestone.number, 4);
        assert!(milestone.due_on.is_none());
    }

    #[test]
    fn test_parse_rejects_missing_labels() {
        let json = r#"[{"id": "1", "title": "t", "assignees": [], "state": "OPEN"}]"#;
        let err = parse_issues(json).unwrap_err();
        assert!(err.to_string().contains("labels"));
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_issues("not json").is_err());
        assert!(parse_issues(r#"{"id": "1"}"#).is_err());
    }

    #[test]
    fn test_difficulty_is_first_prefixed_label() {
        let issues = parse_issues(GH_PAYLOAD).unwrap();
        assert_eq!(issues[0].difficulty(), Some("D-Easy"));
        assert_eq!(issues[1].difficulty(), None);
    }

    #[test]
    fn test_has_label_is_exact() {
        let issues = parse_issues(GH_PAYLOAD).unwrap();
        assert!(issues[0].has_label("F-Checkpoint"));
        assert!(!issues[0].has_label("F-checkpoint"));
    }

    #[test]
    fn test_state_from_str() {
        assert_eq!("open".parse::<IssueState>(), Ok(IssueState::Open));
        assert_eq!("CLOSED".parse::<IssueState>(), Ok(IssueState::Closed));
        assert!("merged".parse::<IssueState>().is_err());
    }
}
