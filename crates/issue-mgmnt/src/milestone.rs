//! Target milestone selection.
//!
//! Every open issue either carries a tracker milestone or, for work planned
//! before milestones existed on the tracker, the checkpoint label. The
//! checkpoint label stands in for a fixed milestone number and due date.

use crate::domain::Issue;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

/// A label that stands in for a tracker milestone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub label: String,
    pub number: u64,
    pub due_on: DateTime<Utc>,
}

impl Default for Checkpoint {
    /// `F-Checkpoint`, milestone 1, due 2025-10-21 00:00 UTC.
    fn default() -> Self {
        Self {
            label: "F-Checkpoint".to_string(),
            number: 1,
            due_on: Utc
                .with_ymd_and_hms(2025, 10, 21, 0, 0, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

/// Where a [`TargetMilestone`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneSource {
    /// Attached to the issue on the tracker
    Tracker,
    /// Synthesized from the checkpoint label
    Checkpoint,
}

/// The milestone work is being planned against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetMilestone {
    pub number: u64,
    pub due_on: Option<DateTime<Utc>>,
    pub source: MilestoneSource,
}

/// Milestone an issue counts towards, if any.
///
/// A tracker milestone takes precedence over the checkpoint label.
pub fn issue_milestone(issue: &Issue, checkpoint: &Checkpoint) -> Option<TargetMilestone> {
    if let Some(milestone) = &issue.milestone {
        return Some(TargetMilestone {
            number: milestone.number,
            due_on: milestone.due_on,
            source: MilestoneSource::Tracker,
        });
    }

    if issue.has_label(&checkpoint.label) {
        return Some(TargetMilestone {
            number: checkpoint.number,
            due_on: Some(checkpoint.due_on),
            source: MilestoneSource::Checkpoint,
        });
    }

    None
}

/// Scan `issues` for the milestone to plan against.
///
/// Every qualifying issue replaces the previous candidate, so the result is
/// the milestone of the last qualifying issue scanned. Due dates are not
/// compared. Callers pass open issues only.
pub fn select_target_milestone<'a, I>(issues: I, checkpoint: &Checkpoint) -> Option<TargetMilestone>
where
    I: IntoIterator<Item = &'a Issue>,
{
    let mut target = None;

    for issue in issues {
        if let Some(candidate) = issue_milestone(issue, checkpoint) {
            debug!(
                issue = %issue.id,
                milestone = candidate.number,
                source = ?candidate.source,
                "adopting milestone"
            );
            target = Some(candidate);
        }
    }

    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueState, Label, Milestone};

    fn issue(id: &str, labels: &[&str], milestone: Option<(u64, Option<&str>)>) -> Issue {
        Issue {
            id: id.to_string(),
            title: format!("Issue {}", id),
            labels: labels
                .iter()
                .map(|name| Label {
                    name: name.to_string(),
                })
                .collect(),
            assignees: vec![],
            milestone: milestone.map(|(number, due)| Milestone {
                number,
                title: format!("M{}", number),
                due_on: due.map(|d| d.parse().unwrap()),
            }),
            state: IssueState::Open,
        }
    }

    #[test]
    fn test_no_qualifying_issue() {
        let issues = [issue("1", &["D-Easy"], None)];
        assert_eq!(select_target_milestone(&issues, &Checkpoint::default()), None);
    }

    #[test]
    fn test_empty_input() {
        let issues: [Issue; 0] = [];
        assert_eq!(select_target_milestone(&issues, &Checkpoint::default()), None);
    }

    #[test]
    fn test_tracker_milestone_adopted() {
        let issues = [issue("1", &[], Some((3, Some("2025-11-20T00:00:00Z"))))];
        let target = select_target_milestone(&issues, &Checkpoint::default()).unwrap();
        assert_eq!(target.number, 3);
        assert_eq!(target.source, MilestoneSource::Tracker);
        assert_eq!(
            target.due_on,
            Some(Utc.with_ymd_and_hms(2025, 11, 20, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_checkpoint_label_fallback() {
        let issues = [issue("1", &["F-Checkpoint"], None)];
        let target = select_target_milestone(&issues, &Checkpoint::default()).unwrap();
        assert_eq!(target.number, 1);
        assert_eq!(target.source, MilestoneSource::Checkpoint);
        assert_eq!(
            target.due_on,
            Some(Utc.with_ymd_and_hms(2025, 10, 21, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_tracker_milestone_beats_checkpoint_label() {
        let issues = [issue("1", &["F-Checkpoint"], Some((2, None)))];
        let target = select_target_milestone(&issues, &Checkpoint::default()).unwrap();
        assert_eq!(target.number, 2);
        assert_eq!(target.due_on, None);
    }

    #[test]
    fn test_last_qualifying_issue_wins() {
        // The earlier deadline is seen first and still loses.
        let issues = [
            issue("1", &[], Some((2, Some("2025-10-01T00:00:00Z")))),
            issue("2", &["D-Hard"], None),
            issue("3", &[], Some((5, Some("2026-03-01T00:00:00Z")))),
            issue("4", &["D-Easy"], None),
        ];
        let target = select_target_milestone(&issues, &Checkpoint::default()).unwrap();
        assert_eq!(target.number, 5);
    }

    #[test]
    fn test_custom_checkpoint() {
        let checkpoint = Checkpoint {
            label: "F-Demo".to_string(),
            number: 9,
            due_on: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        };
        let issues = [issue("1", &["F-Checkpoint"], None), issue("2", &["F-Demo"], None)];
        let target = select_target_milestone(&issues, &checkpoint).unwrap();
        assert_eq!(target.number, 9);
        assert_eq!(issue_milestone(&issues[0], &checkpoint), None);
    }
}
