//! Milestone load report
//!
//! Only the next milestone matters: open issues are scanned for the target
//! milestone, then each contributor's share of that milestone's work is
//! estimated. Nothing is assigned on the tracker.

use super::*;
use crate::milestone::{issue_milestone, select_target_milestone};
use crate::output::{AssignResponse, ContributorLoad, IssueSummary};

impl CommandExecutor {
    pub fn assign_report(&self) -> Result<AssignResponse> {
        let todo: Vec<&Issue> = self.issues.iter().filter(|issue| issue.is_open()).collect();

        let milestone = select_target_milestone(todo.iter().copied(), &self.checkpoint);
        let in_milestone: Vec<&Issue> = match &milestone {
            Some(target) => todo
                .iter()
                .copied()
                .filter(|issue| {
                    issue_milestone(issue, &self.checkpoint)
                        .is_some_and(|m| m.number == target.number)
                })
                .collect(),
            None => Vec::new(),
        };
        debug!(
            open = todo.len(),
            in_milestone = in_milestone.len(),
            "scoped issues to target milestone"
        );

        let contributors = self
            .contributors
            .iter()
            .map(|login| {
                let mine: Vec<&Issue> = in_milestone
                    .iter()
                    .copied()
                    .filter(|issue| issue.is_assigned_to(login))
                    .collect();
                ContributorLoad {
                    login: login.clone(),
                    issues: mine.iter().map(|issue| issue.title.clone()).collect(),
                    hours: self.work_of(&mine),
                }
            })
            .collect();

        let unassigned = in_milestone
            .iter()
            .filter(|issue| issue.assignees.is_empty())
            .map(|issue| {
                IssueSummary::new(
                    issue,
                    self.hours_of(issue),
                    milestone.as_ref().map(|m| m.number),
                )
            })
            .collect();

        Ok(AssignResponse {
            milestone,
            open_issues: todo.len(),
            contributors,
            unassigned,
        })
    }
}
