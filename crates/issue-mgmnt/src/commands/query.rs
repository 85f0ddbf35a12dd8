//! Issue query operations

use super::*;
use crate::milestone::issue_milestone;
use crate::output::{IssueSummary, QueryResponse};
use crate::query::QueryFilter;

impl CommandExecutor {
    /// Issues matching `filter` (all issues when `None`) and their total work.
    pub fn query_issues(&self, filter: Option<&str>) -> Result<QueryResponse> {
        let compiled = filter.map(QueryFilter::parse).transpose()?;
        let issues = &self.issues;
        let context = self.query_context();

        let matched: Vec<&Issue> = match &compiled {
            Some(compiled) => compiled.filter_issues(issues, &context),
            None => issues.iter().collect(),
        };
        debug!(matched = matched.len(), total = issues.len(), "query evaluated");

        let summaries = matched
            .iter()
            .map(|issue| {
                let milestone = issue_milestone(issue, &self.checkpoint).map(|m| m.number);
                IssueSummary::new(issue, self.hours_of(issue), milestone)
            })
            .collect();

        Ok(QueryResponse {
            filter: filter.map(str::to_string),
            issues: summaries,
            count: matched.len(),
            total_work: self.work_of(&matched),
        })
    }
}
