//! Evaluator for query expressions against Issue objects
//!
//! This layer contains all domain knowledge and reuses existing Issue methods.

use super::parser::{LabelPattern, QueryCondition, QueryExpr};
use crate::difficulty::DifficultyTable;
use crate::domain::Issue;
use crate::milestone::{issue_milestone, Checkpoint};

/// Context needed for evaluating queries
///
/// Built explicitly by the caller and passed in; evaluation keeps no state
/// of its own.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    /// Table used to resolve `difficulty:` values and issue difficulty labels
    pub difficulties: DifficultyTable,
    /// Checkpoint label counted as a milestone by `milestone:` and `nomilestone`
    pub checkpoint: Checkpoint,
}

impl QueryContext {
    pub fn new(difficulties: DifficultyTable, checkpoint: Checkpoint) -> Self {
        Self {
            difficulties,
            checkpoint,
        }
    }
}

/// Evaluator for query expressions
pub struct QueryEvaluator;

impl QueryEvaluator {
    /// Check if an issue matches a query expression
    pub fn matches(expr: &QueryExpr, issue: &Issue, context: &QueryContext) -> bool {
        match expr {
            QueryExpr::Condition(cond) => Self::eval_condition(cond, issue, context),
            QueryExpr::And(left, right) => {
                Self::matches(left, issue, context) && Self::matches(right, issue, context)
            }
            QueryExpr::Or(left, right) => {
                Self::matches(left, issue, context) || Self::matches(right, issue, context)
            }
            QueryExpr::Not(inner) => !Self::matches(inner, issue, context),
        }
    }

    fn eval_condition(cond: &QueryCondition, issue: &Issue, ctx: &QueryContext) -> bool {
        match cond {
            QueryCondition::State(state) => issue.state == *state,

            QueryCondition::Label(LabelPattern::Exact(name)) => issue.has_label(name),

            QueryCondition::Label(LabelPattern::Prefix(prefix)) => issue
                .labels
                .iter()
                .any(|label| label.name.starts_with(prefix.as_str())),

            QueryCondition::Assignee(login) => issue.is_assigned_to(login),

            QueryCondition::Milestone(number) => issue_milestone(issue, &ctx.checkpoint)
                .map(|milestone| milestone.number == *number)
                .unwrap_or(false),

            QueryCondition::Difficulty(wanted) => {
                // Both sides go through the table so "D-Eazy" finds "D-Easy" issues
                // and vice versa.
                let Some(issue_label) = issue.difficulty() else {
                    return false;
                };
                match (
                    ctx.difficulties.resolve(wanted),
                    ctx.difficulties.resolve(issue_label),
                ) {
                    (Some(wanted), Some(actual)) => wanted == actual,
                    _ => false,
                }
            }

            QueryCondition::Unassigned => issue.assignees.is_empty(),

            QueryCondition::NoMilestone => issue_milestone(issue, &ctx.checkpoint).is_none(),
        }
    }
}
