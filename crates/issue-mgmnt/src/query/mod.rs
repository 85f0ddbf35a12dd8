//! Query filter engine for selecting tracker issues
//!
//! Provides a boolean query language for filtering issues:
//! - Simple filters: `state:open`, `label:bug`, `assignee:bitokn`, `milestone:2`
//! - Difficulty filters that tolerate misspellings: `difficulty:D-Eazy`
//! - Label prefixes: `label:D-*`
//! - Quoted values: `label:"D-Super Easy"`
//! - Boolean operators: `AND`, `OR`, `NOT`
//! - Parentheses for grouping: `(milestone:1 OR milestone:2) AND unassigned`
//! - Special conditions: `unassigned`, `nomilestone`
//!
//! # Architecture
//!
//! The query engine follows a three-layer architecture:
//! 1. **Lexer**: Converts query string to tokens
//! 2. **Parser**: Builds abstract syntax tree (AST) from tokens
//! 3. **Evaluator**: Evaluates AST against Issue objects
//!
//! # Examples
//!
//! ```
//! use issue_mgmnt::query::QueryFilter;
//!
//! # fn example() -> Result<(), issue_mgmnt::query::QueryError> {
//! let filter = QueryFilter::parse("state:open AND unassigned")?;
//! # Ok(())
//! # }
//! ```

mod evaluator;
mod lexer;
mod parser;

pub use evaluator::{QueryContext, QueryEvaluator};
pub use lexer::{Lexer, Token};
pub use parser::{LabelPattern, Parser, QueryCondition, QueryExpr};

use crate::domain::Issue;
use thiserror::Error;

/// Errors raised while compiling a query string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid filter '{0}': expected format 'field:value'")]
    MissingSeparator(String),

    #[error("Filter field cannot be empty: '{0}'")]
    EmptyField(String),

    #[error("Filter value cannot be empty: '{0}'")]
    EmptyValue(String),

    #[error("Unterminated quote starting at position {0}")]
    UnterminatedQuote(usize),

    #[error("Unexpected character at position {0}")]
    UnexpectedCharacter(usize),

    #[error("Unknown filter field: '{0}' (expected state, label, assignee, milestone or difficulty)")]
    UnknownField(String),

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unexpected end of query")]
    UnexpectedEnd,

    #[error("Expected closing parenthesis")]
    UnclosedParenthesis,

    #[error("Unexpected {0} in query")]
    UnexpectedToken(String),
}

/// A compiled query filter ready for evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFilter {
    expr: QueryExpr,
}

impl QueryFilter {
    /// Parse a query string into a filter
    ///
    /// # Examples
    ///
    /// ```
    /// use issue_mgmnt::query::QueryFilter;
    ///
    /// # fn example() -> Result<(), issue_mgmnt::query::QueryError> {
    /// let filter = QueryFilter::parse("state:open")?;
    /// let filter = QueryFilter::parse(r#"label:"D-Super Easy" assignee:bitokn"#)?;
    /// let filter = QueryFilter::parse("(milestone:1 OR milestone:2) NOT unassigned")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let tokens = Lexer::tokenize(query)?;
        let expr = Parser::parse(tokens)?;
        Ok(QueryFilter { expr })
    }

    /// Check if an issue matches this filter
    pub fn matches(&self, issue: &Issue, context: &QueryContext) -> bool {
        QueryEvaluator::matches(&self.expr, issue, context)
    }

    /// Filter a collection of issues, preserving their order
    pub fn filter_issues<'a>(&self, issues: &'a [Issue], context: &QueryContext) -> Vec<&'a Issue> {
        issues
            .iter()
            .filter(|issue| self.matches(issue, context))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Assignee, IssueState, Label};

    fn create_test_issue(id: &str, state: IssueState, labels: Vec<&str>, assignees: Vec<&str>) -> Issue {
        Issue {
            id: id.to_string(),
            title: format!("Test {}", id),
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
            state,
        }
    }

    #[test]
    fn test_parse_simple_query() {
        assert!(QueryFilter::parse("state:open").is_ok());
    }

    #[test]
    fn test_parse_complex_query() {
        assert!(QueryFilter::parse(r#"(state:open OR state:closed) AND label:"D-Super Hard""#).is_ok());
    }

    #[test]
    fn test_parse_reports_lexer_errors() {
        assert_eq!(
            QueryFilter::parse("open"),
            Err(QueryError::MissingSeparator("open".to_string()))
        );
    }

    #[test]
    fn test_filter_by_state() {
        let issues = vec![
            create_test_issue("1", IssueState::Open, vec![], vec![]),
            create_test_issue("2", IssueState::Closed, vec![], vec![]),
            create_test_issue("3", IssueState::Open, vec![], vec![]),
        ];

        let filter = QueryFilter::parse("state:open").unwrap();
        let matched = filter.filter_issues(&issues, &QueryContext::default());

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].id, "1");
        assert_eq!(matched[1].id, "3");
    }

    #[test]
    fn test_filter_by_difficulty_and_assignee() {
        let issues = vec![
            create_test_issue("1", IssueState::Open, vec!["D-Hard"], vec!["bitokn"]),
            create_test_issue("2", IssueState::Open, vec!["D-Hard"], vec![]),
            create_test_issue("3", IssueState::Open, vec!["D-Easy"], vec!["bitokn"]),
        ];

        let filter = QueryFilter::parse("difficulty:D-Hrad assignee:bitokn").unwrap();
        let matched = filter.filter_issues(&issues, &QueryContext::default());

        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "1");
    }
}
