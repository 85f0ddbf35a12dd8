//! Parser for query filter language
//!
//! Builds an abstract syntax tree (AST) from tokens.

use super::lexer::Token;
use super::QueryError;
use crate::domain::IssueState;

/// Abstract syntax tree node for query expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryExpr {
    /// Single condition
    Condition(QueryCondition),
    /// Logical AND
    And(Box<QueryExpr>, Box<QueryExpr>),
    /// Logical OR
    Or(Box<QueryExpr>, Box<QueryExpr>),
    /// Logical NOT
    Not(Box<QueryExpr>),
}

/// How a `label:` value is compared against label names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelPattern {
    /// Whole label name, case-sensitive
    Exact(String),
    /// Label names starting with the given text (`label:D-*`)
    Prefix(String),
}

/// Individual query conditions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCondition {
    /// Filter by open/closed state
    State(IssueState),
    /// Filter by label name
    Label(LabelPattern),
    /// Filter by assignee login
    Assignee(String),
    /// Filter by effective milestone number (checkpoint label included)
    Milestone(u64),
    /// Filter by difficulty, tolerant of misspellings on either side
    Difficulty(String),
    /// Issues with no assignee
    Unassigned,
    /// Issues with no effective milestone
    NoMilestone,
}

/// Parser for building AST from tokens
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Create a new parser
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            position: 0,
        }
    }

    /// Parse tokens into an expression tree
    ///
    /// The whole token stream must be consumed; a stray `)` is an error.
    pub fn parse(tokens: Vec<Token>) -> Result<QueryExpr, QueryError> {
        let mut parser = Parser::new(tokens);
        let expr = parser.parse_expr()?;

        if !parser.is_at_end() {
            return Err(QueryError::UnexpectedToken(format!(
                "{:?}",
                parser.current_token()
            )));
        }

        Ok(expr)
    }

    /// Parse OR expression (lowest precedence)
    fn parse_expr(&mut self) -> Result<QueryExpr, QueryError> {
        let mut left = self.parse_term()?;

        while self.match_token(&Token::Or) {
            self.advance();
            let right = self.parse_term()?;
            left = QueryExpr::Or(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    /// Parse AND expression (medium precedence)
    /// Also handles implicit AND (two conditions next to each other)
    fn parse_term(&mut self) -> Result<QueryExpr, QueryError> {
        let mut left = self.parse_factor()?;

        while !self.is_at_end()
            && !self.match_token(&Token::Or)
            && !self.match_token(&Token::RParen)
        {
            if self.match_token(&Token::And) {
                self.advance();
                let right = self.parse_factor()?;
                left = QueryExpr::And(Box::new(left), Box::new(right));
            } else if self.is_condition_start() {
                let right = self.parse_factor()?;
                left = QueryExpr::And(Box::new(left), Box::new(right));
            } else {
                break;
            }
        }

        Ok(left)
    }

    /// Parse NOT expression and atoms (highest precedence)
    fn parse_factor(&mut self) -> Result<QueryExpr, QueryError> {
        if self.match_token(&Token::Not) {
            self.advance();
            let inner = self.parse_factor()?;
            return Ok(QueryExpr::Not(Box::new(inner)));
        }

        if self.match_token(&Token::LParen) {
            self.advance();
            let expr = self.parse_expr()?;

            if !self.match_token(&Token::RParen) {
                return Err(QueryError::UnclosedParenthesis);
            }
            self.advance();
            return Ok(expr);
        }

        self.parse_condition()
    }

    /// Parse a single condition (atom)
    fn parse_condition(&mut self) -> Result<QueryExpr, QueryError> {
        if self.is_at_end() {
            return Err(QueryError::UnexpectedEnd);
        }

        let token = self.current_token().clone();
        self.advance();

        let condition = match token {
            Token::Filter { field, value } => Self::filter_condition(&field, value)?,
            Token::Unassigned => QueryCondition::Unassigned,
            Token::NoMilestone => QueryCondition::NoMilestone,
            other => return Err(QueryError::UnexpectedToken(format!("{:?}", other))),
        };

        Ok(QueryExpr::Condition(condition))
    }

    fn filter_condition(field: &str, value: String) -> Result<QueryCondition, QueryError> {
        match field {
            "state" => value
                .parse::<IssueState>()
                .map(QueryCondition::State)
                .map_err(|reason| QueryError::InvalidValue {
                    field: field.to_string(),
                    value,
                    reason,
                }),
            "label" => Ok(QueryCondition::Label(match value.strip_suffix('*') {
                Some(prefix) => LabelPattern::Prefix(prefix.to_string()),
                None => LabelPattern::Exact(value),
            })),
            "assignee" => Ok(QueryCondition::Assignee(value)),
            "milestone" => value
                .trim_start_matches('#')
                .parse::<u64>()
                .map(QueryCondition::Milestone)
                .map_err(|_| QueryError::InvalidValue {
                    field: field.to_string(),
                    value,
                    reason: "expected a milestone number".to_string(),
                }),
            "difficulty" => Ok(QueryCondition::Difficulty(value)),
            _ => Err(QueryError::UnknownField(field.to_string())),
        }
    }

    fn is_condition_start(&self) -> bool {
        if self.is_at_end() {
            return false;
        }
        matches!(
            self.current_token(),
            Token::Filter { .. }
                | Token::Unassigned
                | Token::NoMilestone
                | Token::Not
                | Token::LParen
        )
    }

    fn match_token(&self, expected: &Token) -> bool {
        if self.is_at_end() {
            return false;
        }
        std::mem::discriminant(self.current_token()) == std::mem::discriminant(expected)
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.position += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }
}
