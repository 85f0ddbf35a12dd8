//! Lexical analysis for query filter language
//!
//! Converts raw query strings into tokens for parsing.

use super::QueryError;

/// Token types in the query language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Filter condition: field:value (e.g., "state:open", "label:D-Easy")
    Filter { field: String, value: String },
    /// Boolean AND operator
    And,
    /// Boolean OR operator
    Or,
    /// Boolean NOT operator
    Not,
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Special: issues with nobody assigned
    Unassigned,
    /// Special: issues with neither a milestone nor the checkpoint label
    NoMilestone,
}

/// Lexer for tokenizing query strings
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input string
    pub fn tokenize(input: &str) -> Result<Vec<Token>, QueryError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, QueryError> {
        self.skip_whitespace();

        if self.is_at_end() {
            return Ok(None);
        }

        match self.current_char() {
            '(' => {
                self.advance();
                Ok(Some(Token::LParen))
            }
            ')' => {
                self.advance();
                Ok(Some(Token::RParen))
            }
            _ => {
                let (word, quoted) = self.read_word()?;

                // Quoting opts out of keyword recognition: label:"AND" is a filter.
                if quoted {
                    return self.parse_filter(&word).map(Some);
                }

                match word.as_str() {
                    "AND" => Ok(Some(Token::And)),
                    "OR" => Ok(Some(Token::Or)),
                    "NOT" => Ok(Some(Token::Not)),
                    "unassigned" => Ok(Some(Token::Unassigned)),
                    "nomilestone" => Ok(Some(Token::NoMilestone)),
                    _ => self.parse_filter(&word).map(Some),
                }
            }
        }
    }

    fn parse_filter(&self, word: &str) -> Result<Token, QueryError> {
        // Split on first colon only; values may contain colons
        let Some((field, value)) = word.split_once(':') else {
            return Err(QueryError::MissingSeparator(word.to_string()));
        };

        if field.is_empty() {
            return Err(QueryError::EmptyField(word.to_string()));
        }
        if value.is_empty() {
            return Err(QueryError::EmptyValue(word.to_string()));
        }

        Ok(Token::Filter {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// Read up to the next unquoted whitespace or parenthesis.
    ///
    /// Double-quoted runs are copied without their quotes and may contain
    /// whitespace and parentheses. Returns the word and whether any part of
    /// it was quoted.
    fn read_word(&mut self) -> Result<(String, bool), QueryError> {
        let start = self.position;
        let mut word = String::new();
        let mut quoted = false;

        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }

            if ch == '"' {
                quoted = true;
                let open = self.position;
                self.advance();
                while !self.is_at_end() && self.current_char() != '"' {
                    word.push(self.current_char());
                    self.advance();
                }
                if self.is_at_end() {
                    return Err(QueryError::UnterminatedQuote(open));
                }
            } else {
                word.push(ch);
            }
            self.advance();
        }

        if start == self.position {
            return Err(QueryError::UnexpectedCharacter(self.position));
        }

        Ok((word, quoted))
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}
