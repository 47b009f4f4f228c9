//! Explanation parser.
//!
//! Parses the head of an explanation into term buckets using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! explanation → "weight(" body
//! body        → TERM_REF
//!             | "spanOr([" term_list "])"
//!             | "spanNear([" clause ("," clause)* "]"
//! clause      → TERM_REF | "spanOr([" term_list "])"
//! term_list   → TERM_REF ("," TERM_REF)*
//! ```
//!
//! Everything after the recognized structure (slop, ordering flag, document number,
//! similarity name) is left unread.

use crate::{
    buckets::TermBuckets,
    error::ExplainError,
    lexer::{Lexer, Token},
};

/// Recursive descent parser over a lazily lexed explanation.
struct Parser<'a> {
    /// Token source.
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `explanation`, recognizing terms of `field`.
    fn new(explanation: &'a str, field: &str) -> Self {
        Self {
            lexer: Lexer::new(explanation, field),
        }
    }

    /// Parses: explanation → "weight(" body
    fn parse(mut self) -> Result<TermBuckets, ExplainError> {
        self.expect(&Token::Weight, "expected 'weight(' at start of explanation")?;

        match self.next()? {
            (_, Some(Token::TermRef(term))) => Ok(TermBuckets::new(vec![vec![term]])),
            (_, Some(Token::SpanOr)) => {
                let bucket = self.parse_term_list()?;
                Ok(TermBuckets::new(vec![bucket]))
            }
            (_, Some(Token::SpanNear)) => self.parse_clauses(),
            (pos, other) => Err(self.unexpected(other, pos, "term, spanOr or spanNear")),
        }
    }

    /// Parses: clause ("," clause)* "]"
    fn parse_clauses(&mut self) -> Result<TermBuckets, ExplainError> {
        let mut buckets = Vec::new();

        loop {
            match self.next()? {
                (_, Some(Token::TermRef(term))) => buckets.push(vec![term]),
                (_, Some(Token::SpanOr)) => buckets.push(self.parse_term_list()?),
                (pos, other) => return Err(self.unexpected(other, pos, "span clause")),
            }

            match self.next()? {
                (_, Some(Token::Comma)) => continue,
                (_, Some(Token::RBracket)) => break,
                (pos, other) => {
                    return Err(self.unexpected(other, pos, "',' or ']' after span clause"));
                }
            }
        }

        Ok(TermBuckets::new(buckets))
    }

    /// Parses: term_list "])"
    fn parse_term_list(&mut self) -> Result<Vec<String>, ExplainError> {
        let mut bucket = Vec::new();

        loop {
            match self.next()? {
                (_, Some(Token::TermRef(term))) => bucket.push(term),
                (pos, other) => return Err(self.unexpected(other, pos, "term in spanOr")),
            }

            match self.next()? {
                (_, Some(Token::Comma)) => continue,
                (_, Some(Token::RBracket)) => break,
                (pos, other) => {
                    return Err(self.unexpected(other, pos, "',' or ']' in spanOr"));
                }
            }
        }

        self.expect(&Token::RParen, "expected ')' closing spanOr")?;
        Ok(bucket)
    }

    /// Consumes the next token, requiring it to be `expected`.
    fn expect(&mut self, expected: &Token, message: &str) -> Result<(), ExplainError> {
        match self.next()? {
            (_, Some(ref token)) if token == expected => Ok(()),
            (pos, _) => Err(self.lexer.error_at(message, pos)),
        }
    }

    /// Returns the next token with its position; the position is end of input at EOF.
    fn next(&mut self) -> Result<(usize, Option<Token>), ExplainError> {
        match self.lexer.next_token()? {
            Some((pos, token)) => Ok((pos, Some(token))),
            None => Ok((self.lexer.position(), None)),
        }
    }

    /// Builds an error for an unexpected token or end of input.
    fn unexpected(&self, token: Option<Token>, pos: usize, expected: &str) -> ExplainError {
        let message = match token {
            Some(token) => format!("unexpected {token:?}, expected {expected}"),
            None => format!("unexpected end of explanation, expected {expected}"),
        };
        ExplainError::new(message, pos, self.lexer.input())
    }
}

/// Parses an explanation into term buckets for `field`.
///
/// Returns an error for any explanation whose head is not one of the recognized shapes.
pub fn parse(explanation: &str, field: &str) -> Result<TermBuckets, ExplainError> {
    Parser::new(explanation, field).parse()
}
