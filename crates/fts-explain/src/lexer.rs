//! Explanation lexer.
//!
//! Produces tokens on demand so that the trailing part of an explanation (slop, flags,
//! similarity name, "result of:") is never tokenized once the parser has what it needs.

use crate::error::ExplainError;

/// Opens the explanation of the matched clause.
const WEIGHT: &str = "weight(";
/// Opens an ordered proximity clause list.
const SPAN_NEAR: &str = "spanNear([";
/// Opens a disjunction of fuzzy variants.
const SPAN_OR: &str = "spanOr([";

/// A token in the explanation grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `weight(`
    Weight,
    /// `spanNear([`
    SpanNear,
    /// `spanOr([`
    SpanOr,
    /// `<field>:<term>`, carrying the term.
    TermRef(String),
    /// `,`
    Comma,
    /// `]`
    RBracket,
    /// `)`
    RParen,
}

/// Tokenizes an explanation for a single searched field.
pub(crate) struct Lexer<'a> {
    /// The full explanation text.
    input: &'a str,
    /// Field prefix including the colon, e.g. `content:`.
    field_prefix: String,
    /// Current byte position in input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer recognizing term references for `field`.
    pub(crate) fn new(input: &'a str, field: &str) -> Self {
        Self {
            input,
            field_prefix: format!("{field}:"),
            position: 0,
        }
    }

    /// The full input being tokenized.
    pub(crate) fn input(&self) -> &'a str {
        self.input
    }

    /// Current byte position.
    pub(crate) fn position(&self) -> usize {
        self.position
    }

    /// Creates an error at a specific position.
    pub(crate) fn error_at(&self, message: impl Into<String>, position: usize) -> ExplainError {
        ExplainError::new(message, position, self.input)
    }

    /// Returns the next token with its starting byte position, or None at end of input.
    pub(crate) fn next_token(&mut self) -> Result<Option<(usize, Token)>, ExplainError> {
        self.skip_whitespace();

        let start = self.position;
        let rest = self.rest();
        let Some(ch) = rest.chars().next() else {
            return Ok(None);
        };

        let token = match ch {
            ',' => self.single(Token::Comma),
            ']' => self.single(Token::RBracket),
            ')' => self.single(Token::RParen),
            _ if rest.starts_with(WEIGHT) => self.keyword(WEIGHT, Token::Weight),
            _ if rest.starts_with(SPAN_NEAR) => self.keyword(SPAN_NEAR, Token::SpanNear),
            _ if rest.starts_with(SPAN_OR) => self.keyword(SPAN_OR, Token::SpanOr),
            _ if rest.starts_with(self.field_prefix.as_str()) => self.read_term_ref()?,
            _ => {
                let snippet: String = rest.chars().take(24).collect();
                return Err(self.error_at(format!("unrecognized token '{snippet}'"), start));
            }
        };

        Ok(Some((start, token)))
    }

    /// Reads `<field>:<term>`; the term runs up to a delimiter or whitespace.
    fn read_term_ref(&mut self) -> Result<Token, ExplainError> {
        let start = self.position;
        self.position += self.field_prefix.len();

        let term: String = self
            .rest()
            .chars()
            .take_while(|&c| !is_term_delimiter(c))
            .collect();

        if term.is_empty() {
            return Err(self.error_at(
                format!("empty term after '{}'", self.field_prefix),
                start,
            ));
        }

        self.position += term.len();
        Ok(Token::TermRef(term))
    }

    /// Consumes a single-character token.
    fn single(&mut self, token: Token) -> Token {
        self.position += 1;
        token
    }

    /// Consumes a multi-character keyword.
    fn keyword(&mut self, keyword: &str, token: Token) -> Token {
        self.position += keyword.len();
        token
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        let skipped: usize = self
            .rest()
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        self.position += skipped;
    }

    /// Unconsumed input.
    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }
}

/// Characters that end a term reference.
fn is_term_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '[' | ']' | '(' | ')')
}
