//! Typed span queries.
//!
//! A [`SpanSearch`] restricts matching to one scratch document and asks for an ordered
//! proximity match over a list of clauses, with explanation and whole-field highlighting
//! enabled. Engines render it into their own wire format.

use std::{fmt, str::FromStr};

/// Name of the single field scratch documents are indexed under.
pub const CONTENT_FIELD: &str = "content";

/// Highlight fragment size large enough to always return the whole field.
pub const DEFAULT_FRAGMENT_SIZE: usize = 10_000_000;

/// Maximum edit distance for a fuzzy clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fuzziness {
    /// Edit distance derived from term length: 0 below 3 characters, 1 up to 5, 2 above.
    #[default]
    Auto,
    /// A fixed edit distance (0, 1 or 2).
    Edits(u8),
}

impl Fuzziness {
    /// Returns the maximum number of edits allowed for a term of `len` characters.
    pub fn max_edits(self, len: usize) -> u8 {
        match self {
            Self::Auto => match len {
                0..=2 => 0,
                3..=5 => 1,
                _ => 2,
            },
            Self::Edits(n) => n,
        }
    }
}

impl fmt::Display for Fuzziness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "AUTO"),
            Self::Edits(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for Fuzziness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        match trimmed.parse::<u8>() {
            Ok(n) if n <= 2 => Ok(Self::Edits(n)),
            _ => Err(format!(
                "invalid fuzziness '{s}': expected 'auto', 0, 1 or 2"
            )),
        }
    }
}

/// A fuzzy term clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyTerm {
    /// The (lowercase) word to expand.
    pub value: String,
    /// Maximum edit distance.
    pub fuzziness: Fuzziness,
    /// Number of leading characters that must match exactly.
    pub prefix_length: usize,
    /// Maximum number of variants the word may expand to.
    pub max_expansions: usize,
    /// Whether a swap of two adjacent characters counts as one edit.
    pub transpositions: bool,
}

/// One word of a span-near query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanClause {
    /// Matches the exact indexed term.
    Term(String),
    /// Matches any indexed term within the fuzzy distance.
    Fuzzy(FuzzyTerm),
}

impl SpanClause {
    /// Creates a literal term clause.
    pub fn term(value: impl Into<String>) -> Self {
        Self::Term(value.into())
    }

    /// Returns the word this clause searches for.
    pub fn value(&self) -> &str {
        match self {
            Self::Term(value) => value,
            Self::Fuzzy(fuzzy) => &fuzzy.value,
        }
    }
}

/// Highlighting requested for the content field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Marker inserted before each highlighted term.
    pub pre_tag: String,
    /// Marker inserted after each highlighted term.
    pub post_tag: String,
    /// Fragment size; large enough to cover the whole field.
    pub fragment_size: usize,
}

impl Default for Highlight {
    fn default() -> Self {
        Self {
            pre_tag: "<em>".to_string(),
            post_tag: "</em>".to_string(),
            fragment_size: DEFAULT_FRAGMENT_SIZE,
        }
    }
}

/// An ordered span-near search against one scratch document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanSearch {
    /// Identifier of the document to search.
    pub document_id: String,
    /// Field to search.
    pub field: String,
    /// Clauses, in the order they must appear.
    pub clauses: Vec<SpanClause>,
    /// Maximum number of intervening unmatched positions.
    pub slop: usize,
    /// Highlighting options.
    pub highlight: Highlight,
}

impl SpanSearch {
    /// Creates a search over the content field with default highlighting.
    pub fn new(document_id: &str, clauses: Vec<SpanClause>, slop: usize) -> Self {
        Self {
            document_id: document_id.to_string(),
            field: CONTENT_FIELD.to_string(),
            clauses,
            slop,
            highlight: Highlight::default(),
        }
    }

    /// Returns the searched words in clause order.
    pub fn words(&self) -> Vec<&str> {
        self.clauses.iter().map(SpanClause::value).collect()
    }
}
