//! Values exchanged with callers of the locator.

use serde::Serialize;

/// What a searched phrase is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PhraseRole {
    /// Marks the start of a segment to extract.
    #[serde(rename = "PRE_PHRASE")]
    Pre,
    /// Marks the end of a segment to extract.
    #[serde(rename = "POST_PHRASE")]
    Post,
    /// A plain phrase to find.
    #[serde(rename = "TEXT")]
    Plain,
}

/// A phrase to search for, as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phrase {
    /// Raw phrase text.
    pub value: String,
    /// How results for this phrase are used.
    pub role: PhraseRole,
}

impl Phrase {
    /// Creates a phrase with the given role.
    pub fn new(value: impl Into<String>, role: PhraseRole) -> Self {
        Self {
            value: value.into(),
            role,
        }
    }
}

/// A located occurrence of (part of) a phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoundEntity {
    /// The phrase searched for, lowercased.
    pub search_text: String,
    /// The words of the phrase that were searched in the attempt that produced this hit.
    pub search_words: Vec<String>,
    /// The content between `start_offset` and `end_offset`.
    pub found_text: String,
    /// Byte offset of the first matched character.
    pub start_offset: usize,
    /// Byte offset one past the last matched character.
    pub end_offset: usize,
    /// Fraction of the phrase's words that were searched, in (0, 1].
    pub accuracy: f64,
    /// Role of the phrase this hit belongs to.
    pub role: PhraseRole,
}

/// A highlighted range of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// The content in this range.
    pub text: String,
}

/// One occurrence of an indexed term in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPosition {
    /// The (lowercase) term that matched.
    pub term: String,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
}

/// Result of a marker-based extraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedText {
    /// Every searched phrase, pre-markers first.
    pub phrases: Vec<Phrase>,
    /// Extracted segments joined by the configured delimiter; `None` when nothing was found.
    pub extracted_text: Option<String>,
    /// Pre-marker hits after overlap collapse, sorted by start.
    pub found_pre_phrases: Vec<FoundEntity>,
    /// Post-marker hits after overlap collapse, sorted by start.
    pub found_post_phrases: Vec<FoundEntity>,
}
