//! Tokenization for the in-memory engine.

use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;

/// One indexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    /// Lowercase term.
    pub term: String,
    /// Token position; synonyms share the position of the word they were emitted for.
    pub position: usize,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Start offset in UTF-16 code units.
    pub utf16_start: usize,
}

/// Splits `content` into UAX-29 words, lowercases them, and emits the configured
/// synonyms of each word at the same position and offsets.
pub(crate) fn analyze(content: &str, synonyms: &HashMap<String, Vec<String>>) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut utf16_start = 0;
    let mut scanned = 0;

    for (position, (start, word)) in content.unicode_word_indices().enumerate() {
        utf16_start += content[scanned..start].encode_utf16().count();
        scanned = start;
        let end = start + word.len();
        let term = word.to_lowercase();

        if let Some(extra) = synonyms.get(&term) {
            tokens.extend(extra.iter().map(|synonym| Token {
                term: synonym.clone(),
                position,
                start,
                end,
                utf16_start,
            }));
        }
        tokens.push(Token {
            term,
            position,
            start,
            end,
            utf16_start,
        });
    }

    tokens
}
