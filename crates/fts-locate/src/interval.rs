//! Offset bookkeeping between content, highlighted text and term occurrences.
//!
//! All offsets are byte offsets into the UTF-8 content unless stated otherwise.

use std::{
    collections::{BTreeMap, btree_map::Entry},
    sync::LazyLock,
};

use regex::{Regex, RegexBuilder};

use crate::types::{Position, TermPosition};

/// One punctuation character at either end of a segment, with surrounding whitespace.
static BOUNDARY_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[.,/#!$%\\^&*;:{}=\-_`~()?]\s*|\s*[.,/#!$%\\^&*;:{}=\-_`~()?]\s*$")
        .expect("boundary punctuation regex must compile")
});

/// Maps the marked ranges of `highlighted` back to ranges of the unmarked content.
///
/// Markers are removed in a single scan, so every earlier marker shifts later offsets by its
/// length. An opening marker without a closing one extends to the end of the text.
pub fn highlighted_spans(highlighted: &str, pre_tag: &str, post_tag: &str) -> Vec<Position> {
    let mut spans = Vec::new();
    let mut plain = String::with_capacity(highlighted.len());
    let mut rest = highlighted;

    while let Some(open) = rest.find(pre_tag) {
        plain.push_str(&rest[..open]);
        let inner = &rest[open + pre_tag.len()..];
        let (text, after) = match inner.find(post_tag) {
            Some(close) => (&inner[..close], &inner[close + post_tag.len()..]),
            None => (inner, ""),
        };
        let start = plain.len();
        plain.push_str(text);
        spans.push(Position {
            start,
            end: plain.len(),
            text: text.to_string(),
        });
        rest = after;
    }

    spans
}

/// Returns whether `c` separates words.
fn is_boundary(c: Option<char>) -> bool {
    c.is_none_or(|c| !c.is_alphanumeric())
}

/// Finds every case-insensitive whole-word occurrence of `term` in `content`.
///
/// An occurrence must be preceded by a non-alphanumeric character or the start of the
/// content, and followed by a non-alphanumeric character or the end of the content.
pub fn term_occurrences(content: &str, term: &str) -> Vec<TermPosition> {
    if term.is_empty() {
        return Vec::new();
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    else {
        return Vec::new();
    };

    let mut found = Vec::new();
    let mut from = 0;
    while let Some(m) = pattern.find_at(content, from) {
        let before = content[..m.start()].chars().next_back();
        let after = content[m.end()..].chars().next();
        if is_boundary(before) && is_boundary(after) {
            found.push(TermPosition {
                term: term.to_string(),
                start: m.start(),
                end: m.end(),
            });
        }
        // Step one character so overlapping candidates are still tried.
        from = m.start() + content[m.start()..].chars().next().map_or(1, char::len_utf8);
        if from > content.len() {
            break;
        }
    }
    found
}

/// Finds the whole-word occurrences of all `terms`, sorted by start offset.
pub fn bucket_occurrences(content: &str, terms: &[String]) -> Vec<TermPosition> {
    let mut found: Vec<TermPosition> = terms
        .iter()
        .flat_map(|term| term_occurrences(content, term))
        .collect();
    found.sort_by_key(|p| (p.start, p.end));
    found
}

/// Keeps the occurrences that lie fully inside one of `spans`.
pub fn within_spans(occurrences: Vec<TermPosition>, spans: &[Position]) -> Vec<TermPosition> {
    occurrences
        .into_iter()
        .filter(|p| spans.iter().any(|s| p.start >= s.start && p.end <= s.end))
        .collect()
}

/// Keeps, for each start offset, only the occurrence(s) with the greatest end offset.
///
/// The result is sorted by start offset.
pub fn longest_per_start(occurrences: Vec<TermPosition>) -> Vec<TermPosition> {
    let mut by_start: BTreeMap<usize, Vec<TermPosition>> = BTreeMap::new();
    for occurrence in occurrences {
        match by_start.entry(occurrence.start) {
            Entry::Vacant(slot) => {
                slot.insert(vec![occurrence]);
            }
            Entry::Occupied(mut slot) => {
                let longest = slot.get_mut();
                let current_end = longest.first().map_or(0, |p| p.end);
                if occurrence.end > current_end {
                    *longest = vec![occurrence];
                } else if occurrence.end == current_end {
                    longest.push(occurrence);
                }
            }
        }
    }
    by_start.into_values().flatten().collect()
}

/// Removes punctuation (with surrounding whitespace) from both ends of `text`, repeatedly,
/// then trims it.
pub fn strip_boundary_punctuation(text: &str) -> String {
    let mut current = text.to_string();
    while BOUNDARY_PUNCTUATION.is_match(&current) {
        current = BOUNDARY_PUNCTUATION.replace(&current, "").into_owned();
    }
    current.trim().to_string()
}

/// Converts a byte offset in `content` to UTF-16 code units.
pub fn utf16_offset(content: &str, byte_offset: usize) -> usize {
    let end = byte_offset.min(content.len());
    content
        .get(..end)
        .map_or(0, |prefix| prefix.encode_utf16().count())
}
