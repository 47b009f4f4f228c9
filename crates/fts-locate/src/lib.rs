//! Fuzzy phrase location and marker-based extraction.
//!
//! A [`Locator`] finds where phrases occur in a block of free text, tolerating
//! misspellings, filler words between the phrase's words, and phrases that only partly
//! occur. Matching itself is delegated to a [`SearchEngine`](fts_engine::SearchEngine):
//! the text is indexed as a scratch document, searched with ordered fuzzy span queries,
//! and the engine's explanation and highlighting are turned back into exact offsets.
//!
//! Each hit carries an accuracy: the share of the phrase's words that were searched in
//! the attempt that found it. With a minimum score below 100, long phrases are retried
//! with smaller subsets of their words until the minimum is reached.
//!
//! [`Locator::extract_text`] uses two phrase sets as markers and returns the text between
//! each pre-marker and the post-marker following it.
//!
//! # Example
//!
//! ```
//! use fts_engine::MemoryEngine;
//! use fts_locate::{Locator, SearchOptions};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let locator = Locator::new(MemoryEngine::new(), "scratch", SearchOptions::default()).unwrap();
//! let extracted = locator
//!     .extract_text(
//!         "Dear team. The meeting moved to Friday. Best regards",
//!         &["dear team".to_string()],
//!         &["best regards".to_string()],
//!     )
//!     .await
//!     .unwrap();
//! assert_eq!(extracted.extracted_text.as_deref(), Some("The meeting moved to Friday"));
//! # }
//! ```

#![warn(missing_docs)]

mod assemble;
mod combination;
mod error;
mod interval;
mod locator;
mod options;
mod query;
mod strategy;
mod synonym;
#[cfg(test)]
mod test_support;
mod types;

pub use assemble::{Attempt, assemble};
pub use combination::{binomial, combinations};
pub use error::LocateError;
pub use interval::{
    bucket_occurrences, highlighted_spans, longest_per_start, strip_boundary_punctuation,
    term_occurrences, utf16_offset, within_spans,
};
pub use locator::{
    DEFAULT_COLLECTION, Locator, collapse_overlaps, extract_segments, join_segments,
};
pub use options::{
    DEFAULT_FUZZY_MAX_EXPANSIONS, DEFAULT_FUZZY_MIN_SYMBOLS, DEFAULT_FUZZY_PREFIX_LENGTH,
    DEFAULT_JOIN_DELIMITER, DEFAULT_MAX_DISTANCE_BETWEEN_WORDS, DEFAULT_MIN_SCORE, SearchOptions,
};
pub use query::{build_span_search, slop};
pub use strategy::{min_words, search_phrase};
pub use synonym::backfill;
pub use types::{ExtractedText, FoundEntity, Phrase, PhraseRole, Position, TermPosition};
