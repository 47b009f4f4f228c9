//! Term extraction from search engine score explanations.
//!
//! A span search against the engine returns, next to its highlighted text, a free-text
//! relevance explanation for the top hit. That text names every term that satisfied each
//! searched word, which is the only place fuzzy expansions are reported. This crate turns
//! it into [`TermBuckets`]: one bucket per searched word, each listing the literal terms
//! accepted for that word.
//!
//! Three shapes are recognized:
//!
//! - **Literal term**: `weight(content:ocean in 0) ...`
//! - **Fuzzy term**: `weight(spanOr([content:ocean, content:oceans]) in 0) ...`
//! - **Ordered span**: `weight(spanNear([content:hello, spanOr([content:beautiful,
//!   content:beaudiful]), content:ocean], 2, true) in 0) ...`
//!
//! # Example
//!
//! ```
//! use fts_explain::parse;
//!
//! let buckets = parse(
//!     "weight(spanNear([content:nice, content:to], 2, true) in 0) [PerFieldSimilarity], result of:",
//!     "content",
//! )
//! .unwrap();
//! assert_eq!(buckets.len(), 2);
//! assert!(buckets.contains_term("nice"));
//! ```

#![warn(missing_docs)]

mod buckets;
mod error;
mod lexer;
mod parser;

pub use buckets::TermBuckets;
pub use error::ExplainError;
pub use lexer::Token;
pub use parser::parse;
