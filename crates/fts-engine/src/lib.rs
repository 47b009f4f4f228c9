//! Search engine collaborators for fts.
//!
//! The phrase locator never matches text itself. It indexes the content as a scratch
//! document in an external engine, runs ordered fuzzy span queries against it, and reads
//! back the score explanation, the highlighted field and, occasionally, term vectors.
//! This crate defines that boundary:
//!
//! - [`SearchEngine`]: the four operations the locator needs
//! - [`SpanSearch`]: a typed span-near query with literal and fuzzy clauses
//! - [`ElasticsearchEngine`]: the engine over its HTTP API
//! - [`MemoryEngine`]: an in-process engine with the same observable behaviour, used for
//!   offline runs and tests
//!
//! # Example
//!
//! ```
//! use fts_engine::{MemoryEngine, SearchEngine, SpanClause, SpanSearch};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = MemoryEngine::new();
//! let id = engine.index("scratch", "nice to meet you").await.unwrap();
//! let search = SpanSearch::new(&id, vec![SpanClause::term("meet"), SpanClause::term("you")], 0);
//! let hit = engine.search("scratch", &search).await.unwrap().unwrap();
//! assert_eq!(hit.highlighted, "nice to <em>meet</em> <em>you</em>");
//! # }
//! ```

#![warn(missing_docs)]

mod elasticsearch;
mod engine;
mod error;
mod memory;
mod query;

pub use elasticsearch::{ElasticsearchEngine, ElasticsearchOptions};
pub use engine::{SearchEngine, SearchHit, TermVectors};
pub use error::EngineError;
pub use memory::MemoryEngine;
pub use query::{
    CONTENT_FIELD, DEFAULT_FRAGMENT_SIZE, Fuzziness, FuzzyTerm, Highlight, SpanClause, SpanSearch,
};
