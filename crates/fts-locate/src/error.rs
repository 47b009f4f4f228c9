//! Error types for the fts-locate crate.

use fts_engine::EngineError;
use fts_explain::ExplainError;
use thiserror::Error;

/// Errors that can occur while locating phrases.
#[derive(Debug, Error)]
pub enum LocateError {
    /// Search options are out of range. Raised before any engine call.
    #[error("invalid search options: {0}")]
    Config(String),

    /// The engine failed to index, search, or report term vectors.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The engine returned an explanation the parser does not recognize.
    #[error("engine explanation: {0}")]
    Explain(#[from] ExplainError),
}
