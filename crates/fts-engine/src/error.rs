//! Error types for the fts-engine crate.

use thiserror::Error;

/// Errors that can occur while talking to a search engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("engine request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The engine answered with a non-success status.
    #[error("engine returned {status} for {operation}: {body}")]
    Status {
        /// Operation that failed (index, search, term vectors, delete).
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The engine answered, but the response did not have the expected shape.
    #[error("unexpected engine response for {operation}: {message}")]
    Response {
        /// Operation whose response was malformed.
        operation: &'static str,
        /// What was missing or wrong.
        message: String,
    },

    /// The referenced document does not exist in the collection.
    #[error("document {id} not found in collection {collection}")]
    DocumentNotFound {
        /// Collection name.
        collection: String,
        /// Document identifier.
        id: String,
    },
}

impl EngineError {
    /// Creates a `Response` error.
    pub(crate) fn response(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Response {
            operation,
            message: message.into(),
        }
    }
}
