//! The engine collaborator interface.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{error::EngineError, query::SpanSearch};

/// The top hit of a span search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Relevance explanation of the matched span clause.
    pub explanation: String,
    /// The whole content field with every matched term wrapped in highlight markers.
    pub highlighted: String,
}

/// Term vector data for one document: each term with the start offsets of its tokens.
///
/// Offsets are in UTF-16 code units, the unit engines built on Lucene report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermVectors {
    /// Term to token start offsets.
    pub terms: BTreeMap<String, Vec<usize>>,
}

impl TermVectors {
    /// Returns the terms having a token that starts at `offset`.
    pub fn terms_starting_at(&self, offset: usize) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .filter(move |(_, offsets)| offsets.contains(&offset))
            .map(|(term, _)| term.as_str())
    }
}

/// An indexed-search service usable as a fuzzy positional matcher.
///
/// Every operation is scoped to a collection (an index in Elasticsearch terms).
/// Documents must be searchable as soon as [`SearchEngine::index`] returns.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Indexes `content` as a new document and returns its identifier.
    async fn index(&self, collection: &str, content: &str) -> Result<String, EngineError>;

    /// Runs a span search; returns the top hit, if any.
    async fn search(
        &self,
        collection: &str,
        search: &SpanSearch,
    ) -> Result<Option<SearchHit>, EngineError>;

    /// Fetches the term vectors of a document's content field.
    async fn term_vectors(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<TermVectors, EngineError>;

    /// Deletes a document.
    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), EngineError>;
}

#[async_trait]
impl<E: SearchEngine + ?Sized> SearchEngine for Box<E> {
    async fn index(&self, collection: &str, content: &str) -> Result<String, EngineError> {
        (**self).index(collection, content).await
    }

    async fn search(
        &self,
        collection: &str,
        search: &SpanSearch,
    ) -> Result<Option<SearchHit>, EngineError> {
        (**self).search(collection, search).await
    }

    async fn term_vectors(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<TermVectors, EngineError> {
        (**self).term_vectors(collection, document_id).await
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), EngineError> {
        (**self).delete(collection, document_id).await
    }
}
