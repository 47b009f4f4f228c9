//! An in-process search engine.
//!
//! [`MemoryEngine`] keeps analyzed documents in memory and answers span searches with the
//! same explanation and highlight formats a Lucene-based engine produces, so the locator
//! can run without a network service.

mod analysis;
mod span;

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use self::analysis::{Token, analyze};
use crate::{
    engine::{SearchEngine, SearchHit, TermVectors},
    error::EngineError,
    query::SpanSearch,
};

/// An indexed document.
#[derive(Debug)]
struct Document {
    /// Original content.
    content: String,
    /// Analyzed tokens, synonyms included.
    tokens: Vec<Token>,
}

/// A [`SearchEngine`] that keeps documents in memory.
///
/// Documents are tokenized into lowercase Unicode words. Synonym groups configured with
/// [`MemoryEngine::with_synonyms`] are applied at index time: every word of a group is
/// indexed alongside each of the others, at the same position and offsets.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    /// Word to the extra terms indexed with it.
    synonyms: HashMap<String, Vec<String>>,
    /// Collection name to its documents by id.
    collections: RwLock<HashMap<String, HashMap<String, Document>>>,
}

impl MemoryEngine {
    /// Creates an empty engine without synonyms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group of equivalent words.
    pub fn with_synonyms<I, S>(mut self, group: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = group
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        for word in &words {
            let entry = self.synonyms.entry(word.clone()).or_default();
            for other in &words {
                if other != word && !entry.contains(other) {
                    entry.push(other.clone());
                }
            }
        }
        self
    }

    /// Returns the number of documents stored in `collection`.
    pub fn document_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl SearchEngine for MemoryEngine {
    async fn index(&self, collection: &str, content: &str) -> Result<String, EngineError> {
        let id = Uuid::new_v4().to_string();
        let document = Document {
            content: content.to_string(),
            tokens: analyze(content, &self.synonyms),
        };
        debug!(collection, %id, tokens = document.tokens.len(), "indexed document");
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);
        Ok(id)
    }

    async fn search(
        &self,
        collection: &str,
        search: &SpanSearch,
    ) -> Result<Option<SearchHit>, EngineError> {
        let collections = self.collections.read();
        let Some(document) = collections
            .get(collection)
            .and_then(|documents| documents.get(&search.document_id))
        else {
            return Ok(None);
        };

        Ok(
            span::search(&document.content, &document.tokens, search).map(|found| SearchHit {
                explanation: found.explanation,
                highlighted: found.highlighted,
            }),
        )
    }

    async fn term_vectors(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<TermVectors, EngineError> {
        let collections = self.collections.read();
        let document = collections
            .get(collection)
            .and_then(|documents| documents.get(document_id))
            .ok_or_else(|| EngineError::DocumentNotFound {
                collection: collection.to_string(),
                id: document_id.to_string(),
            })?;

        let mut terms: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for token in &document.tokens {
            terms
                .entry(token.term.clone())
                .or_default()
                .push(token.utf16_start);
        }
        Ok(TermVectors { terms })
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), EngineError> {
        let removed = self
            .collections
            .write()
            .get_mut(collection)
            .and_then(|documents| documents.remove(document_id));
        match removed {
            Some(_) => Ok(()),
            None => Err(EngineError::DocumentNotFound {
                collection: collection.to_string(),
                id: document_id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SpanClause;

    #[tokio::test]
    async fn index_search_delete() {
        let engine = MemoryEngine::new();
        let id = engine.index("c", "Nice to meet you").await.unwrap();
        assert_eq!(engine.document_count("c"), 1);

        let search = SpanSearch::new(&id, vec![SpanClause::term("nice")], 0);
        let hit = engine.search("c", &search).await.unwrap().unwrap();
        assert_eq!(hit.highlighted, "<em>Nice</em> to meet you");

        engine.delete("c", &id).await.unwrap();
        assert_eq!(engine.document_count("c"), 0);
        assert!(engine.search("c", &search).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_is_scoped_to_document() {
        let engine = MemoryEngine::new();
        let first = engine.index("c", "alpha beta").await.unwrap();
        let _second = engine.index("c", "gamma delta").await.unwrap();

        let search = SpanSearch::new(&first, vec![SpanClause::term("gamma")], 0);
        assert!(engine.search("c", &search).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_missing_document_fails() {
        let engine = MemoryEngine::new();
        let err = engine.delete("c", "nope").await.unwrap_err();
        assert!(matches!(err, EngineError::DocumentNotFound { .. }));
    }

    #[tokio::test]
    async fn synonyms_match_and_show_in_term_vectors() {
        let engine = MemoryEngine::new().with_synonyms(["beautiful", "cute"]);
        let id = engine.index("c", "A cute ocean").await.unwrap();

        let search = SpanSearch::new(
            &id,
            vec![SpanClause::term("beautiful"), SpanClause::term("ocean")],
            0,
        );
        let hit = engine.search("c", &search).await.unwrap().unwrap();
        assert_eq!(hit.highlighted, "A <em>cute</em> <em>ocean</em>");
        assert!(hit.explanation.contains("content:beautiful"));

        let vectors = engine.term_vectors("c", &id).await.unwrap();
        assert_eq!(vectors.terms["cute"], vec![2]);
        assert_eq!(vectors.terms["beautiful"], vec![2]);
    }

    #[tokio::test]
    async fn term_vectors_use_utf16_offsets() {
        let engine = MemoryEngine::new();
        let id = engine.index("c", "😀 word").await.unwrap();
        let vectors = engine.term_vectors("c", &id).await.unwrap();
        assert_eq!(vectors.terms["word"], vec![3]);
    }
}
