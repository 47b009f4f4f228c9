//! An instrumented engine shared by the strategy and locator unit tests.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use fts_engine::{EngineError, MemoryEngine, SearchEngine, SearchHit, SpanSearch, TermVectors};

/// A failure injected into searches that include a trigger word.
#[derive(Debug, Clone)]
pub enum Fault {
    /// The search fails with a 500 status.
    SearchFails(&'static str),
    /// The search answers with an explanation the parser rejects.
    GarbledExplanation(&'static str),
}

/// Wraps a memory engine, recording searches and deletes and injecting failures.
pub struct Recording {
    /// Engine doing the real work.
    pub inner: MemoryEngine,
    /// Words of every search, in call order.
    searches: Mutex<Vec<Vec<String>>>,
    /// Number of delete calls.
    deletes: AtomicUsize,
    /// Whether deletes report failure (after counting).
    fail_delete: bool,
    /// Failure injected into matching searches.
    fault: Option<Fault>,
}

impl Recording {
    /// Creates an engine whose deletes fail when `fail_delete` is set.
    pub fn new(fail_delete: bool) -> Self {
        Self {
            inner: MemoryEngine::new(),
            searches: Mutex::new(Vec::new()),
            deletes: AtomicUsize::new(0),
            fail_delete,
            fault: None,
        }
    }

    /// Injects `fault` into searches containing its trigger word.
    pub fn with_fault(mut self, fault: Fault) -> Self {
        self.fault = Some(fault);
        self
    }

    /// Words of every search so far.
    pub fn searched(&self) -> Vec<Vec<String>> {
        self.searches.lock().unwrap().clone()
    }

    /// Number of delete calls so far.
    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchEngine for Recording {
    async fn index(&self, collection: &str, content: &str) -> Result<String, EngineError> {
        self.inner.index(collection, content).await
    }

    async fn search(
        &self,
        collection: &str,
        search: &SpanSearch,
    ) -> Result<Option<SearchHit>, EngineError> {
        let words: Vec<String> = search.words().into_iter().map(str::to_string).collect();
        self.searches.lock().unwrap().push(words.clone());

        let triggered = |word: &str| words.iter().any(|w| w == word);
        match &self.fault {
            Some(Fault::SearchFails(word)) if triggered(*word) => Err(EngineError::Status {
                operation: "search",
                status: 500,
                body: "boom".to_string(),
            }),
            Some(Fault::GarbledExplanation(word)) if triggered(*word) => Ok(Some(SearchHit {
                explanation: "sum of: weird".to_string(),
                highlighted: format!("<em>{word}</em>"),
            })),
            _ => self.inner.search(collection, search).await,
        }
    }

    async fn term_vectors(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<TermVectors, EngineError> {
        self.inner.term_vectors(collection, document_id).await
    }

    async fn delete(&self, collection: &str, document_id: &str) -> Result<(), EngineError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete {
            return Err(EngineError::DocumentNotFound {
                collection: collection.to_string(),
                id: document_id.to_string(),
            });
        }
        self.inner.delete(collection, document_id).await
    }
}
