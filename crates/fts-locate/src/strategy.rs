//! Per-phrase search strategy.
//!
//! A phrase is searched against a scratch copy of the content. Short phrases, and phrases
//! that must match completely, are searched once with all their words. Longer phrases are
//! searched with ever smaller order-preserving subsets of their words, down to the number
//! of words the minimum score requires.

use fts_engine::SearchEngine;
use tracing::{debug, warn};

use crate::{
    assemble::{Attempt, assemble},
    combination::{binomial, combinations},
    error::LocateError,
    interval::highlighted_spans,
    options::SearchOptions,
    query::build_span_search,
    synonym::backfill,
    types::{FoundEntity, Phrase, PhraseRole},
};

/// Phrases with at most this many words are always searched whole.
const ALWAYS_WHOLE_WORD_COUNT: usize = 3;

/// Minimum number of words an attempt must search, `ceil(word_count * min_score / 100)`.
pub fn min_words(word_count: usize, min_score: u8) -> usize {
    (word_count * usize::from(min_score)).div_ceil(100)
}

/// Searches one phrase in `content`.
///
/// The content is indexed as a scratch document which is deleted again on every exit path;
/// a failed delete is logged and otherwise ignored.
pub async fn search_phrase<E: SearchEngine + ?Sized>(
    engine: &E,
    collection: &str,
    options: &SearchOptions,
    content: &str,
    phrase: &Phrase,
) -> Result<Vec<FoundEntity>, LocateError> {
    options.validate()?;

    let search_text = phrase.value.to_lowercase();
    let words: Vec<String> = search_text.split_whitespace().map(str::to_string).collect();
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let document_id = engine.index(collection, content).await?;
    let search = PhraseSearch {
        engine,
        collection,
        options,
        content,
        document_id: &document_id,
        search_text: &search_text,
        phrase_word_count: words.len(),
        role: phrase.role,
    };
    let result = search.run(&words).await;

    debug!(%document_id, "deleting scratch document");
    if let Err(e) = engine.delete(collection, &document_id).await {
        warn!(%document_id, error = %e, "failed to delete scratch document");
    }

    result
}

/// State shared by the attempts of one phrase search.
struct PhraseSearch<'a, E: ?Sized> {
    /// Engine holding the scratch document.
    engine: &'a E,
    /// Collection of the scratch document.
    collection: &'a str,
    /// Resolved search options.
    options: &'a SearchOptions,
    /// The content being searched.
    content: &'a str,
    /// Scratch document id.
    document_id: &'a str,
    /// Lowercased phrase.
    search_text: &'a str,
    /// Number of words in the phrase.
    phrase_word_count: usize,
    /// Role of the phrase.
    role: PhraseRole,
}

impl<E: SearchEngine + ?Sized> PhraseSearch<'_, E> {
    /// Runs every attempt the options call for.
    async fn run(&self, words: &[String]) -> Result<Vec<FoundEntity>, LocateError> {
        let count = words.len();
        if count <= ALWAYS_WHOLE_WORD_COUNT || self.options.min_score == 100 {
            debug!(document_id = self.document_id, count, "searching all words");
            return self.attempt(words).await;
        }

        let minimum = min_words(count, self.options.min_score);
        debug!(
            document_id = self.document_id,
            count,
            min_score = self.options.min_score,
            minimum,
            "search plan"
        );
        if minimum >= count {
            return self.attempt(words).await;
        }

        let mut results = Vec::new();
        for k in (minimum..=count).rev() {
            let subsets = if k == count {
                vec![words.to_vec()]
            } else {
                combinations(words, k)
            };
            debug!(
                document_id = self.document_id,
                k,
                attempts = ?binomial(count, k),
                "searching word subsets"
            );

            for subset in subsets {
                let found = self.attempt(&subset).await?;
                if found.is_empty() {
                    continue;
                }
                results.extend(found);
                if self.options.stop_at_first_best_match {
                    debug!(document_id = self.document_id, k, "stopping at first match");
                    return Ok(results);
                }
            }
        }

        debug!(
            document_id = self.document_id,
            found = results.len(),
            "search finished"
        );
        Ok(results)
    }

    /// Searches one subset of the phrase's words.
    async fn attempt(&self, words: &[String]) -> Result<Vec<FoundEntity>, LocateError> {
        let search = build_span_search(self.document_id, words, self.options);
        debug!(document_id = self.document_id, ?words, slop = search.slop, "attempt");

        let Some(hit) = self.engine.search(self.collection, &search).await? else {
            return Ok(Vec::new());
        };

        let spans = highlighted_spans(
            &hit.highlighted,
            &search.highlight.pre_tag,
            &search.highlight.post_tag,
        );
        let mut buckets = fts_explain::parse(&hit.explanation, &search.field)?;
        backfill(
            self.engine,
            self.collection,
            self.document_id,
            self.content,
            &spans,
            &mut buckets,
        )
        .await?;

        let attempt = Attempt {
            search_text: self.search_text,
            search_words: words,
            phrase_word_count: self.phrase_word_count,
            role: self.role,
        };
        Ok(assemble(self.content, &buckets, &spans, &attempt))
    }
}

#[cfg(test)]
mod tests {
    use fts_engine::EngineError;

    use super::*;
    use crate::test_support::{Fault, Recording};

    #[test]
    fn min_words_rounds_up() {
        assert_eq!(min_words(10, 60), 6);
        assert_eq!(min_words(10, 70), 7);
        assert_eq!(min_words(7, 60), 5);
        assert_eq!(min_words(4, 1), 1);
        assert_eq!(min_words(4, 100), 4);
    }

    fn plain(value: &str) -> Phrase {
        Phrase::new(value, PhraseRole::Plain)
    }

    #[tokio::test]
    async fn short_phrase_is_searched_once() {
        let engine = Recording::new(false);
        let options = SearchOptions::default();
        let found = search_phrase(&engine, "c", &options, "Nice to meet you", &plain("To Meet You"))
            .await
            .unwrap();

        assert_eq!(engine.searched(), vec![vec!["to", "meet", "you"]]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].found_text, "to meet you");
        assert_eq!(found[0].search_text, "to meet you");
        assert_eq!(engine.deletes(), 1);
        assert_eq!(engine.inner.document_count("c"), 0);
    }

    #[tokio::test]
    async fn empty_phrase_makes_no_engine_calls() {
        let engine = Recording::new(false);
        let found = search_phrase(&engine, "c", &SearchOptions::default(), "text", &plain("   "))
            .await
            .unwrap();
        assert!(found.is_empty());
        assert!(engine.searched().is_empty());
        assert_eq!(engine.deletes(), 0);
    }

    #[tokio::test]
    async fn invalid_options_fail_before_indexing() {
        let engine = Recording::new(false);
        let options = SearchOptions::default().with_min_score(0);
        let err = search_phrase(&engine, "c", &options, "text", &plain("text"))
            .await
            .unwrap_err();
        assert!(matches!(err, LocateError::Config(_)));
        assert_eq!(engine.inner.document_count("c"), 0);
    }

    #[tokio::test]
    async fn subsets_shrink_to_minimum_score() {
        let engine = Recording::new(false);
        let options = SearchOptions::default().with_min_score(75);
        // Four words at 75% need three; nothing matches, so every level is tried.
        let found = search_phrase(&engine, "c", &options, "unrelated", &plain("one two six ten"))
            .await
            .unwrap();

        assert!(found.is_empty());
        let searched = engine.searched();
        assert_eq!(searched.len(), 1 + 4);
        assert_eq!(searched[0], vec!["one", "two", "six", "ten"]);
        assert_eq!(searched[1], vec!["one", "two", "six"]);
        assert_eq!(searched[4], vec!["two", "six", "ten"]);
    }

    #[tokio::test]
    async fn stop_at_first_returns_first_success() {
        let engine = Recording::new(false);
        let options = SearchOptions::default()
            .with_min_score(50)
            .with_stop_at_first_best_match(true);
        let found = search_phrase(
            &engine,
            "c",
            &options,
            "alpha bravo charlie",
            &plain("alpha bravo charlie delta"),
        )
        .await
        .unwrap();

        assert_eq!(engine.searched().len(), 2);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].found_text, "alpha bravo charlie");
        assert!((found[0].accuracy - 0.75).abs() < 1e-9);
    }

    #[tokio::test]
    async fn all_levels_are_scanned_without_stop() {
        let engine = Recording::new(false);
        let options = SearchOptions::default().with_min_score(50);
        let found = search_phrase(
            &engine,
            "c",
            &options,
            "alpha bravo charlie",
            &plain("alpha bravo charlie delta"),
        )
        .await
        .unwrap();

        // 1 attempt with four words, 4 with three, 6 with two.
        assert_eq!(engine.searched().len(), 11);
        assert!(found.iter().any(|f| (f.accuracy - 0.75).abs() < 1e-9));
        assert!(found.iter().any(|f| (f.accuracy - 0.5).abs() < 1e-9));
    }

    #[tokio::test]
    async fn failed_delete_is_swallowed() {
        let engine = Recording::new(true);
        let found = search_phrase(
            &engine,
            "c",
            &SearchOptions::default(),
            "nice to meet you",
            &plain("meet you"),
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(engine.deletes(), 1);
    }

    #[tokio::test]
    async fn failed_search_still_deletes_scratch_document() {
        let engine = Recording::new(false).with_fault(Fault::SearchFails("meet"));
        let err = search_phrase(
            &engine,
            "c",
            &SearchOptions::default(),
            "nice to meet you",
            &plain("meet you"),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            LocateError::Engine(EngineError::Status { status: 500, .. })
        ));
        assert_eq!(engine.deletes(), 1);
        assert_eq!(engine.inner.document_count("c"), 0);
    }

    #[tokio::test]
    async fn unrecognized_explanation_deletes_and_fails() {
        let engine = Recording::new(false).with_fault(Fault::GarbledExplanation("meet"));
        let err = search_phrase(
            &engine,
            "c",
            &SearchOptions::default(),
            "nice to meet you",
            &plain("meet you"),
        )
        .await
        .unwrap_err();

        let LocateError::Explain(explain) = &err else {
            panic!("expected an explanation error, got {err:?}");
        };
        assert_eq!(explain.explanation, "sum of: weird");
        assert_eq!(engine.deletes(), 1);
        assert_eq!(engine.inner.document_count("c"), 0);
    }

    #[tokio::test]
    async fn failing_subset_aborts_remaining_attempts() {
        let engine = Recording::new(false).with_fault(Fault::SearchFails("six"));
        let options = SearchOptions::default().with_min_score(75);
        let err = search_phrase(&engine, "c", &options, "unrelated", &plain("one two six ten"))
            .await
            .unwrap_err();

        assert!(matches!(err, LocateError::Engine(_)));
        // The whole phrase contains "six", so nothing after the first attempt runs.
        assert_eq!(engine.searched().len(), 1);
        assert_eq!(engine.deletes(), 1);
        assert_eq!(engine.inner.document_count("c"), 0);
    }
}
