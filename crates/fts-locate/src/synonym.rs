//! Credits highlighted synonyms to the bucket of the term they stand for.
//!
//! A synonym filter makes the engine match and highlight a word the explanation never
//! mentions. The word's term-vector entry shares its start offset with the canonical term,
//! which does appear in a bucket; the highlighted spelling is added to that bucket.

use fts_engine::SearchEngine;
use fts_explain::TermBuckets;
use tracing::{debug, info};

use crate::{error::LocateError, interval::utf16_offset, types::Position};

/// Adds highlighted words missing from every bucket to the bucket of the term indexed at
/// the same offset.
///
/// Term vectors are fetched at most once, and only when some highlighted span is missing
/// from every bucket.
pub async fn backfill<E: SearchEngine + ?Sized>(
    engine: &E,
    collection: &str,
    document_id: &str,
    content: &str,
    spans: &[Position],
    buckets: &mut TermBuckets,
) -> Result<(), LocateError> {
    let missing: Vec<(&Position, String)> = spans
        .iter()
        .map(|span| (span, span.text.to_lowercase()))
        .filter(|(_, text)| !buckets.contains_term(text))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    let vectors = engine.term_vectors(collection, document_id).await?;
    for (span, text) in missing {
        info!(%text, "highlighted text is not a searched term, it can be a synonym");
        let offset = utf16_offset(content, span.start);
        for term in vectors.terms_starting_at(offset).filter(|term| *term != text) {
            if buckets.add_variant(term, &text) > 0 {
                debug!(%text, synonym_of = %term, "added synonym to bucket");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use fts_engine::{MemoryEngine, SpanClause, SpanSearch};

    use super::*;
    use crate::interval::highlighted_spans;

    async fn spans_for(engine: &MemoryEngine, id: &str, words: &[&str]) -> Vec<Position> {
        let clauses = words.iter().map(|w| SpanClause::term(*w)).collect();
        let hit = engine
            .search("c", &SpanSearch::new(id, clauses, 0))
            .await
            .unwrap()
            .unwrap();
        highlighted_spans(&hit.highlighted, "<em>", "</em>")
    }

    #[tokio::test]
    async fn synonym_is_added_to_canonical_bucket() {
        let engine = MemoryEngine::new().with_synonyms(["beautiful", "cute"]);
        let content = "Such a Cute ocean";
        let id = engine.index("c", content).await.unwrap();
        let spans = spans_for(&engine, &id, &["beautiful", "ocean"]).await;

        let mut buckets = TermBuckets::new(vec![vec!["beautiful".into()], vec!["ocean".into()]]);
        backfill(&engine, "c", &id, content, &spans, &mut buckets)
            .await
            .unwrap();

        assert_eq!(buckets.get(0).unwrap(), ["beautiful", "cute"]);
        assert_eq!(buckets.get(1).unwrap(), ["ocean"]);
    }

    #[tokio::test]
    async fn synonym_offsets_survive_multibyte_prefix() {
        let engine = MemoryEngine::new().with_synonyms(["beautiful", "cute"]);
        let content = "😀 naïve cute ocean";
        let id = engine.index("c", content).await.unwrap();
        let spans = spans_for(&engine, &id, &["beautiful", "ocean"]).await;

        let mut buckets = TermBuckets::new(vec![vec!["beautiful".into()], vec!["ocean".into()]]);
        backfill(&engine, "c", &id, content, &spans, &mut buckets)
            .await
            .unwrap();

        assert!(buckets.get(0).unwrap().contains(&"cute".to_string()));
    }

    #[tokio::test]
    async fn known_terms_skip_term_vectors() {
        let engine = MemoryEngine::new();
        let content = "nice to meet you";
        let id = engine.index("c", content).await.unwrap();
        let spans = spans_for(&engine, &id, &["meet", "you"]).await;
        engine.delete("c", &id).await.unwrap();

        // The document is gone, so any term vector request would fail.
        let mut buckets = TermBuckets::new(vec![vec!["meet".into()], vec!["you".into()]]);
        backfill(&engine, "c", &id, content, &spans, &mut buckets)
            .await
            .unwrap();
        assert_eq!(buckets.len(), 2);
    }
}
