//! The public entry point: find phrases, test for them, and extract text between markers.

use futures::future::join_all;
use tracing::{debug, error};

use fts_engine::SearchEngine;

use crate::{
    error::LocateError,
    interval::strip_boundary_punctuation,
    options::SearchOptions,
    strategy::search_phrase,
    types::{ExtractedText, FoundEntity, Phrase, PhraseRole},
};

/// Default collection scratch documents are indexed into.
pub const DEFAULT_COLLECTION: &str = "text-search";

/// Locates phrases in text with the help of a search engine.
///
/// Each phrase of a call is searched concurrently against its own scratch document.
#[derive(Debug)]
pub struct Locator<E> {
    /// Engine used for matching.
    engine: E,
    /// Collection scratch documents go into.
    collection: String,
    /// Validated options.
    options: SearchOptions,
}

impl<E: SearchEngine> Locator<E> {
    /// Creates a locator. Fails if `options` are out of range.
    pub fn new(
        engine: E,
        collection: impl Into<String>,
        options: SearchOptions,
    ) -> Result<Self, LocateError> {
        options.validate()?;
        Ok(Self {
            engine,
            collection: collection.into(),
            options,
        })
    }

    /// Returns the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the options.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Finds every occurrence of each phrase, in phrase order.
    pub async fn find_text(
        &self,
        content: &str,
        phrases: &[String],
    ) -> Result<Vec<FoundEntity>, LocateError> {
        let phrases: Vec<Phrase> = phrases
            .iter()
            .map(|p| Phrase::new(p.as_str(), PhraseRole::Plain))
            .collect();
        self.search_all(content, &phrases).await.inspect_err(|e| {
            error!(error = %e, "find text failed");
        })
    }

    /// Returns whether any phrase occurs in `content`.
    pub async fn does_text_exist(
        &self,
        content: &str,
        phrases: &[String],
    ) -> Result<bool, LocateError> {
        Ok(!self.find_text(content, phrases).await?.is_empty())
    }

    /// Extracts the text between pre-marker and post-marker phrase occurrences.
    pub async fn extract_text(
        &self,
        content: &str,
        pre_phrases: &[String],
        post_phrases: &[String],
    ) -> Result<ExtractedText, LocateError> {
        let phrases: Vec<Phrase> = pre_phrases
            .iter()
            .map(|p| Phrase::new(p.as_str(), PhraseRole::Pre))
            .chain(
                post_phrases
                    .iter()
                    .map(|p| Phrase::new(p.as_str(), PhraseRole::Post)),
            )
            .collect();

        let found = self.search_all(content, &phrases).await.inspect_err(|e| {
            error!(error = %e, "extract text failed");
        })?;

        let (mut pre, mut post): (Vec<FoundEntity>, Vec<FoundEntity>) = found
            .into_iter()
            .filter(|f| f.role != PhraseRole::Plain)
            .partition(|f| f.role == PhraseRole::Pre);
        pre.sort_by_key(|f| f.start_offset);
        post.sort_by_key(|f| f.start_offset);
        let pre = collapse_overlaps(pre);
        let post = collapse_overlaps(post);

        if pre.is_empty() || post.is_empty() {
            debug!(
                pre = pre.len(),
                post = post.len(),
                "markers missing, nothing to extract"
            );
            return Ok(ExtractedText {
                phrases,
                extracted_text: None,
                found_pre_phrases: Vec::new(),
                found_post_phrases: Vec::new(),
            });
        }

        let segments = extract_segments(content, &pre, &post);
        let extracted_text = join_segments(&segments, &self.options.join_delimiter);
        Ok(ExtractedText {
            phrases,
            extracted_text,
            found_pre_phrases: pre,
            found_post_phrases: post,
        })
    }

    /// Searches every phrase concurrently and concatenates the results in phrase order.
    ///
    /// All searches run to completion before the first error, in phrase order, is returned.
    async fn search_all(
        &self,
        content: &str,
        phrases: &[Phrase],
    ) -> Result<Vec<FoundEntity>, LocateError> {
        let searches = phrases.iter().map(|phrase| {
            search_phrase(&self.engine, &self.collection, &self.options, content, phrase)
        });
        let results = join_all(searches).await;

        let mut found = Vec::new();
        for result in results {
            found.extend(result?);
        }
        Ok(found)
    }
}

/// Keeps one hit per overlapping range.
///
/// `hits` must be sorted by start offset. Neighbours that share a start or an end keep the
/// more accurate hit (the earlier one on ties); a hit that contains its neighbour keeps
/// itself. Partially overlapping neighbours are both kept.
pub fn collapse_overlaps(hits: Vec<FoundEntity>) -> Vec<FoundEntity> {
    let mut kept: Vec<FoundEntity> = Vec::with_capacity(hits.len());
    for hit in hits {
        let Some(last) = kept.last() else {
            kept.push(hit);
            continue;
        };

        let same_range = last.start_offset == hit.start_offset || last.end_offset == hit.end_offset;
        let keep_last = if same_range {
            Some(last.accuracy >= hit.accuracy)
        } else if last.start_offset <= hit.start_offset && last.end_offset >= hit.end_offset {
            Some(true)
        } else if hit.start_offset <= last.start_offset && hit.end_offset >= last.end_offset {
            Some(false)
        } else {
            None
        };

        match keep_last {
            Some(true) => {}
            Some(false) => {
                kept.pop();
                kept.push(hit);
            }
            None => kept.push(hit),
        }
    }
    kept
}

/// Slides over the marker hits, pairing each pre-marker with the next post-marker after it.
///
/// Both lists must be sorted by start offset.
pub fn extract_segments(content: &str, pre: &[FoundEntity], post: &[FoundEntity]) -> Vec<String> {
    let mut segments = Vec::new();
    let (mut p, mut q) = (0, 0);

    while let Some(marker) = pre.get(p) {
        while post.get(q).is_some_and(|c| c.start_offset <= marker.end_offset) {
            q += 1;
        }
        let Some(closing) = post.get(q) else {
            debug!(start = marker.start_offset, "no post marker after pre marker");
            break;
        };

        segments.push(content[marker.end_offset..closing.start_offset].trim().to_string());
        while pre.get(p).is_some_and(|c| c.start_offset <= closing.end_offset) {
            p += 1;
        }
        q += 1;
    }

    segments
}

/// Strips boundary punctuation from each segment and joins them; `None` when there are no
/// segments.
pub fn join_segments(segments: &[String], delimiter: &str) -> Option<String> {
    if segments.is_empty() {
        return None;
    }
    let cleaned: Vec<String> = segments
        .iter()
        .map(|s| strip_boundary_punctuation(s))
        .collect();
    Some(cleaned.join(delimiter))
}
