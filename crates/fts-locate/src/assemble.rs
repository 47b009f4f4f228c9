//! Turns term buckets and highlighted spans into located phrase occurrences.
//!
//! The engine only tells us *that* the document matched and which terms did it. The
//! occurrences themselves are recovered from the content: every whole-word occurrence of
//! the first bucket's terms opens a candidate, which is closed by an occurrence of the
//! second-to-last bucket (two buckets) or the last bucket (three or more), searched left
//! to right with cursors so that emitted occurrences never overlap.

use fts_explain::TermBuckets;

use crate::{
    interval::{bucket_occurrences, longest_per_start, within_spans},
    types::{FoundEntity, PhraseRole, Position, TermPosition},
};

/// What was searched in one attempt.
#[derive(Debug, Clone, Copy)]
pub struct Attempt<'a> {
    /// The lowercase phrase.
    pub search_text: &'a str,
    /// The words searched in this attempt.
    pub search_words: &'a [String],
    /// Number of words in the whole phrase.
    pub phrase_word_count: usize,
    /// Role of the phrase.
    pub role: PhraseRole,
}

impl Attempt<'_> {
    /// Share of the phrase's words searched in this attempt.
    fn accuracy(&self) -> f64 {
        if self.phrase_word_count == 0 {
            return 0.0;
        }
        self.search_words.len() as f64 / self.phrase_word_count as f64
    }

    /// Builds the entity covering `start..end` of `content`.
    fn entity(&self, content: &str, start: usize, end: usize) -> FoundEntity {
        FoundEntity {
            search_text: self.search_text.to_string(),
            search_words: self.search_words.to_vec(),
            found_text: content[start..end].to_string(),
            start_offset: start,
            end_offset: end,
            accuracy: self.accuracy(),
            role: self.role,
        }
    }
}

/// Occurrences of a bucket's terms inside highlighted spans, longest per start.
fn highlighted_occurrences(
    content: &str,
    terms: &[String],
    spans: &[Position],
) -> Vec<TermPosition> {
    longest_per_start(within_spans(bucket_occurrences(content, terms), spans))
}

/// Locates the phrase occurrences described by `buckets` in `content`.
///
/// `spans` are the highlighted ranges of the hit, in content offsets.
pub fn assemble(
    content: &str,
    buckets: &TermBuckets,
    spans: &[Position],
    attempt: &Attempt<'_>,
) -> Vec<FoundEntity> {
    let Some(first) = buckets.get(0) else {
        return Vec::new();
    };
    let count = buckets.len();

    if count == 1 {
        return bucket_occurrences(content, first)
            .into_iter()
            .map(|p| attempt.entity(content, p.start, p.end))
            .collect();
    }

    let starts = highlighted_occurrences(content, first, spans);
    let next = buckets
        .get(count - 1)
        .map(|terms| highlighted_occurrences(content, terms, spans))
        .unwrap_or_default();
    let previous = if count == 2 {
        next.clone()
    } else {
        buckets
            .get(count - 2)
            .map(|terms| highlighted_occurrences(content, terms, spans))
            .unwrap_or_default()
    };

    pair(content, &starts, &previous, &next, count == 2, attempt)
}

/// Greedily pairs start occurrences with their closing occurrences.
fn pair(
    content: &str,
    starts: &[TermPosition],
    previous: &[TermPosition],
    next: &[TermPosition],
    two_buckets: bool,
    attempt: &Attempt<'_>,
) -> Vec<FoundEntity> {
    let mut found = Vec::new();
    let (mut s, mut p, mut n) = (0, 0, 0);

    while let Some(begin) = starts.get(s) {
        s += 1;

        while previous.get(p).is_some_and(|c| c.start <= begin.end) {
            p += 1;
        }
        let Some(before_last) = previous.get(p) else {
            break;
        };
        p += 1;

        let close = if two_buckets {
            before_last
        } else {
            while next.get(n).is_some_and(|c| c.start <= before_last.end) {
                n += 1;
            }
            let Some(last) = next.get(n) else {
                break;
            };
            n += 1;
            last
        };

        found.push(attempt.entity(content, begin.start, close.end));
        while starts.get(s).is_some_and(|c| c.start <= close.end) {
            s += 1;
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::highlighted_spans;

    fn buckets(words: &[&[&str]]) -> TermBuckets {
        TermBuckets::new(
            words
                .iter()
                .map(|b| b.iter().map(|t| t.to_string()).collect())
                .collect(),
        )
    }

    fn run(
        content_marked: &str,
        terms: &[&[&str]],
        searched: &[&str],
        phrase_words: usize,
    ) -> Vec<FoundEntity> {
        let spans = highlighted_spans(content_marked, "<em>", "</em>");
        let content = content_marked.replace("<em>", "").replace("</em>", "");
        let search_words: Vec<String> = searched.iter().map(|w| w.to_string()).collect();
        let attempt = Attempt {
            search_text: "phrase",
            search_words: &search_words,
            phrase_word_count: phrase_words,
            role: PhraseRole::Plain,
        };
        assemble(&content, &buckets(terms), &spans, &attempt)
    }

    fn texts(found: &[FoundEntity]) -> Vec<&str> {
        found.iter().map(|f| f.found_text.as_str()).collect()
    }

    #[test]
    fn single_bucket_finds_every_occurrence() {
        let found = run("Meet here, <em>meet</em> there", &[&["meet"]], &["meet"], 1);
        assert_eq!(texts(&found), vec!["Meet", "meet"]);
        assert_eq!(found[0].start_offset, 0);
        assert!((found[0].accuracy - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn two_buckets_pair_start_with_following_term() {
        let found = run(
            "so <em>nice</em> to <em>meet</em> you",
            &[&["nice"], &["meet"]],
            &["nice", "meet"],
            3,
        );
        assert_eq!(texts(&found), vec!["nice to meet"]);
        assert!((found[0].accuracy - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn two_buckets_repeated_occurrences() {
        let found = run(
            "<em>good</em> <em>morning</em> and <em>good</em> <em>morning</em>",
            &[&["good"], &["morning"]],
            &["good", "morning"],
            2,
        );
        assert_eq!(texts(&found), vec!["good morning", "good morning"]);
        assert_eq!(found[1].start_offset, 17);
    }

    #[test]
    fn three_buckets_span_to_last_term() {
        let found = run(
            "x <em>nice</em> <em>to</em> <em>meet</em> y",
            &[&["nice"], &["to"], &["meet"]],
            &["nice", "to", "meet"],
            3,
        );
        assert_eq!(texts(&found), vec!["nice to meet"]);
        assert_eq!((found[0].start_offset, found[0].end_offset), (2, 14));
    }

    #[test]
    fn fuzzy_variants_match_content_spelling() {
        let found = run(
            "<em>Nice</em> to <em>meat</em> you",
            &[&["nice"], &["meat", "meet"]],
            &["nice", "meet"],
            2,
        );
        assert_eq!(texts(&found), vec!["Nice to meat"]);
    }

    #[test]
    fn occurrences_outside_highlights_are_ignored() {
        let found = run(
            "nice day. <em>nice</em> to <em>meet</em>",
            &[&["nice"], &["meet"]],
            &["nice", "meet"],
            2,
        );
        assert_eq!(texts(&found), vec!["nice to meet"]);
        assert_eq!(found[0].start_offset, 10);
    }

    #[test]
    fn no_closing_term_means_nothing_found() {
        let found = run(
            "<em>nice</em> to you",
            &[&["nice"], &["meet"]],
            &["nice", "meet"],
            2,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn empty_buckets_find_nothing() {
        assert!(run("nice", &[], &[], 1).is_empty());
    }

    #[test]
    fn emitted_occurrences_do_not_overlap() {
        let found = run(
            "<em>a1</em> <em>a1</em> <em>b2</em> <em>c3</em> <em>a1</em> <em>b2</em> <em>c3</em>",
            &[&["a1"], &["b2"], &["c3"]],
            &["a1", "b2", "c3"],
            3,
        );
        assert_eq!(texts(&found), vec!["a1 a1 b2 c3", "a1 b2 c3"]);
        assert!(found[0].end_offset < found[1].start_offset);
    }
}
