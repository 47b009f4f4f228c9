//! Builds the span search for one attempt.

use fts_engine::{FuzzyTerm, SpanClause, SpanSearch};

use crate::options::SearchOptions;

/// Tolerance applied before rounding the slop up, so products such as `5 * 1.2` that land a
/// hair above an integer do not gain an extra position.
const SLOP_EPSILON: f64 = 1e-9;

/// Maximum number of intervening positions for a span over `word_count` words.
pub fn slop(word_count: usize, max_distance_between_words: f64) -> usize {
    let gaps = word_count.saturating_sub(1) as f64;
    let raw = gaps * max_distance_between_words;
    let rounded = (raw - SLOP_EPSILON).ceil();
    if rounded <= 0.0 { 0 } else { rounded as usize }
}

/// Builds an ordered span-near search over `words` in the given document.
///
/// Words longer than `fuzzy_min_symbols` characters become fuzzy clauses; shorter ones are
/// matched literally.
pub fn build_span_search(
    document_id: &str,
    words: &[String],
    options: &SearchOptions,
) -> SpanSearch {
    let clauses = words
        .iter()
        .map(|word| {
            if word.chars().count() > options.fuzzy_min_symbols {
                SpanClause::Fuzzy(FuzzyTerm {
                    value: word.clone(),
                    fuzziness: options.fuzziness,
                    prefix_length: options.fuzzy_prefix_length,
                    max_expansions: options.fuzzy_max_expansions,
                    transpositions: true,
                })
            } else {
                SpanClause::term(word.as_str())
            }
        })
        .collect();

    SpanSearch::new(
        document_id,
        clauses,
        slop(words.len(), options.max_distance_between_words),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn slop_rounds_up_with_tolerance() {
        assert_eq!(slop(1, 1.2), 0);
        assert_eq!(slop(2, 1.2), 2);
        assert_eq!(slop(3, 1.2), 3);
        assert_eq!(slop(6, 1.2), 6);
        assert_eq!(slop(4, 1.0), 3);
        assert_eq!(slop(4, 0.0), 0);
        assert_eq!(slop(0, 1.2), 0);
    }

    #[test]
    fn short_words_are_literal() {
        let search = build_span_search("doc", &words("to meet you"), &SearchOptions::default());
        assert_eq!(search.document_id, "doc");
        assert_eq!(search.clauses[0], SpanClause::term("to"));
        assert!(matches!(
            &search.clauses[1],
            SpanClause::Fuzzy(f) if f.value == "meet" && f.transpositions
        ));
        assert_eq!(search.clauses[2], SpanClause::term("you"));
        assert_eq!(search.slop, 3);
    }

    #[test]
    fn fuzzy_threshold_counts_characters() {
        let options = SearchOptions {
            fuzzy_min_symbols: 4,
            ..SearchOptions::default()
        };
        let search = build_span_search("doc", &words("meet straße"), &options);
        assert!(matches!(search.clauses[0], SpanClause::Term(_)));
        assert!(matches!(search.clauses[1], SpanClause::Fuzzy(_)));
    }
}
