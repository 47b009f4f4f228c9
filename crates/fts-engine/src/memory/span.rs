//! Ordered span-near matching over an analyzed document.
//!
//! Each clause is first resolved to the set of indexed terms it stands for (one term for a
//! literal clause, the Levenshtein expansions of the word for a fuzzy clause). A match is a
//! strictly increasing run of positions, one per clause, whose total gap does not exceed
//! the slop; runs start as late as possible, as in classic ordered span queries. Every token
//! at a matched position whose term belongs to the clause is highlighted.

use std::{
    collections::{BTreeSet, HashSet},
    slice,
};

use levenshtein_automata::{Distance, LevenshteinAutomatonBuilder};

use super::analysis::Token;
use crate::query::{FuzzyTerm, Highlight, SpanClause, SpanSearch};

/// A clause resolved against the document vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Resolved {
    /// A literal term.
    Term(String),
    /// Fuzzy expansions, in term order.
    Or(Vec<String>),
}

impl Resolved {
    /// Returns the indexed terms this clause matches.
    fn terms(&self) -> &[String] {
        match self {
            Self::Term(term) => slice::from_ref(term),
            Self::Or(terms) => terms,
        }
    }

    /// Renders the clause the way a span query prints itself.
    fn describe(&self, field: &str) -> String {
        match self {
            Self::Term(term) => format!("{field}:{term}"),
            Self::Or(terms) => {
                let inner: Vec<String> = terms.iter().map(|t| format!("{field}:{t}")).collect();
                format!("spanOr([{}])", inner.join(", "))
            }
        }
    }
}

/// Result of a successful span search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SpanMatch {
    /// Explanation description of the span clause.
    pub explanation: String,
    /// Content with matched tokens wrapped in highlight tags.
    pub highlighted: String,
}

/// Expands a fuzzy clause against `vocabulary`.
///
/// Candidates must share the first `prefix_length` characters with the word and lie within
/// the allowed edit distance. The closest `max_expansions` survive, returned in term order.
pub(crate) fn expand_fuzzy(fuzzy: &FuzzyTerm, vocabulary: &BTreeSet<&str>) -> Vec<String> {
    let max_edits = fuzzy.fuzziness.max_edits(fuzzy.value.chars().count());
    let builder = LevenshteinAutomatonBuilder::new(max_edits, fuzzy.transpositions);
    let dfa = builder.build_dfa(&fuzzy.value);
    let prefix: String = fuzzy.value.chars().take(fuzzy.prefix_length).collect();

    let mut candidates: Vec<(u8, &str)> = vocabulary
        .iter()
        .filter(|term| term.starts_with(prefix.as_str()))
        .filter_map(|term| match dfa.eval(term) {
            Distance::Exact(distance) => Some((distance, *term)),
            Distance::AtLeast(_) => None,
        })
        .collect();
    candidates.sort_unstable();
    candidates.truncate(fuzzy.max_expansions);

    let mut terms: Vec<String> = candidates.into_iter().map(|(_, t)| t.to_string()).collect();
    terms.sort_unstable();
    terms
}

/// Resolves every clause of `search` against the vocabulary of `tokens`.
fn resolve(search: &SpanSearch, tokens: &[Token]) -> Vec<Resolved> {
    let vocabulary: BTreeSet<&str> = tokens.iter().map(|t| t.term.as_str()).collect();
    search
        .clauses
        .iter()
        .map(|clause| match clause {
            SpanClause::Term(value) => Resolved::Term(value.clone()),
            SpanClause::Fuzzy(fuzzy) => Resolved::Or(expand_fuzzy(fuzzy, &vocabulary)),
        })
        .collect()
}

/// Returns the sorted, deduplicated positions at which `clause` matches.
fn positions(clause: &Resolved, tokens: &[Token]) -> Vec<usize> {
    let terms = clause.terms();
    let found: BTreeSet<usize> = tokens
        .iter()
        .filter(|t| terms.contains(&t.term))
        .map(|t| t.position)
        .collect();
    found.into_iter().collect()
}

/// Finds every ordered match: one position per clause, each after the previous, with at
/// most `slop` unmatched positions in between.
///
/// Each candidate is first stretched (earliest position after the previous clause) and then
/// shrunk from the right (latest position before the following clause), so a match always
/// starts as late as it can. Later candidates must start after the previous match's start.
fn ordered_matches(per_clause: &[Vec<usize>], slop: usize) -> Vec<Vec<usize>> {
    let Some((first, rest)) = per_clause.split_first() else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    let mut last_start = None;
    'starts: for &start in first {
        if last_start.is_some_and(|previous_start| start <= previous_start) {
            continue;
        }

        let mut run = vec![start];
        let mut previous = start;
        for clause in rest {
            match clause.iter().find(|&&p| p > previous) {
                Some(&p) => {
                    run.push(p);
                    previous = p;
                }
                None => break 'starts,
            }
        }

        for i in (0..run.len() - 1).rev() {
            let limit = run[i + 1];
            if let Some(&p) = per_clause[i].iter().rev().find(|&&p| p < limit) {
                run[i] = p;
            }
        }
        last_start = Some(run[0]);

        let width = previous - run[0] + 1 - run.len();
        if width <= slop {
            matches.push(run);
        }
    }
    matches
}

/// Wraps each `(start, end)` byte range of `content` in highlight tags.
fn highlight(content: &str, ranges: &BTreeSet<(usize, usize)>, tags: &Highlight) -> String {
    let mut out = String::with_capacity(content.len() + ranges.len() * 9);
    let mut cursor = 0;
    for &(start, end) in ranges {
        if start < cursor {
            continue;
        }
        out.push_str(&content[cursor..start]);
        out.push_str(&tags.pre_tag);
        out.push_str(&content[start..end]);
        out.push_str(&tags.post_tag);
        cursor = end;
    }
    out.push_str(&content[cursor..]);
    out
}

/// Builds the explanation description of the span clause.
fn explain(resolved: &[Resolved], search: &SpanSearch) -> String {
    let field = search.field.as_str();
    let query = match resolved {
        [single] => single.describe(field),
        _ => {
            let clauses: Vec<String> = resolved.iter().map(|r| r.describe(field)).collect();
            format!("spanNear([{}], {}, true)", clauses.join(", "), search.slop)
        }
    };
    format!("weight({query} in 0) [PerFieldSimilarity], result of:")
}

/// Runs `search` over an analyzed document.
pub(crate) fn search(content: &str, tokens: &[Token], search: &SpanSearch) -> Option<SpanMatch> {
    if search.clauses.is_empty() {
        return None;
    }
    let resolved = resolve(search, tokens);
    let per_clause: Vec<Vec<usize>> = resolved.iter().map(|r| positions(r, tokens)).collect();
    let matches = ordered_matches(&per_clause, search.slop);
    if matches.is_empty() {
        return None;
    }

    let mut matched: HashSet<(usize, usize)> = HashSet::new();
    for run in &matches {
        matched.extend(run.iter().copied().enumerate());
    }

    let ranges: BTreeSet<(usize, usize)> = tokens
        .iter()
        .filter(|token| {
            resolved.iter().enumerate().any(|(index, clause)| {
                matched.contains(&(index, token.position)) && clause.terms().contains(&token.term)
            })
        })
        .map(|token| (token.start, token.end))
        .collect();

    Some(SpanMatch {
        explanation: explain(&resolved, search),
        highlighted: highlight(content, &ranges, &search.highlight),
    })
}
