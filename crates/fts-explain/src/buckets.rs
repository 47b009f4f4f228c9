//! Term buckets: the structured result of explanation parsing.

use std::slice::Iter;

/// Terms accepted for each searched word, in search-word order.
///
/// A literal match yields a single-entry bucket; a fuzzy match yields one entry per
/// variant the engine accepted for that word. Buckets are never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermBuckets(Vec<Vec<String>>);

impl TermBuckets {
    /// Wraps already-built buckets, dropping any empty ones.
    pub fn new(buckets: Vec<Vec<String>>) -> Self {
        Self(buckets.into_iter().filter(|b| !b.is_empty()).collect())
    }

    /// Number of buckets (searched words).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the bucket at `index`.
    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.0.get(index).map(Vec::as_slice)
    }

    /// Iterates over buckets in search-word order.
    pub fn iter(&self) -> Iter<'_, Vec<String>> {
        self.0.iter()
    }

    /// Returns true if any bucket contains `term` exactly.
    pub fn contains_term(&self, term: &str) -> bool {
        self.0.iter().flatten().any(|t| t == term)
    }

    /// Adds `variant` to every bucket that holds `canonical` but not yet `variant`.
    ///
    /// Returns the number of buckets that changed.
    pub fn add_variant(&mut self, canonical: &str, variant: &str) -> usize {
        let mut changed = 0;
        for bucket in &mut self.0 {
            if bucket.iter().any(|t| t == canonical) && !bucket.iter().any(|t| t == variant) {
                bucket.push(variant.to_string());
                changed += 1;
            }
        }
        changed
    }

    /// Consumes the buckets, returning the inner lists.
    pub fn into_inner(self) -> Vec<Vec<String>> {
        self.0
    }
}

impl<'a> IntoIterator for &'a TermBuckets {
    type Item = &'a Vec<String>;
    type IntoIter = Iter<'a, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
