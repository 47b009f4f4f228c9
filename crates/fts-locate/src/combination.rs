//! Order-preserving word combinations.

/// Returns every `k`-element subset of `words` that keeps the original order, in
/// lexicographic order of the chosen indices.
///
/// Yields nothing when `k` is zero or larger than `words.len()`.
pub fn combinations<T: Clone>(words: &[T], k: usize) -> Vec<Vec<T>> {
    let n = words.len();
    if k == 0 || k > n {
        return Vec::new();
    }

    let mut result = Vec::new();
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.iter().map(|&i| words[i].clone()).collect());

        // Rightmost index that can still move right.
        let Some(slot) = (0..k).rev().find(|&slot| indices[slot] < n - k + slot) else {
            return result;
        };
        indices[slot] += 1;
        for next in slot + 1..k {
            indices[next] = indices[next - 1] + 1;
        }
    }
}

/// Number of `k`-element combinations of `n` items, or `None` if it does not fit in a
/// `usize`.
pub fn binomial(n: usize, k: usize) -> Option<usize> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    // acc * (n - i) is divisible by i + 1 at every step; widening keeps it exact.
    (0..k).try_fold(1usize, |acc, i| {
        usize::try_from(acc as u128 * (n - i) as u128 / (i + 1) as u128).ok()
    })
}
