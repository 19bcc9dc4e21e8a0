#[cfg(test)]
mod tests;

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

const DEFAULT_THRESHOLD: f32 = 0.6;

/// Approximate string matching by longest-common-block similarity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f32,
}

impl Default for FuzzyMatcher {
    #[inline]
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl FuzzyMatcher {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    #[inline]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Candidates scoring at least the threshold against `query`, best first.
    ///
    /// Equal scores keep their input order.
    #[inline]
    pub fn fuzzy_match<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<(String, f32)> {
        let mut matches: Vec<(String, f32)> = candidates
            .iter()
            .map(|candidate| {
                let candidate = candidate.as_ref();
                (candidate.to_string(), ratio(query, candidate))
            })
            .filter(|(_, score)| *score >= self.threshold)
            .collect();

        matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        matches
    }

    /// Share of the distinct words in `query` that also appear in `text`
    #[inline]
    pub fn partial_match(&self, query: &str, text: &str) -> f32 {
        let query_lower = query.to_lowercase();
        let text_lower = text.to_lowercase();
        let query_words: HashSet<&str> = query_lower.split_whitespace().collect();
        if query_words.is_empty() {
            return 0.0;
        }
        let text_words: HashSet<&str> = text_lower.split_whitespace().collect();

        query_words.intersection(&text_words).count() as f32 / query_words.len() as f32
    }
}

/// Similarity in `[0, 1]`: twice the matched characters over the combined length.
///
/// Matching blocks are found recursively by taking the longest common run and
/// repeating on both sides of it. Comparison is case-insensitive; two empty strings
/// are identical.
#[inline]
pub fn ratio(a: &str, b: &str) -> f32 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let matched = matching_characters(&a, &b);
    2.0 * matched as f32 / total as f32
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        positions.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((a_lo, a_hi, b_lo, b_hi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &positions, a_lo, a_hi, b_lo, b_hi);
        if size == 0 {
            continue;
        }
        matched += size;

        if a_lo < i && b_lo < j {
            pending.push((a_lo, i, b_lo, j));
        }
        if i + size < a_hi && j + size < b_hi {
            pending.push((i + size, a_hi, j + size, b_hi));
        }
    }

    matched
}

/// Longest run shared by `a[a_lo..a_hi]` and `b[b_lo..b_hi]`, earliest in `a` then `b`
fn longest_match(
    a: &[char],
    positions: &HashMap<char, Vec<usize>>,
    a_lo: usize,
    a_hi: usize,
    b_lo: usize,
    b_hi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (a_lo, b_lo, 0);
    let mut run_ending_at: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(a_hi).skip(a_lo) {
        let mut next: HashMap<usize, usize> = HashMap::new();

        for &j in positions.get(c).map_or(&[][..], Vec::as_slice) {
            if j < b_lo {
                continue;
            }
            if j >= b_hi {
                break;
            }

            let size = j
                .checked_sub(1)
                .and_then(|prev| run_ending_at.get(&prev))
                .map_or(1, |run| run + 1);
            next.insert(j, size);

            if size > best_size {
                best_i = i + 1 - size;
                best_j = j + 1 - size;
                best_size = size;
            }
        }

        run_ending_at = next;
    }

    (best_i, best_j, best_size)
}
