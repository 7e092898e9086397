//! "Did you mean" ranking for near-miss candidates.
//!
//! Similarity is the classic matching-blocks ratio: recursively find the
//! longest common contiguous block, recurse on both sides, and score
//! `2*M / (len(a)+len(b))` where `M` is the total matched length. Range
//! [0, 1], deterministic, case-sensitive.

use std::collections::HashMap;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.4;

fn positions_by_char(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut out: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        out.entry(*ch).or_default().push(j);
    }
    out
}

/// Longest contiguous block common to `a[alo..ahi]` and `b[blo..bhi]`.
/// Returns (start in a, start in b, length); earliest block wins ties.
fn longest_match(
    a: &[char],
    alo: usize,
    ahi: usize,
    b2j: &HashMap<char, Vec<usize>>,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0usize);
    // j2len[j] = length of the longest match ending at a[i], b[j].
    let mut j2len: HashMap<usize, usize> = HashMap::new();
    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(js) = b2j.get(ch) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = if j == 0 {
                    1
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                next.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = next;
    }
    (best_i, best_j, best_size)
}

fn matched_total(
    a: &[char],
    alo: usize,
    ahi: usize,
    b2j: &HashMap<char, Vec<usize>>,
    blo: usize,
    bhi: usize,
) -> usize {
    let (i, j, k) = longest_match(a, alo, ahi, b2j, blo, bhi);
    if k == 0 {
        return 0;
    }
    matched_total(a, alo, i, b2j, blo, j) + k + matched_total(a, i + k, ahi, b2j, j + k, bhi)
}

/// Normalized similarity of two strings in [0, 1]. Two empty strings are
/// identical (ratio 1).
pub fn ratio(a: &str, b: &str) -> f64 {
    let ac: Vec<char> = a.chars().collect();
    let bc: Vec<char> = b.chars().collect();
    let total_len = ac.len() + bc.len();
    if total_len == 0 {
        return 1.0;
    }
    let b2j = positions_by_char(&bc);
    let m = matched_total(&ac, 0, ac.len(), &b2j, 0, bc.len());
    2.0 * m as f64 / total_len as f64
}

/// Rank `candidates` by similarity to `query`, descending, keeping only
/// those at or above `min_similarity` and at most `max` of them. Ties keep
/// the original candidate order.
pub fn rank(query: &str, candidates: &[String], max: usize, min_similarity: f64) -> Vec<String> {
    let mut scored: Vec<(f64, &String)> = candidates
        .iter()
        .map(|c| (ratio(query, c), c))
        .filter(|(score, _)| *score >= min_similarity)
        .collect();
    // Stable sort keeps provider order for equal scores.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    scored.into_iter().take(max).map(|(_, c)| c.clone()).collect()
}
