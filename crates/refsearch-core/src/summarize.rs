//! Extractive summarization over an article's lead section.
//!
//! Sentences are scored against TF-IDF term weights computed over the
//! sentence collection itself (an LSA-flavored extractive ranking), then the
//! top `sentence_count` sentences are emitted in their original document
//! order. The degraded path returns the first `sentence_count` raw lines:
//! this function never panics and never errors, it only degrades.

use crate::text::{is_stop_word, lead_section, split_sentences, tokenize};
use std::collections::HashMap;

pub const DEFAULT_SENTENCE_COUNT: usize = 5;

/// Verbatim head-of-input fallback used whenever ranking is not possible.
fn head_lines(text: &str, count: usize) -> String {
    text.lines().take(count).collect::<Vec<_>>().join(" ")
}

fn sentence_terms(sentence: &str) -> Vec<String> {
    tokenize(sentence)
        .into_iter()
        .filter(|w| w.len() > 1 && !is_stop_word(w))
        .collect()
}

/// Indices of the `count` best sentences, ascending. `None` when the input
/// cannot be ranked (too few sentences, or no usable vocabulary).
fn rank_sentences(sentences: &[&str], count: usize) -> Option<Vec<usize>> {
    if sentences.len() < 2 || sentences.len() < count {
        return None;
    }
    let terms_per_sentence: Vec<Vec<String>> = sentences.iter().map(|s| sentence_terms(s)).collect();

    // Document frequency per term across sentences.
    let mut df: HashMap<&str, usize> = HashMap::new();
    for terms in &terms_per_sentence {
        let mut seen: Vec<&str> = Vec::new();
        for t in terms {
            if !seen.contains(&t.as_str()) {
                seen.push(t);
                *df.entry(t).or_insert(0) += 1;
            }
        }
    }
    if df.is_empty() {
        return None;
    }

    let n = sentences.len() as f64;
    let mut scored: Vec<(usize, f64)> = Vec::with_capacity(sentences.len());
    for (idx, terms) in terms_per_sentence.iter().enumerate() {
        if terms.is_empty() {
            scored.push((idx, 0.0));
            continue;
        }
        let mut tf: HashMap<&str, usize> = HashMap::new();
        for t in terms {
            *tf.entry(t).or_insert(0) += 1;
        }
        // Energy of the sentence's TF-IDF vector, length-normalized so long
        // sentences do not win on bulk alone.
        let mut energy = 0.0f64;
        for (t, f) in &tf {
            let idf = (n / df[t] as f64).ln() + 1.0;
            let w = *f as f64 * idf;
            energy += w * w;
        }
        scored.push((idx, energy / (terms.len() as f64).sqrt()));
    }

    let mut order: Vec<usize> = (0..scored.len()).collect();
    // Stable sort: equal scores keep document order.
    order.sort_by(|&a, &b| {
        scored[b]
            .1
            .partial_cmp(&scored[a].1)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let mut picked: Vec<usize> = order.into_iter().take(count).collect();
    picked.sort_unstable();
    Some(picked)
}

/// Summarize `text` into at most `sentence_count` sentences drawn verbatim
/// from its lead section, joined in document order.
pub fn summarize(text: &str, sentence_count: usize) -> String {
    if sentence_count == 0 {
        return String::new();
    }
    let lead = lead_section(text);
    let sentences = split_sentences(lead);
    match rank_sentences(&sentences, sentence_count) {
        Some(picked) => picked
            .into_iter()
            .map(|i| sentences[i])
            .collect::<Vec<_>>()
            .join(" "),
        None => head_lines(text, sentence_count),
    }
}
