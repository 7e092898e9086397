//! Statistical key-phrase extraction over an article's lead section.
//!
//! A lightweight single-document extractor in the YAKE family: per-term
//! statistics (casing, first position, frequency, sentence spread) compose
//! into a term score, and candidate phrases of up to [`MAX_PHRASE_WORDS`]
//! consecutive non-stopword tokens are ranked by the usual composed phrase
//! score. Lower scores are better internally; callers only see the final
//! ordering. An unusable input yields an empty list, which is the explicit
//! "no keywords found" state.

use crate::text::{is_stop_word, lead_section, split_sentences};
use std::collections::HashMap;

pub const DEFAULT_KEYWORD_COUNT: usize = 9;
pub const MAX_PHRASE_WORDS: usize = 3;

#[derive(Debug, Default, Clone)]
struct TermStats {
    tf: usize,
    first_offset: usize,
    capitalized: usize,
    acronym: usize,
    sentences: usize,
    last_sentence: Option<usize>,
}

fn is_acronym(word: &str) -> bool {
    word.len() > 1 && word.chars().all(|c| c.is_ascii_uppercase())
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_uppercase()) && chars.all(|c| c.is_lowercase())
}

/// Cased word tokens per sentence. Tokens keep their original casing so the
/// casing statistic can see acronyms and proper nouns.
fn cased_tokens(sentence: &str) -> Vec<&str> {
    sentence
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .collect()
}

fn term_statistics(sentences: &[Vec<&str>]) -> HashMap<String, TermStats> {
    let mut stats: HashMap<String, TermStats> = HashMap::new();
    let mut offset = 0usize;
    for (s_idx, tokens) in sentences.iter().enumerate() {
        for (t_idx, word) in tokens.iter().enumerate() {
            let key = word.to_lowercase();
            let entry = stats.entry(key).or_insert_with(|| TermStats {
                first_offset: offset,
                ..TermStats::default()
            });
            entry.tf += 1;
            // A capitalized token at sentence start carries no signal.
            if is_acronym(word) {
                entry.acronym += 1;
            } else if t_idx > 0 && is_capitalized(word) {
                entry.capitalized += 1;
            }
            if entry.last_sentence != Some(s_idx) {
                entry.sentences += 1;
                entry.last_sentence = Some(s_idx);
            }
            offset += 1;
        }
    }
    stats
}

/// YAKE-style composed term score; lower is better.
fn term_score(stats: &TermStats, mean_tf: f64, std_tf: f64, n_sentences: usize) -> f64 {
    let tf = stats.tf as f64;
    let casing =
        1.0 + stats.acronym.max(stats.capitalized) as f64 / (1.0 + (1.0 + tf).ln());
    let position = ((3.0 + stats.first_offset as f64).ln()).ln() + 1.0;
    let frequency = tf / (mean_tf + std_tf + f64::EPSILON);
    let spread = stats.sentences as f64 / n_sentences.max(1) as f64;
    position / (casing + frequency + spread)
}

/// Extract up to `count` key phrases (1 to 3 words) from `text`, best first,
/// lowercased and deduplicated.
pub fn extract_keywords(text: &str, count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }
    let lead = lead_section(text);
    let sentences: Vec<Vec<&str>> = split_sentences(lead)
        .into_iter()
        .map(cased_tokens)
        .collect();
    if sentences.iter().all(|s| s.is_empty()) {
        return Vec::new();
    }

    let stats = term_statistics(&sentences);
    let n_terms = stats.len() as f64;
    let mean_tf = stats.values().map(|s| s.tf as f64).sum::<f64>() / n_terms;
    let var_tf = stats
        .values()
        .map(|s| (s.tf as f64 - mean_tf).powi(2))
        .sum::<f64>()
        / n_terms;
    let std_tf = var_tf.sqrt();
    let n_sentences = sentences.len();

    let scores: HashMap<&str, f64> = stats
        .iter()
        .map(|(t, st)| {
            (
                t.as_str(),
                term_score(st, mean_tf, std_tf, n_sentences),
            )
        })
        .collect();

    // Candidate phrases: n-grams over runs of consecutive content tokens.
    // Stopwords and digit-only tokens terminate a run.
    let mut phrases: HashMap<String, (f64, usize, usize)> = HashMap::new(); // score parts, tf, first
    let mut order = 0usize;
    for tokens in &sentences {
        let mut run: Vec<String> = Vec::new();
        for word in tokens.iter().chain(std::iter::once(&"")) {
            let key = word.to_lowercase();
            let breaks = key.is_empty()
                || key.len() < 2
                || is_stop_word(&key)
                || key.chars().all(|c| c.is_ascii_digit());
            if breaks {
                for start in 0..run.len() {
                    for end in start + 1..=(start + MAX_PHRASE_WORDS).min(run.len()) {
                        let phrase = run[start..end].join(" ");
                        let product: f64 =
                            run[start..end].iter().map(|t| scores[t.as_str()]).product();
                        let sum: f64 = run[start..end].iter().map(|t| scores[t.as_str()]).sum();
                        let entry = phrases.entry(phrase).or_insert((0.0, 0, order));
                        entry.0 = product / (1.0 + sum);
                        entry.1 += 1;
                        order += 1;
                    }
                }
                run.clear();
            } else {
                run.push(key);
            }
        }
    }

    let mut ranked: Vec<(String, f64, usize)> = phrases
        .into_iter()
        .map(|(phrase, (score, tf, first))| (phrase, score / tf as f64, first))
        .collect();
    ranked.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.2.cmp(&b.2))
    });
    ranked.into_iter().take(count).map(|(p, _, _)| p).collect()
}
