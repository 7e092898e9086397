//! Minimal, deterministic text helpers shared by the analysis stages.

/// Marker that opens the first second-level section heading in raw article
/// text. Everything after it (references, see-also) dilutes relevance and is
/// excluded from analysis. Pre-stripped text without the marker passes
/// through unchanged.
pub const SECTION_MARKER: &str = "\n== ";

/// The article text preceding its first sub-heading.
pub fn lead_section(text: &str) -> &str {
    match text.find(SECTION_MARKER) {
        Some(i) => &text[..i],
        None => text,
    }
}

/// Split text into sentences on `.`/`!`/`?` followed by whitespace, keeping
/// the terminator. Intentionally "good enough" rather than a full tokenizer;
/// abbreviation handling is limited to single-letter initials.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if matches!(c, '.' | '!' | '?') {
            let next_is_break = bytes
                .get(i + 1)
                .map(|b| (*b as char).is_whitespace())
                .unwrap_or(true);
            // Skip initials like "J. Smith": a lone uppercase letter before
            // the period is not a sentence end.
            let prev_initial = i >= 1
                && (bytes[i - 1] as char).is_ascii_uppercase()
                && (i == 1 || !(bytes[i - 2] as char).is_ascii_alphanumeric());
            if next_is_break && !prev_initial {
                let s = text[start..=i].trim();
                if !s.is_empty() {
                    out.push(s);
                }
                start = i + 1;
            }
        }
        i += 1;
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Lowercased alphanumeric word tokens, keeping original order.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Words carrying no topical signal; filtered out of term statistics.
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "all", "also", "am", "an", "and", "any", "are", "as",
    "at", "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
    "can", "could", "did", "do", "does", "during", "each", "few", "for", "from", "further", "had",
    "has", "have", "he", "her", "here", "him", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "just", "may", "might", "more", "most", "must", "no", "nor", "not", "now", "of", "on",
    "once", "only", "or", "other", "our", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "them", "then", "there", "these", "they", "this", "those",
    "through", "to", "too", "under", "until", "very", "was", "we", "were", "what", "when",
    "where", "which", "while", "who", "why", "will", "with", "would", "you", "your",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.binary_search(&word).is_ok()
}
