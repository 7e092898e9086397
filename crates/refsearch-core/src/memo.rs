//! Session-scoped memoization for the pure pipeline stages.
//!
//! Keys are exact input values; entries are immutable once stored and are
//! never evicted within a session (accepted growth tradeoff for
//! session-scoped caching). Same input always yields the same output.

use crate::resolve::Resolution;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Memo {
    resolutions: HashMap<String, Resolution>,
    summaries: HashMap<(String, usize), String>,
    keywords: HashMap<(String, usize), Vec<String>>,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(&self, query: &str) -> Option<&Resolution> {
        self.resolutions.get(query)
    }

    pub fn store_resolution(&mut self, query: &str, r: Resolution) -> &Resolution {
        self.resolutions.entry(query.to_string()).or_insert(r)
    }

    pub fn summary_or_insert_with(
        &mut self,
        text: &str,
        count: usize,
        compute: impl FnOnce() -> String,
    ) -> String {
        self.summaries
            .entry((text.to_string(), count))
            .or_insert_with(compute)
            .clone()
    }

    pub fn keywords_or_insert_with(
        &mut self,
        text: &str,
        count: usize,
        compute: impl FnOnce() -> Vec<String>,
    ) -> Vec<String> {
        self.keywords
            .entry((text.to_string(), count))
            .or_insert_with(compute)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_is_computed_once_per_exact_input() {
        let mut memo = Memo::new();
        let mut calls = 0;
        let a = memo.summary_or_insert_with("text", 5, || {
            calls += 1;
            "summary".to_string()
        });
        let b = memo.summary_or_insert_with("text", 5, || {
            calls += 1;
            "different".to_string()
        });
        assert_eq!(a, b);
        assert_eq!(calls, 1);
    }

    #[test]
    fn sentence_count_is_part_of_the_key() {
        let mut memo = Memo::new();
        memo.summary_or_insert_with("text", 5, || "five".to_string());
        let other = memo.summary_or_insert_with("text", 3, || "three".to_string());
        assert_eq!(other, "three");
    }

    #[test]
    fn stored_resolution_is_not_replaced() {
        let mut memo = Memo::new();
        let first = Resolution::NotFound {
            candidates: vec!["a".to_string()],
            skipped: Vec::new(),
        };
        memo.store_resolution("q", first);
        let second = Resolution::NotFound {
            candidates: vec!["b".to_string()],
            skipped: Vec::new(),
        };
        memo.store_resolution("q", second);
        match memo.resolution("q") {
            Some(Resolution::NotFound { candidates, .. }) => {
                assert_eq!(candidates, &["a".to_string()]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
