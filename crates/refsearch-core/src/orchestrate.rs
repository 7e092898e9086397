//! End-to-end flow from raw query to a render-ready bundle.
//!
//! Every failure path ends in informative, non-fatal output: an idle result,
//! a fallback bundle, or a degraded analysis plus a warning. Nothing in here
//! returns an error to the caller.

use crate::fuzzy;
use crate::history::History;
use crate::keywords::{self, DEFAULT_KEYWORD_COUNT};
use crate::memo::Memo;
use crate::resolve::{Resolution, Resolver, Skipped};
use crate::summarize::{self, DEFAULT_SENTENCE_COUNT};
use crate::{AnalysisBundle, Article, CandidateSearch, PageEnrich, PageFetch, WebFallback, WebHit};
use serde::Serialize;

/// Queries shorter than this (after trimming) are not actionable.
pub const MIN_QUERY_CHARS: usize = 2;
/// Display cap on generic web-fallback results.
pub const WEB_RESULT_CAP: usize = 10;

/// Per-session state: navigation history plus the memo caches. One instance
/// per logical session, owned by the caller, never a process-wide singleton.
#[derive(Debug, Default)]
pub struct Session {
    pub history: History,
    pub memo: Memo,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FoundBundle {
    pub article: Article,
    pub alternates: Vec<String>,
    pub analysis: AnalysisBundle,
    pub skipped: Vec<Skipped>,
    pub warnings: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FallbackBundle {
    /// "Did you mean" suggestions from the fuzzy matcher.
    pub suggestions: Vec<String>,
    /// Generic web results, capped at [`WEB_RESULT_CAP`].
    pub web_results: Vec<WebHit>,
    pub skipped: Vec<Skipped>,
    pub warnings: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub enum Outcome {
    /// Query too short to act on; nothing was called, nothing was recorded.
    Idle,
    Found(FoundBundle),
    Fallback(FallbackBundle),
}

pub struct Orchestrator<'a> {
    search: &'a dyn CandidateSearch,
    pages: &'a dyn PageFetch,
    enrich: Option<&'a dyn PageEnrich>,
    web: Option<&'a dyn WebFallback>,
    sentence_count: usize,
    keyword_count: usize,
}

impl<'a> Orchestrator<'a> {
    pub fn new(search: &'a dyn CandidateSearch, pages: &'a dyn PageFetch) -> Self {
        Self {
            search,
            pages,
            enrich: None,
            web: None,
            sentence_count: DEFAULT_SENTENCE_COUNT,
            keyword_count: DEFAULT_KEYWORD_COUNT,
        }
    }

    pub fn with_enrich(mut self, enrich: &'a dyn PageEnrich) -> Self {
        self.enrich = Some(enrich);
        self
    }

    pub fn with_web_fallback(mut self, web: &'a dyn WebFallback) -> Self {
        self.web = Some(web);
        self
    }

    pub fn sentence_count(mut self, n: usize) -> Self {
        self.sentence_count = n;
        self
    }

    pub fn keyword_count(mut self, n: usize) -> Self {
        self.keyword_count = n;
        self
    }

    pub async fn handle(&self, raw_query: &str, session: &mut Session) -> Outcome {
        let query = raw_query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Outcome::Idle;
        }
        session.history.push(query);

        let resolution = match session.memo.resolution(query) {
            Some(r) => r.clone(),
            None => {
                let mut resolver = Resolver::new(self.search, self.pages);
                if let Some(enrich) = self.enrich {
                    resolver = resolver.with_enrich(enrich);
                }
                let r = resolver.resolve(query).await;
                session.memo.store_resolution(query, r).clone()
            }
        };

        match resolution {
            Resolution::Found {
                article,
                alternates,
                skipped,
            } => {
                let mut warnings = Vec::new();
                let summary = session
                    .memo
                    .summary_or_insert_with(&article.text, self.sentence_count, || {
                        summarize::summarize(&article.text, self.sentence_count)
                    });
                let keywords = session
                    .memo
                    .keywords_or_insert_with(&article.text, self.keyword_count, || {
                        keywords::extract_keywords(&article.text, self.keyword_count)
                    });
                if keywords.is_empty() {
                    warnings.push("keyword_extraction_empty");
                }
                Outcome::Found(FoundBundle {
                    article,
                    alternates,
                    analysis: AnalysisBundle { summary, keywords },
                    skipped,
                    warnings,
                })
            }
            Resolution::NotFound {
                candidates,
                skipped,
            } => {
                let suggestions = fuzzy::rank(
                    query,
                    &candidates,
                    fuzzy::DEFAULT_MAX_SUGGESTIONS,
                    fuzzy::DEFAULT_MIN_SIMILARITY,
                );
                let mut warnings = Vec::new();
                // Web fallback runs even when there were zero candidates.
                let web_results = match self.web {
                    Some(web) => match web.web_search(query).await {
                        Ok(mut hits) => {
                            hits.truncate(WEB_RESULT_CAP);
                            hits
                        }
                        Err(_) => {
                            warnings.push("web_fallback_failed");
                            Vec::new()
                        }
                    },
                    None => {
                        warnings.push("web_fallback_unconfigured");
                        Vec::new()
                    }
                };
                Outcome::Fallback(FallbackBundle {
                    suggestions,
                    web_results,
                    skipped,
                    warnings,
                })
            }
        }
    }
}
