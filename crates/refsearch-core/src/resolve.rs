//! Query resolution: turn a free-text query into one validated article.
//!
//! Availability beats precision here: a single bad candidate (ambiguous
//! page, fetch error, empty body) is skipped with a recorded reason and the
//! next candidate is tried. Only exhausting every candidate produces a
//! not-found outcome, and even that is data, not an error.

use crate::{
    is_disambiguation_title, Article, CandidateSearch, Error, PageEnrich, PageFetch,
};
use serde::{Deserialize, Serialize};

/// How many alternate candidates ride along with a resolved article.
pub const MAX_ALTERNATES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The page-fetch provider reported a disambiguation page.
    Ambiguous,
    /// Any other fetch failure (network, timeout, missing page).
    FetchFailed,
    /// The returned title carries the disambiguation suffix.
    DisambiguationTitle,
    /// The returned body was empty or whitespace.
    EmptyBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skipped {
    pub title: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Resolution {
    Found {
        article: Article,
        /// Raw provider candidates 2nd through 6th, unre-ranked.
        alternates: Vec<String>,
        skipped: Vec<Skipped>,
    },
    NotFound {
        /// The full original candidate list, unmodified, for fuzzy matching.
        candidates: Vec<String>,
        skipped: Vec<Skipped>,
    },
}

pub struct Resolver<'a> {
    search: &'a dyn CandidateSearch,
    pages: &'a dyn PageFetch,
    enrich: Option<&'a dyn PageEnrich>,
}

impl<'a> Resolver<'a> {
    pub fn new(search: &'a dyn CandidateSearch, pages: &'a dyn PageFetch) -> Self {
        Self {
            search,
            pages,
            enrich: None,
        }
    }

    /// Enable best-effort infobox enrichment of the resolved article.
    pub fn with_enrich(mut self, enrich: &'a dyn PageEnrich) -> Self {
        self.enrich = Some(enrich);
        self
    }

    pub async fn resolve(&self, query: &str) -> Resolution {
        let candidates = match self.search.search(query).await {
            Ok(c) => c,
            // Provider failure at the search step degrades to an empty
            // not-found, never an error to the caller.
            Err(_) => {
                return Resolution::NotFound {
                    candidates: Vec::new(),
                    skipped: Vec::new(),
                }
            }
        };
        if candidates.is_empty() {
            return Resolution::NotFound {
                candidates,
                skipped: Vec::new(),
            };
        }

        let mut skipped: Vec<Skipped> = Vec::new();
        for title in &candidates {
            let page = match self.pages.fetch_page(title).await {
                Ok(p) => p,
                Err(Error::Ambiguous(_)) => {
                    skipped.push(Skipped {
                        title: title.clone(),
                        reason: SkipReason::Ambiguous,
                    });
                    continue;
                }
                Err(_) => {
                    skipped.push(Skipped {
                        title: title.clone(),
                        reason: SkipReason::FetchFailed,
                    });
                    continue;
                }
            };
            if page.text.trim().is_empty() {
                skipped.push(Skipped {
                    title: title.clone(),
                    reason: SkipReason::EmptyBody,
                });
                continue;
            }
            if is_disambiguation_title(&page.title) {
                skipped.push(Skipped {
                    title: title.clone(),
                    reason: SkipReason::DisambiguationTitle,
                });
                continue;
            }

            let mut article = Article {
                title: page.title,
                url: page.url,
                text: page.text,
                image_url: None,
                attributes: Vec::new(),
            };
            // Enrichment is best-effort: failure degrades to no image and
            // no attributes, never to a failed resolution.
            if let Some(enricher) = self.enrich {
                if let Ok(extra) = enricher.enrich(&article.url).await {
                    article.image_url = extra.image_url;
                    article.attributes = extra.attributes;
                }
            }
            let alternates: Vec<String> =
                candidates.iter().skip(1).take(MAX_ALTERNATES).cloned().collect();
            return Resolution::Found {
                article,
                alternates,
                skipped,
            };
        }

        Resolution::NotFound {
            candidates,
            skipped,
        }
    }
}
