use serde::{Deserialize, Serialize};

pub mod fuzzy;
pub mod history;
pub mod keywords;
pub mod memo;
pub mod orchestrate;
pub mod resolve;
pub mod summarize;
pub mod text;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("search failed: {0}")]
    Search(String),
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("ambiguous title: {0}")]
    Ambiguous(String),
    #[error("page missing: {0}")]
    PageMissing(String),
    #[error("web fallback failed: {0}")]
    Fallback(String),
    #[error("translation failed: {0}")]
    Translate(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Suffix that marks a title as a disambiguation page. Such a title is never
/// a valid resolved article.
pub const DISAMBIGUATION_SUFFIX: &str = "(disambiguation)";

pub fn is_disambiguation_title(title: &str) -> bool {
    title
        .trim_end()
        .to_ascii_lowercase()
        .ends_with(DISAMBIGUATION_SUFFIX)
}

/// Translation targets offered by the reference UI. `en` is an identity
/// no-op in the shipped provider. Extensible configuration, not policy.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Telugu", "te"),
    ("Hindi", "hi"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
];

/// Literal marker surfaced to the UI when translation fails. The translation
/// path never yields an error to the caller.
pub const TRANSLATION_FAILED: &str = "Translation failed.";

/// A validated reference article plus best-effort enrichment. Immutable once
/// constructed; recomputed (not mutated) per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub text: String,
    pub image_url: Option<String>,
    /// Ordered (label, value) rows from the page's infobox, possibly empty.
    pub attributes: Vec<(String, String)>,
}

/// Raw page content as returned by the page-fetch provider, before
/// enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageData {
    pub title: String,
    pub url: String,
    pub text: String,
}

/// Best-effort infobox extraction result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enrichment {
    pub image_url: Option<String>,
    pub attributes: Vec<(String, String)>,
}

/// A generic web-fallback result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebHit {
    pub label: String,
    pub url: String,
}

/// Summary + keywords over one article text. Keywords are deduplicated and
/// kept in extractor relevance order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub summary: String,
    pub keywords: Vec<String>,
}

#[async_trait::async_trait]
pub trait CandidateSearch: Send + Sync {
    fn name(&self) -> &'static str;
    /// Candidate article titles in provider relevance order.
    async fn search(&self, query: &str) -> Result<Vec<String>>;
}

#[async_trait::async_trait]
pub trait PageFetch: Send + Sync {
    /// Exact-title lookup, no auto-correction. A disambiguation page is
    /// reported as `Error::Ambiguous`, a missing page as `Error::PageMissing`.
    async fn fetch_page(&self, title: &str) -> Result<PageData>;
}

#[async_trait::async_trait]
pub trait PageEnrich: Send + Sync {
    /// Fetch raw HTML at `url` and extract infobox image + attribute rows.
    async fn enrich(&self, url: &str) -> Result<Enrichment>;
}

#[async_trait::async_trait]
pub trait WebFallback: Send + Sync {
    async fn web_search(&self, query: &str) -> Result<Vec<WebHit>>;
}

#[async_trait::async_trait]
pub trait Autocomplete: Send + Sync {
    async fn complete(&self, partial: &str) -> Result<Vec<String>>;
}

#[async_trait::async_trait]
pub trait Translate: Send + Sync {
    async fn translate(&self, text: &str, lang: &str) -> Result<String>;
}

/// Translation failures surface as the literal [`TRANSLATION_FAILED`] marker,
/// never as an error.
pub async fn translate_or_marker(t: &dyn Translate, text: &str, lang: &str) -> String {
    match t.translate(text, lang).await {
        Ok(s) => s,
        Err(_) => TRANSLATION_FAILED.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disambiguation_suffix_is_case_insensitive() {
        assert!(is_disambiguation_title("Mercury (disambiguation)"));
        assert!(is_disambiguation_title("Mercury (Disambiguation)  "));
        assert!(!is_disambiguation_title("Mercury (element)"));
        assert!(!is_disambiguation_title("disambiguation rules"));
    }

    #[tokio::test]
    async fn translate_or_marker_degrades_to_literal() {
        struct Failing;
        #[async_trait::async_trait]
        impl Translate for Failing {
            async fn translate(&self, _text: &str, _lang: &str) -> Result<String> {
                Err(Error::Translate("boom".to_string()))
            }
        }
        let out = translate_or_marker(&Failing, "hello", "te").await;
        assert_eq!(out, TRANSLATION_FAILED);
    }
}
