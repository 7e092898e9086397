//! MediaWiki-backed candidate search and page fetch.
//!
//! Search uses `list=search` (provider relevance order). Page fetch is an
//! exact-title `prop=extracts|info|pageprops` lookup with redirects followed
//! but no auto-correction; a page carrying the `disambiguation` pageprop is
//! reported as [`Error::Ambiguous`] so the resolver can skip it.

use crate::{endpoint_from_env, FETCH_TIMEOUT};
use refsearch_core::{CandidateSearch, Error, PageData, PageFetch, Result};
use serde::Deserialize;
use std::collections::BTreeMap;

pub const SEARCH_LIMIT: usize = 10;

#[derive(Debug, Clone)]
pub struct WikipediaProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl WikipediaProvider {
    pub fn new(client: reqwest::Client) -> Self {
        let endpoint = endpoint_from_env("REFSEARCH_WIKIPEDIA_ENDPOINT")
            .unwrap_or_else(|| "https://en.wikipedia.org/w/api.php".to_string());
        Self { client, endpoint }
    }

    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    query: Option<SearchQuerySection>,
}

#[derive(Debug, Deserialize)]
struct SearchQuerySection {
    search: Option<Vec<SearchEntry>>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    title: Option<String>,
}

#[async_trait::async_trait]
impl CandidateSearch for WikipediaProvider {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    async fn search(&self, query: &str) -> Result<Vec<String>> {
        let limit = SEARCH_LIMIT.to_string();
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("srlimit", limit.as_str()),
                ("format", "json"),
            ])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Search(format!("wikipedia search HTTP {status}")));
        }
        let parsed: SearchEnvelope = resp.json().await.map_err(|e| Error::Search(e.to_string()))?;

        let mut out = Vec::new();
        if let Some(entries) = parsed.query.and_then(|q| q.search) {
            for e in entries {
                if let Some(title) = e.title {
                    out.push(title);
                }
            }
        }
        Ok(out)
    }
}

#[derive(Debug, Deserialize)]
struct PageEnvelope {
    query: Option<PageQuerySection>,
}

#[derive(Debug, Deserialize)]
struct PageQuerySection {
    // Keyed by page id, "-1" for a miss; key order is irrelevant since an
    // exact-title lookup yields a single page.
    pages: Option<BTreeMap<String, WikiPage>>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    title: Option<String>,
    extract: Option<String>,
    fullurl: Option<String>,
    missing: Option<serde_json::Value>,
    pageprops: Option<BTreeMap<String, serde_json::Value>>,
}

#[async_trait::async_trait]
impl PageFetch for WikipediaProvider {
    async fn fetch_page(&self, title: &str) -> Result<PageData> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("prop", "extracts|info|pageprops"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("inprop", "url"),
                ("titles", title),
                ("format", "json"),
            ])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("wikipedia page HTTP {status}")));
        }
        let parsed: PageEnvelope = resp.json().await.map_err(|e| Error::Fetch(e.to_string()))?;

        let page = parsed
            .query
            .and_then(|q| q.pages)
            .and_then(|pages| pages.into_values().next())
            .ok_or_else(|| Error::PageMissing(title.to_string()))?;
        if page.missing.is_some() {
            return Err(Error::PageMissing(title.to_string()));
        }
        if page
            .pageprops
            .as_ref()
            .is_some_and(|props| props.contains_key("disambiguation"))
        {
            return Err(Error::Ambiguous(title.to_string()));
        }

        let resolved_title = page.title.unwrap_or_else(|| title.to_string());
        let url = page
            .fullurl
            .ok_or_else(|| Error::Fetch(format!("no canonical url for {resolved_title}")))?;
        Ok(PageData {
            title: resolved_title,
            url,
            text: page.extract.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use std::net::SocketAddr;

    #[test]
    fn parses_minimal_search_shape() {
        let js = r#"
        {
          "query": {
            "search": [
              {"title": "Mercury (planet)", "pageid": 1},
              {"title": "Mercury (element)"}
            ]
          }
        }
        "#;
        let parsed: SearchEnvelope = serde_json::from_str(js).unwrap();
        let entries = parsed.query.unwrap().search.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Mercury (planet)"));
    }

    #[test]
    fn parses_minimal_page_shape() {
        let js = r#"
        {
          "query": {
            "pages": {
              "9228": {
                "pageid": 9228,
                "title": "Mercury (planet)",
                "extract": "Mercury is the first planet from the Sun.",
                "fullurl": "https://en.wikipedia.org/wiki/Mercury_(planet)"
              }
            }
          }
        }
        "#;
        let parsed: PageEnvelope = serde_json::from_str(js).unwrap();
        let pages = parsed.query.unwrap().pages.unwrap();
        let page = pages.values().next().unwrap();
        assert_eq!(page.title.as_deref(), Some("Mercury (planet)"));
        assert!(page.missing.is_none());
        assert!(page.pageprops.is_none());
    }

    #[test]
    fn parses_disambiguation_pageprop() {
        let js = r#"
        {
          "query": {
            "pages": {
              "1024": {
                "title": "Mercury",
                "pageprops": {"disambiguation": ""}
              }
            }
          }
        }
        "#;
        let parsed: PageEnvelope = serde_json::from_str(js).unwrap();
        let pages = parsed.query.unwrap().pages.unwrap();
        let page = pages.values().next().unwrap();
        assert!(page
            .pageprops
            .as_ref()
            .is_some_and(|p| p.contains_key("disambiguation")));
    }

    async fn fixture_addr(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn search_round_trip_against_fixture() {
        let app = Router::new().route(
            "/w/api.php",
            get(|| async {
                axum::Json(serde_json::json!({
                    "query": {"search": [
                        {"title": "Python (programming language)"},
                        {"title": "Python"}
                    ]}
                }))
            }),
        );
        let addr = fixture_addr(app).await;
        let provider = WikipediaProvider::with_endpoint(
            reqwest::Client::new(),
            format!("http://{addr}/w/api.php"),
        );
        let out = provider.search("python").await.unwrap();
        assert_eq!(
            out,
            vec!["Python (programming language)".to_string(), "Python".to_string()]
        );
    }

    #[tokio::test]
    async fn page_fetch_maps_missing_and_ambiguous() {
        let app = Router::new().route(
            "/w/api.php",
            get(
                |axum::extract::Query(params): axum::extract::Query<
                    std::collections::HashMap<String, String>,
                >| async move {
                    let title = params.get("titles").cloned().unwrap_or_default();
                    let body = match title.as_str() {
                        "Nope" => serde_json::json!({
                            "query": {"pages": {"-1": {"title": "Nope", "missing": ""}}}
                        }),
                        "Mercury" => serde_json::json!({
                            "query": {"pages": {"7": {
                                "title": "Mercury",
                                "pageprops": {"disambiguation": ""}
                            }}}
                        }),
                        _ => serde_json::json!({
                            "query": {"pages": {"1": {
                                "title": title,
                                "extract": "Some article text. More of it here.",
                                "fullurl": "https://en.wikipedia.org/wiki/Whatever"
                            }}}
                        }),
                    };
                    axum::Json(body)
                },
            ),
        );
        let addr = fixture_addr(app).await;
        let provider = WikipediaProvider::with_endpoint(
            reqwest::Client::new(),
            format!("http://{addr}/w/api.php"),
        );

        assert!(matches!(
            provider.fetch_page("Nope").await,
            Err(Error::PageMissing(_))
        ));
        assert!(matches!(
            provider.fetch_page("Mercury").await,
            Err(Error::Ambiguous(_))
        ));
        let page = provider.fetch_page("Whatever").await.unwrap();
        assert_eq!(page.title, "Whatever");
        assert!(page.text.starts_with("Some article text."));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_search_error() {
        // Reserved port with nothing listening.
        let provider =
            WikipediaProvider::with_endpoint(reqwest::Client::new(), "http://127.0.0.1:9/w/api.php");
        assert!(matches!(
            provider.search("anything").await,
            Err(Error::Search(_))
        ));
    }
}
