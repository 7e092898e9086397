//! DuckDuckGo-backed autocomplete and generic web fallback.
//!
//! Autocomplete hits the `ac` JSON endpoint; the web fallback uses the
//! instant-answer API and flattens `RelatedTopics`, including nested topic
//! groups, into ordered (label, url) pairs.

use crate::{endpoint_from_env, FETCH_TIMEOUT, QUICK_TIMEOUT};
use refsearch_core::{Autocomplete, Error, Result, WebFallback, WebHit};
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct DuckDuckGo {
    client: reqwest::Client,
    ac_endpoint: String,
    ia_endpoint: String,
}

impl DuckDuckGo {
    pub fn new(client: reqwest::Client) -> Self {
        let ac_endpoint = endpoint_from_env("REFSEARCH_DDG_AC_ENDPOINT")
            .unwrap_or_else(|| "https://duckduckgo.com/ac/".to_string());
        let ia_endpoint = endpoint_from_env("REFSEARCH_DDG_IA_ENDPOINT")
            .unwrap_or_else(|| "https://api.duckduckgo.com/".to_string());
        Self {
            client,
            ac_endpoint,
            ia_endpoint,
        }
    }

    pub fn with_endpoints(
        client: reqwest::Client,
        ac_endpoint: impl Into<String>,
        ia_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            ac_endpoint: ac_endpoint.into(),
            ia_endpoint: ia_endpoint.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AcEntry {
    phrase: Option<String>,
}

#[async_trait::async_trait]
impl Autocomplete for DuckDuckGo {
    async fn complete(&self, partial: &str) -> Result<Vec<String>> {
        if partial.trim().is_empty() {
            return Ok(Vec::new());
        }
        let resp = self
            .client
            .get(&self.ac_endpoint)
            .query(&[("q", partial)])
            .timeout(QUICK_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Search(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Search(format!("autocomplete HTTP {status}")));
        }
        let parsed: Vec<AcEntry> = resp.json().await.map_err(|e| Error::Search(e.to_string()))?;
        Ok(parsed
            .into_iter()
            .filter_map(|e| e.phrase)
            .filter(|p| !p.trim().is_empty())
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "RelatedTopics")]
    related_topics: Option<Vec<RelatedTopic>>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
    /// Present on nested topic groups ("Name" + "Topics").
    #[serde(rename = "Topics")]
    topics: Option<Vec<RelatedTopic>>,
}

fn flatten_topics(topics: Vec<RelatedTopic>, out: &mut Vec<WebHit>) {
    for t in topics {
        if let (Some(text), Some(url)) = (t.text, t.first_url) {
            out.push(WebHit { label: text, url });
        } else if let Some(sub) = t.topics {
            flatten_topics(sub, out);
        }
    }
}

#[async_trait::async_trait]
impl WebFallback for DuckDuckGo {
    async fn web_search(&self, query: &str) -> Result<Vec<WebHit>> {
        let resp = self
            .client
            .get(&self.ia_endpoint)
            .query(&[("q", query), ("format", "json"), ("pretty", "1")])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Fallback(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fallback(format!("web fallback HTTP {status}")));
        }
        let parsed: InstantAnswer = resp
            .json()
            .await
            .map_err(|e| Error::Fallback(e.to_string()))?;

        let mut out = Vec::new();
        if let Some(topics) = parsed.related_topics {
            flatten_topics(topics, &mut out);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use std::net::SocketAddr;

    #[test]
    fn parses_minimal_autocomplete_shape() {
        let js = r#"[{"phrase": "rust language"}, {"phrase": ""}, {}]"#;
        let parsed: Vec<AcEntry> = serde_json::from_str(js).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].phrase.as_deref(), Some("rust language"));
    }

    #[test]
    fn flattens_direct_and_nested_related_topics() {
        let js = r#"
        {
          "RelatedTopics": [
            {"Text": "Direct hit", "FirstURL": "https://a.example"},
            {"Name": "Group", "Topics": [
                {"Text": "Nested one", "FirstURL": "https://b.example"},
                {"Text": "Nested two", "FirstURL": "https://c.example"}
            ]},
            {"Text": "no url, dropped"}
          ]
        }
        "#;
        let parsed: InstantAnswer = serde_json::from_str(js).unwrap();
        let mut out = Vec::new();
        flatten_topics(parsed.related_topics.unwrap(), &mut out);
        assert_eq!(
            out,
            vec![
                WebHit {
                    label: "Direct hit".to_string(),
                    url: "https://a.example".to_string()
                },
                WebHit {
                    label: "Nested one".to_string(),
                    url: "https://b.example".to_string()
                },
                WebHit {
                    label: "Nested two".to_string(),
                    url: "https://c.example".to_string()
                },
            ]
        );
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
    async fn autocomplete_round_trip_against_fixture() {
        let app = Router::new().route(
            "/ac/",
            get(|| async {
                axum::Json(serde_json::json!([
                    {"phrase": "mercury planet"},
                    {"phrase": "mercury element"}
                ]))
            }),
        );
        let addr = fixture_addr(app).await;
        let ddg = DuckDuckGo::with_endpoints(
            reqwest::Client::new(),
            format!("http://{addr}/ac/"),
            format!("http://{addr}/"),
        );
        let out = ddg.complete("mercury").await.unwrap();
        assert_eq!(out, vec!["mercury planet", "mercury element"]);
    }

    #[tokio::test]
    async fn empty_partial_skips_the_network_entirely() {
        // Endpoint is unreachable; an empty partial must still succeed.
        let ddg = DuckDuckGo::with_endpoints(
            reqwest::Client::new(),
            "http://127.0.0.1:9/ac/",
            "http://127.0.0.1:9/",
        );
        assert!(ddg.complete("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn web_search_round_trip_against_fixture() {
        let app = Router::new().route(
            "/",
            get(|| async {
                axum::Json(serde_json::json!({
                    "RelatedTopics": [
                        {"Text": "Rust (programming language)", "FirstURL": "https://en.wikipedia.org/wiki/Rust"}
                    ]
                }))
            }),
        );
        let addr = fixture_addr(app).await;
        let ddg = DuckDuckGo::with_endpoints(
            reqwest::Client::new(),
            format!("http://{addr}/ac/"),
            format!("http://{addr}/"),
        );
        let out = ddg.web_search("rust").await.unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].label, "Rust (programming language)");
    }
}
