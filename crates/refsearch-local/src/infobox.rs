//! Best-effort infobox extraction from raw article HTML.
//!
//! Locates the first `table.infobox`, takes the first image's `src`
//! (protocol-relative sources normalized to `https:`) and every row with
//! both a header and a value cell. Pages without an infobox yield an empty
//! [`Enrichment`]; callers treat that the same as a failed fetch.

use crate::{endpoint_from_env, FETCH_TIMEOUT};
use refsearch_core::{Enrichment, Error, PageEnrich, Result};

fn norm_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_image_src(src: &str, base_url: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }
    if let Some(rest) = src.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if src.starts_with("http://") || src.starts_with("https://") {
        return Some(src.to_string());
    }
    // Relative src: resolve against the article's canonical URL.
    url::Url::parse(base_url)
        .and_then(|base| base.join(src))
        .map(|u| u.to_string())
        .ok()
}

/// Extract infobox image and (label, value) attribute rows from `html`.
pub fn extract_infobox(html: &str, base_url: &str) -> Enrichment {
    let doc = html_scraper::Html::parse_document(html);
    let Ok(table_sel) = html_scraper::Selector::parse("table.infobox") else {
        return Enrichment::default();
    };
    let Some(infobox) = doc.select(&table_sel).next() else {
        return Enrichment::default();
    };

    let image_url = html_scraper::Selector::parse("img").ok().and_then(|sel| {
        infobox
            .select(&sel)
            .find_map(|img| img.value().attr("src"))
            .and_then(|src| normalize_image_src(src, base_url))
    });

    let mut attributes = Vec::new();
    if let (Ok(row_sel), Ok(th_sel), Ok(td_sel)) = (
        html_scraper::Selector::parse("tr"),
        html_scraper::Selector::parse("th"),
        html_scraper::Selector::parse("td"),
    ) {
        for row in infobox.select(&row_sel) {
            let header = row.select(&th_sel).next();
            let value = row.select(&td_sel).next();
            if let (Some(h), Some(v)) = (header, value) {
                let label = norm_ws(&h.text().collect::<Vec<_>>().join(" "));
                let detail = norm_ws(&v.text().collect::<Vec<_>>().join(" "));
                if !label.is_empty() && !detail.is_empty() {
                    attributes.push((label, detail));
                }
            }
        }
    }

    Enrichment {
        image_url,
        attributes,
    }
}

#[derive(Debug, Clone)]
pub struct HtmlEnricher {
    client: reqwest::Client,
    /// Test hook: when set, requests go to this endpoint instead of the
    /// article URL.
    endpoint_override: Option<String>,
}

impl HtmlEnricher {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint_override: endpoint_from_env("REFSEARCH_ENRICH_ENDPOINT"),
        }
    }

    pub fn with_endpoint_override(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_override: Some(endpoint.into()),
        }
    }
}

#[async_trait::async_trait]
impl PageEnrich for HtmlEnricher {
    async fn enrich(&self, url: &str) -> Result<Enrichment> {
        let target = self.endpoint_override.as_deref().unwrap_or(url);
        let resp = self
            .client
            .get(target)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch(format!("enrichment HTTP {status}")));
        }
        let html = resp.text().await.map_err(|e| Error::Fetch(e.to_string()))?;
        Ok(extract_infobox(&html, url))
    }
}
