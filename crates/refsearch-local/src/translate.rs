//! Summary translation via the unofficial `translate_a/single` endpoint.
//!
//! The response is a positional JSON array, not an object: segment `i` of
//! the translation lives at `[0][i][0]`. Parsing is deliberately tolerant;
//! any shape surprise is a translation failure, which callers surface as
//! the literal marker string rather than an error.

use crate::{endpoint_from_env, FETCH_TIMEOUT};
use refsearch_core::{Error, Result, Translate};

#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslate {
    pub fn new(client: reqwest::Client) -> Self {
        let endpoint = endpoint_from_env("REFSEARCH_TRANSLATE_ENDPOINT")
            .unwrap_or_else(|| "https://translate.googleapis.com/translate_a/single".to_string());
        Self { client, endpoint }
    }

    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

/// Join the translated segments out of the positional response array.
fn joined_segments(value: &serde_json::Value) -> Option<String> {
    let segments = value.get(0)?.as_array()?;
    let mut out = String::new();
    for seg in segments {
        if let Some(part) = seg.get(0).and_then(|p| p.as_str()) {
            out.push_str(part);
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[async_trait::async_trait]
impl Translate for GoogleTranslate {
    async fn translate(&self, text: &str, lang: &str) -> Result<String> {
        // English is the identity target in the reference configuration.
        if lang == "en" {
            return Ok(text.to_string());
        }
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", lang),
                ("dt", "t"),
                ("q", text),
            ])
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Translate(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Translate(format!("translate HTTP {status}")));
        }
        let value: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| Error::Translate(e.to_string()))?;
        joined_segments(&value)
            .ok_or_else(|| Error::Translate("unexpected response shape".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use refsearch_core::{translate_or_marker, TRANSLATION_FAILED};

    #[test]
    fn joins_multi_segment_responses() {
        let value: serde_json::Value = serde_json::from_str(
            r#"[[["Primera frase. ","First sentence. ",null,null,10],
                 ["Segunda frase.","Second sentence.",null,null,10]],
                null, "en"]"#,
        )
        .unwrap();
        assert_eq!(
            joined_segments(&value).as_deref(),
            Some("Primera frase. Segunda frase.")
        );
    }

    #[test]
    fn unexpected_shape_is_none() {
        let value = serde_json::json!({"error": "nope"});
        assert!(joined_segments(&value).is_none());
        assert!(joined_segments(&serde_json::json!([])).is_none());
    }

    #[tokio::test]
    async fn english_target_short_circuits_without_network() {
        let t = GoogleTranslate::with_endpoint(reqwest::Client::new(), "http://127.0.0.1:9/");
        assert_eq!(t.translate("hello", "en").await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn round_trip_against_fixture() {
        let app = Router::new().route(
            "/translate_a/single",
            get(|| async {
                axum::Json(serde_json::json!([[["Hola mundo.", "Hello world.", null, null, 10]], null, "en"]))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let t = GoogleTranslate::with_endpoint(
            reqwest::Client::new(),
            format!("http://{addr}/translate_a/single"),
        );
        assert_eq!(t.translate("Hello world.", "es").await.unwrap(), "Hola mundo.");
    }

    #[tokio::test]
    async fn failure_surfaces_as_the_marker_via_helper() {
        let t = GoogleTranslate::with_endpoint(reqwest::Client::new(), "http://127.0.0.1:9/");
        let out = translate_or_marker(&t, "hello", "te").await;
        assert_eq!(out, TRANSLATION_FAILED);
    }
}
