//! Live provider implementations for refsearch.
//!
//! Every provider takes a shared `reqwest::Client` and an endpoint that can
//! be overridden (constructor or `REFSEARCH_*_ENDPOINT` env var) so tests
//! can point at local fixture servers. All calls carry explicit timeouts;
//! a timeout is just another provider failure to the pipeline.

use refsearch_core::{Error, Result};
use std::time::Duration;

pub mod duckduckgo;
pub mod infobox;
pub mod translate;
pub mod wikipedia;

/// Identifying User-Agent sent on every outbound request.
pub const USER_AGENT: &str = "refsearch-local/0.1 (+https://github.com/refsearch/refsearch)";

/// Timeout for article/page fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(8);
/// Timeout for interactive calls (autocomplete).
pub const QUICK_TIMEOUT: Duration = Duration::from_secs(4);

pub(crate) fn endpoint_from_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
}

/// Build the client shared by all providers.
pub fn default_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        // Safety defaults: never hang on DNS/TLS/body stalls. Per-call
        // timeouts below these caps still apply.
        .connect_timeout(Duration::from_secs(4))
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| Error::Fetch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_from_env_trims_and_ignores_empty() {
        std::env::set_var("REFSEARCH_TEST_ENDPOINT", "  http://localhost:9/ ");
        assert_eq!(
            endpoint_from_env("REFSEARCH_TEST_ENDPOINT").as_deref(),
            Some("http://localhost:9")
        );
        std::env::set_var("REFSEARCH_TEST_ENDPOINT", "   ");
        assert_eq!(endpoint_from_env("REFSEARCH_TEST_ENDPOINT"), None);
        std::env::remove_var("REFSEARCH_TEST_ENDPOINT");
    }

    #[test]
    fn default_client_builds() {
        assert!(default_client().is_ok());
    }
}
