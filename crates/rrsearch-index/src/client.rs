//! HTTP client for the search index's query endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use rrsearch_core::AppConfig;

use crate::error::IndexError;
use crate::normalize::normalize_response;
use crate::plan::build_query;
use crate::types::{IndexResponse, SearchRequest, SearchResults};

/// Client for the search index service.
///
/// Constructed once at startup and passed by reference; there is no hidden
/// module-level instance. Construction fails fast on a blank endpoint or API
/// key so misconfiguration surfaces as an error instead of empty results.
#[derive(Debug)]
pub struct SearchClient {
    client: Client,
    base_url: Url,
    api_key: String,
    index_name: String,
}

impl SearchClient {
    /// Creates a client for the given index endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Config`] if `base_url`, `api_key`, or
    /// `index_name` is blank or the URL does not parse, and
    /// [`IndexError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(
        base_url: &str,
        api_key: &str,
        index_name: &str,
        timeout: Duration,
    ) -> Result<Self, IndexError> {
        if base_url.trim().is_empty() {
            return Err(IndexError::Config("index endpoint is blank".into()));
        }
        if api_key.trim().is_empty() {
            return Err(IndexError::Config("index API key is blank".into()));
        }
        if index_name.trim().is_empty() {
            return Err(IndexError::Config("index name is blank".into()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rrsearch/0.1 (storefront-search)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joined paths append rather than replace the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| IndexError::Config(format!("invalid index URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
            index_name: index_name.to_owned(),
        })
    }

    /// Creates a client from the loaded [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`SearchClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, IndexError> {
        Self::new(
            &config.index_url,
            &config.index_api_key,
            &config.index_name,
            config.request_timeout(),
        )
    }

    /// Plans and issues one index query, returning normalized results.
    ///
    /// Index failures propagate: this subsystem never synthesizes an empty
    /// result set on upstream failure (a failed search is a failed search).
    /// Malformed individual documents, by contrast, are normalized
    /// field-by-field and never fail the call.
    ///
    /// # Errors
    ///
    /// - [`IndexError::Http`] on network failure or a non-2xx status.
    /// - [`IndexError::Deserialize`] if the response envelope is not JSON.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults, IndexError> {
        let query = build_query(request);
        let url = self.search_url()?;

        tracing::debug!(
            query = %query.q,
            filter = query.filter.as_deref().unwrap_or(""),
            "issuing index query"
        );

        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.api_key)
            .json(&query)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let raw: IndexResponse =
            serde_json::from_str(&body).map_err(|e| IndexError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        Ok(normalize_response(raw, request.offset))
    }

    fn search_url(&self) -> Result<Url, IndexError> {
        self.base_url
            .join(&format!("indexes/{}/search", self.index_name))
            .map_err(|e| IndexError::Config(format!("invalid index name: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SearchClient {
        SearchClient::new(base_url, "test-key", "products", Duration::from_secs(30))
            .expect("client construction should not fail")
    }

    #[test]
    fn search_url_joins_index_name() {
        let client = test_client("http://localhost:7700");
        let url = client.search_url().expect("url should build");
        assert_eq!(url.as_str(), "http://localhost:7700/indexes/products/search");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = test_client("http://localhost:7700///");
        let url = client.search_url().expect("url should build");
        assert_eq!(url.as_str(), "http://localhost:7700/indexes/products/search");
    }

    #[test]
    fn blank_endpoint_fails_construction() {
        let err = SearchClient::new("  ", "key", "products", Duration::from_secs(30)).unwrap_err();
        assert!(matches!(err, IndexError::Config(_)));
    }

    #[test]
    fn blank_api_key_fails_construction() {
        let err = SearchClient::new("http://localhost:7700", "", "products", Duration::from_secs(30))
            .unwrap_err();
        assert!(matches!(err, IndexError::Config(_)));
    }
}
