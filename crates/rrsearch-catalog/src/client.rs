//! HTTP client for the catalog service's store API.

use std::time::Duration;

use reqwest::{Client, Url};

use rrsearch_core::{AppConfig, CatalogRecord};

use crate::error::CatalogError;
use crate::types::{ProductFilter, ProductListResponse};

/// Header carrying the store publishable key, when one is configured.
const PUBLISHABLE_KEY_HEADER: &str = "x-publishable-api-key";

/// Read-only client for the catalog service.
///
/// Constructed once at startup and passed by reference. Lookups return
/// `Option` — an unknown handle is an absence, not an error — so the
/// hydration layer can degrade per-hit without special-casing.
#[derive(Debug)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
    publishable_key: Option<String>,
}

impl CatalogClient {
    /// Creates a client for the given catalog endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if `base_url` is blank or does not
    /// parse, and [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        publishable_key: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        if base_url.trim().is_empty() {
            return Err(CatalogError::Config("catalog endpoint is blank".into()));
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
            .map_err(|e| CatalogError::Config(format!("invalid catalog URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            publishable_key: publishable_key
                .filter(|k| !k.trim().is_empty())
                .map(str::to_owned),
        })
    }

    /// Creates a client from the loaded [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Same as [`CatalogClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.catalog_url,
            config.catalog_publishable_key.as_deref(),
            config.request_timeout(),
        )
    }

    /// Fetches the authoritative record for one handle.
    ///
    /// Returns `Ok(None)` when the catalog has no product for the handle
    /// (including a 404 from the service).
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or a non-2xx, non-404
    ///   status.
    /// - [`CatalogError::Deserialize`] if the response is not the expected
    ///   envelope.
    pub async fn get_by_handle(&self, handle: &str) -> Result<Option<CatalogRecord>, CatalogError> {
        let mut url = self.products_url()?;
        url.query_pairs_mut()
            .append_pair("handle", handle)
            .append_pair("limit", "1");

        let response = self.request(url).await?;
        let record = response.products.into_iter().next();
        if record.is_none() {
            tracing::debug!(handle = %handle, "catalog has no record for handle");
        }
        Ok(record)
    }

    /// Lists products matching a filter.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or a non-2xx, non-404
    ///   status.
    /// - [`CatalogError::Deserialize`] if the response is not the expected
    ///   envelope.
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<ProductListResponse, CatalogError> {
        let mut url = self.products_url()?;
        {
            let mut pairs = url.query_pairs_mut();
            for handle in &filter.handles {
                pairs.append_pair("handle[]", handle);
            }
            if let Some(limit) = filter.limit {
                pairs.append_pair("limit", &limit.to_string());
            }
            if let Some(offset) = filter.offset {
                pairs.append_pair("offset", &offset.to_string());
            }
        }

        self.request(url).await
    }

    async fn request(&self, url: Url) -> Result<ProductListResponse, CatalogError> {
        let mut builder = self.client.get(url.clone());
        if let Some(key) = &self.publishable_key {
            builder = builder.header(PUBLISHABLE_KEY_HEADER, key);
        }

        let response = builder.send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(ProductListResponse::default());
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    fn products_url(&self) -> Result<Url, CatalogError> {
        self.base_url
            .join("store/products")
            .map_err(|e| CatalogError::Config(format!("invalid catalog URL: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> CatalogClient {
        CatalogClient::new(base_url, Some("pk_test"), Duration::from_secs(30))
            .expect("client construction should not fail")
    }

    #[test]
    fn products_url_joins_store_path() {
        let client = test_client("http://localhost:9000");
        let url = client.products_url().expect("url should build");
        assert_eq!(url.as_str(), "http://localhost:9000/store/products");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = test_client("http://localhost:9000/");
        let url = client.products_url().expect("url should build");
        assert_eq!(url.as_str(), "http://localhost:9000/store/products");
    }

    #[test]
    fn blank_endpoint_fails_construction() {
        let err = CatalogClient::new("", None, Duration::from_secs(30)).unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn blank_publishable_key_is_dropped() {
        let client = CatalogClient::new("http://localhost:9000", Some("  "), Duration::from_secs(30))
            .expect("client construction should not fail");
        assert!(client.publishable_key.is_none());
    }
}
