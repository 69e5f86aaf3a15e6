//! The catalog search pipeline's public surface.
//!
//! Wires the query planner/index client, result normalizer, and hydration
//! layer into one call: `search(request)` → `{hits, total, offset, facets}`.
//! The other public entry point, [`to_canonical_hit`], turns an authoritative
//! catalog record into the same hit shape directly.
//!
//! Both upstream clients are constructed once and owned by the pipeline;
//! nothing is cached across requests and no state is shared between
//! concurrent searches.

pub mod hydrate;

use thiserror::Error;

use rrsearch_catalog::{CatalogClient, CatalogError};
use rrsearch_core::AppConfig;
use rrsearch_index::{IndexError, SearchClient};

pub use rrsearch_core::to_canonical_hit;
pub use rrsearch_index::{SearchFilters, SearchRequest, SearchResults, SortOrder};

/// Errors surfaced by the pipeline.
///
/// Hydration lookup failures are recovered per-hit inside the pipeline and
/// never appear here; `Catalog` only arises from client construction.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// The search pipeline: planner → index → normalizer → hydration.
pub struct SearchPipeline {
    index: SearchClient,
    catalog: CatalogClient,
    hydration_max_concurrency: usize,
}

impl SearchPipeline {
    #[must_use]
    pub fn new(
        index: SearchClient,
        catalog: CatalogClient,
        hydration_max_concurrency: usize,
    ) -> Self {
        Self {
            index,
            catalog,
            hydration_max_concurrency: hydration_max_concurrency.max(1),
        }
    }

    /// Builds both clients from the loaded [`AppConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Index`] or [`PipelineError::Catalog`] when an
    /// endpoint or credential is blank or invalid. Construction-time failure
    /// is deliberate: a misconfigured index must not masquerade as zero
    /// results.
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        Ok(Self::new(
            SearchClient::from_config(config)?,
            CatalogClient::from_config(config)?,
            config.hydration_max_concurrency,
        ))
    }

    /// Runs one search end to end.
    ///
    /// Index failures propagate. Hits whose index document is missing or
    /// stale are refetched from the catalog and patched; a failed refetch
    /// degrades that hit only.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Index`] when the index query itself fails.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResults, PipelineError> {
        let mut results = self.index.search(request).await?;
        results.hits = hydrate::hydrate_hits(
            &self.catalog,
            std::mem::take(&mut results.hits),
            self.hydration_max_concurrency,
        )
        .await;
        Ok(results)
    }

    /// The catalog client, for callers that need direct record lookups.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }
}
