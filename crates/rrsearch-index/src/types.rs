//! Request and response types for the index query endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use rrsearch_core::{FacetMaps, SearchHit};

/// Sort orders understood by the query planner.
///
/// `Alphabetical` intentionally maps to no sort directive: the index's
/// default/relevance order already ranks alphabetically for empty queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Alphabetical,
    Newest,
    PriceLow,
    PriceHigh,
}

impl SortOrder {
    /// Parses a UI sort token. Unrecognized tokens yield `None`, which the
    /// planner treats as default ordering.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "alphabetical" => Some(Self::Alphabetical),
            "newest" => Some(Self::Newest),
            "price-low" | "price_low" => Some(Self::PriceLow),
            "price-high" | "price_high" => Some(Self::PriceHigh),
            _ => None,
        }
    }
}

/// Per-dimension filter value lists. Empty lists produce no filter clause.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub genres: Vec<String>,
    pub formats: Vec<String>,
    pub categories: Vec<String>,
    pub variants: Vec<String>,
    pub product_types: Vec<String>,
}

/// A structured search request as shaped by the route layer.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub limit: u32,
    pub offset: u32,
    pub filters: SearchFilters,
    pub sort: Option<SortOrder>,
    pub in_stock_only: bool,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: String::new(),
            limit: 20,
            offset: 0,
            filters: SearchFilters::default(),
            sort: None,
            in_stock_only: false,
        }
    }
}

/// The JSON body posted to the index's search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct IndexQuery {
    pub q: String,
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<String>,
    pub facets: Vec<String>,
}

/// Raw response envelope from the index.
///
/// Every field is defaulted: a minimal `{"hits": []}` response (or even `{}`)
/// deserializes cleanly.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexResponse {
    #[serde(default)]
    pub hits: Vec<serde_json::Value>,
    #[serde(default)]
    pub facet_distribution: Option<HashMap<String, HashMap<String, u64>>>,
    #[serde(default)]
    pub total_hits: Option<u64>,
    #[serde(default)]
    pub estimated_total_hits: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

/// The pipeline's final response shape: canonical hits plus facet
/// distributions and the exact-or-estimated total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub total: u64,
    pub offset: u64,
    pub facets: FacetMaps,
}
