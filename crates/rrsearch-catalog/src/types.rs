use serde::Deserialize;

use rrsearch_core::CatalogRecord;

/// Filter for the catalog's product listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Restrict to these handles; empty means no handle restriction.
    pub handles: Vec<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Envelope returned by the product listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Vec<CatalogRecord>,
    #[serde(default)]
    pub count: Option<u64>,
}
