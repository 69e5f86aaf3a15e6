//! Domain value types shared across the pipeline.
//!
//! Catalog shapes ([`CatalogRecord`] and friends) model payloads from the
//! catalog service; every externally-sourced field carries `#[serde(default)]`
//! so a partially-populated document deserializes instead of erroring.
//! [`SearchHit`] is the canonical view model produced by both the hit
//! transformer and the index result normalizer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tri-state availability classification with an explicit unknown fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    SoldOut,
    Unknown,
}

impl StockStatus {
    /// Whether the UI should treat this status as purchasable.
    ///
    /// `Unknown` counts as purchasable: an unconfirmed variant is offered
    /// rather than hidden.
    #[must_use]
    pub fn is_purchasable(self) -> bool {
        self != StockStatus::SoldOut
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StockStatus::InStock => "in_stock",
            StockStatus::LowStock => "low_stock",
            StockStatus::SoldOut => "sold_out",
            StockStatus::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

/// Calculated price embedded in a catalog variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatedPrice {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// A purchasable variant of a catalog record.
///
/// The four availability signals are mutually exclusive in authority; see
/// [`crate::stock::resolve_variant_stock`] for the precedence order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogVariant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub calculated_price: Option<CalculatedPrice>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub manage_inventory: Option<bool>,
    #[serde(default)]
    pub allow_backorder: Option<bool>,
    /// Free-form status string from the catalog, e.g. `"in_stock"` or
    /// `"limited"`. Normalized through an alias table during resolution.
    #[serde(default)]
    pub stock_status: Option<String>,
}

/// A node in the catalog's category tree. `parent_category` links toward the
/// taxonomy root; ancestry walks are hop-bounded rather than trusting the
/// tree to be well-formed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parent_category: Option<Box<Category>>,
}

/// A product option (e.g. `"Format"` with values `["LP", "CD"]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductOption {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A product tag; tag values carry genre labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductTag {
    #[serde(default)]
    pub value: String,
}

/// The collection a record belongs to; for releases this is the artist page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub title: Option<String>,
}

/// Product type descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductType {
    #[serde(default)]
    pub value: String,
}

/// An authoritative catalog record, read-only to this subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub collection: Option<Collection>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub options: Vec<ProductOption>,
    #[serde(default)]
    pub variants: Vec<CatalogVariant>,
    #[serde(default)]
    pub tags: Vec<ProductTag>,
    #[serde(default, rename = "type")]
    pub product_type: Option<ProductType>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Derived artist/album identity pair with URL-safe slugs.
///
/// Never persisted; always recomputed from the record. Same input, same slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slug {
    pub artist: String,
    pub album: String,
    pub artist_slug: String,
    pub album_slug: String,
}

/// `{handle, label}` descriptor for a type/genre category group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub handle: String,
    pub label: String,
}

/// A filterable category facet, carrying its taxonomy root so the UI can
/// group facets under their root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFacet {
    pub handle: String,
    pub label: String,
    pub root_handle: String,
    pub root_label: String,
}

/// The variant surfaced on a search hit (the record's storefront default).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitVariant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price_amount: Option<f64>,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    pub stock_status: StockStatus,
}

/// Canonical search result view model.
///
/// Produced by [`crate::hit::to_canonical_hit`] from a fresh catalog record
/// and by the index result normalizer from a (possibly stale) index document.
/// Invariant: every hit traces back to exactly one catalog record by
/// `handle`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub slug: Slug,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub collection_title: Option<String>,
    #[serde(default)]
    pub default_variant: Option<HitVariant>,
    /// Genre labels from product tags.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Genre descriptors from the category tree.
    #[serde(default)]
    pub genre_categories: Vec<CategoryRef>,
    /// Type descriptors (music / bundles / merch) from the category tree.
    #[serde(default)]
    pub type_categories: Vec<CategoryRef>,
    #[serde(default)]
    pub formats: Vec<String>,
    #[serde(default)]
    pub category_facets: Vec<CategoryFacet>,
    #[serde(default)]
    pub price_amount: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// `None` when the source carried no status at all; `Some(Unknown)` when
    /// it carried one that could not be classified.
    #[serde(default)]
    pub stock_status: Option<StockStatus>,
}

/// Value → occurrence-count distributions, one map per filterable dimension.
/// Ephemeral: rebuilt for every query, never cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetMaps {
    #[serde(default)]
    pub genres: HashMap<String, u64>,
    #[serde(default)]
    pub formats: HashMap<String, u64>,
    #[serde(default)]
    pub categories: HashMap<String, u64>,
    #[serde(default)]
    pub variants: HashMap<String, u64>,
    #[serde(default)]
    pub product_types: HashMap<String, u64>,
}
