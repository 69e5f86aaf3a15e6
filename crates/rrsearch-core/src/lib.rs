//! Domain types and pure logic for the storefront search pipeline.
//!
//! Everything in this crate is side-effect free: slug derivation, stock
//! resolution, category facet extraction, and the catalog-record → search-hit
//! transformation. HTTP clients live in `rrsearch-index` and
//! `rrsearch-catalog`; orchestration lives in `rrsearch-pipeline`.

pub mod app_config;
pub mod categories;
pub mod config;
pub mod hit;
pub mod slug;
pub mod stock;
mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use hit::to_canonical_hit;
pub use types::{
    CalculatedPrice, CatalogRecord, CatalogVariant, Category, CategoryFacet, CategoryRef,
    Collection, FacetMaps, HitVariant, ProductOption, ProductTag, ProductType, SearchHit, Slug,
    StockStatus,
};
