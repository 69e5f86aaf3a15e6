//! HTTP client for the authoritative catalog service.
//!
//! The catalog is the system of record for products; this subsystem only
//! reads from it — one lookup by handle (used by the hydration layer) and a
//! filtered listing. Records deserialize into [`rrsearch_core::CatalogRecord`]
//! with every field defaulted, so partial payloads never fail a lookup.

mod client;
mod error;
mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::{ProductFilter, ProductListResponse};
