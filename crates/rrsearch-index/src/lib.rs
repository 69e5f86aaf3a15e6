//! HTTP client for the search index service.
//!
//! Translates a structured [`SearchRequest`] into the index's filter/sort
//! grammar ([`plan`]), issues one query per call ([`client`]), and maps the
//! partially-typed documents the index returns back into canonical hits and
//! typed facet maps ([`normalize`]). Index documents lag the system of
//! record; reconciling that staleness is the job of `rrsearch-pipeline`, not
//! this crate.

pub mod client;
mod error;
pub mod normalize;
pub mod plan;
mod types;

pub use client::SearchClient;
pub use error::IndexError;
pub use types::{IndexQuery, IndexResponse, SearchFilters, SearchRequest, SearchResults, SortOrder};
