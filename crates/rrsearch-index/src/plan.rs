//! Query planning: translation from a [`SearchRequest`] into the index's
//! filter/sort grammar.
//!
//! The index accepts Meilisearch-style filter expressions (`field IN [..]`,
//! `field != value`, clauses joined by `AND`) and `field:direction` sort
//! directives. Planning is pure; the HTTP call lives in [`crate::client`].

use rrsearch_core::StockStatus;

use crate::types::{IndexQuery, SearchRequest, SortOrder};

/// The fixed set of dimensions facet distributions are requested for.
pub const FACET_DIMENSIONS: [&str; 5] =
    ["genres", "formats", "categories", "variants", "product_types"];

/// Builds the complete query body for one search call. Offset and limit pass
/// through untouched; there is no client-side pagination.
#[must_use]
pub fn build_query(request: &SearchRequest) -> IndexQuery {
    IndexQuery {
        q: request.query.clone(),
        limit: request.limit,
        offset: request.offset,
        filter: build_filter(request),
        sort: sort_directives(request.sort),
        facets: FACET_DIMENSIONS.iter().map(|d| (*d).to_owned()).collect(),
    }
}

/// ANDs one `IN [..]` clause per non-empty filter list, plus a sold-out
/// exclusion when `in_stock_only` is set. Returns `None` when nothing
/// filters.
#[must_use]
pub fn build_filter(request: &SearchRequest) -> Option<String> {
    let filters = &request.filters;
    let mut clauses: Vec<String> = Vec::new();

    for (field, values) in [
        ("genres", &filters.genres),
        ("formats", &filters.formats),
        ("categories", &filters.categories),
        ("variants", &filters.variants),
        ("product_types", &filters.product_types),
    ] {
        if let Some(clause) = in_clause(field, values) {
            clauses.push(clause);
        }
    }

    if request.in_stock_only {
        clauses.push(format!("stock_status != \"{}\"", StockStatus::SoldOut));
    }

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(" AND "))
    }
}

/// Maps the UI sort to index sort directives. Alphabetical and unrecognized
/// sorts fall back to the index's default order (no directive).
#[must_use]
pub fn sort_directives(sort: Option<SortOrder>) -> Vec<String> {
    match sort {
        Some(SortOrder::Newest) => vec!["created_at:desc".to_owned()],
        Some(SortOrder::PriceLow) => vec!["price_amount:asc".to_owned()],
        Some(SortOrder::PriceHigh) => vec!["price_amount:desc".to_owned()],
        Some(SortOrder::Alphabetical) | None => Vec::new(),
    }
}

fn in_clause(field: &str, values: &[String]) -> Option<String> {
    if values.is_empty() {
        return None;
    }
    let quoted: Vec<String> = values.iter().map(|v| quote(v)).collect();
    Some(format!("{field} IN [{}]", quoted.join(", ")))
}

/// Quotes a filter value, escaping embedded backslashes and double quotes.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
