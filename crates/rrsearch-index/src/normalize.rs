//! Total-default normalization of raw index documents.
//!
//! The index returns partially-typed JSON that may lag the catalog for
//! price, stock, and classification fields. Every field here is coerced
//! individually — missing array → empty, missing string → `None` — so a
//! malformed or half-indexed document degrades instead of erroring.
//! Identity always flows from `handle`; nothing else is trusted for it.

use chrono::{DateTime, Utc};
use serde_json::Value;

use rrsearch_core::slug::{derive_slug, SlugSource};
use rrsearch_core::stock::parse_status;
use rrsearch_core::{
    CategoryFacet, CategoryRef, FacetMaps, HitVariant, SearchHit, StockStatus,
};

use crate::types::{IndexResponse, SearchResults};

/// Normalizes a full index response into the pipeline's result shape.
///
/// `requested_offset` backstops responses that omit their offset.
#[must_use]
pub fn normalize_response(response: IndexResponse, requested_offset: u32) -> SearchResults {
    let total = resolve_total(&response);
    let facets = normalize_facets(response.facet_distribution.as_ref());
    let offset = response.offset.unwrap_or(u64::from(requested_offset));
    let hits = response.hits.iter().map(normalize_hit).collect();

    SearchResults {
        hits,
        total,
        offset,
        facets,
    }
}

/// Maps one raw index document to a canonical [`SearchHit`]. Never fails.
#[must_use]
pub fn normalize_hit(doc: &Value) -> SearchHit {
    let id = str_field(doc, "id").unwrap_or_default();
    let handle = str_field(doc, "handle").unwrap_or_default();
    let title = str_field(doc, "title");
    let collection_title = str_field(doc, "collection_title");

    // Identity fields missing from the document are re-derived the same way
    // the hit transformer derives them, so both sources agree on slugs.
    let derived = derive_slug(&SlugSource {
        title: title.as_deref(),
        metadata: None,
        collection_title: collection_title.as_deref(),
        handle: (!handle.is_empty()).then_some(handle.as_str()),
    });
    let artist = str_field(doc, "artist").unwrap_or_else(|| derived.artist.clone());
    let album = str_field(doc, "album").unwrap_or_else(|| derived.album.clone());
    let mut slug = derived;
    slug.artist.clone_from(&artist);
    slug.album.clone_from(&album);
    if let Some(s) = str_field(doc, "artist_slug") {
        slug.artist_slug = s;
    }
    if let Some(s) = str_field(doc, "album_slug") {
        slug.album_slug = s;
    }

    SearchHit {
        id,
        handle,
        title,
        artist,
        album,
        slug,
        thumbnail: str_field(doc, "thumbnail"),
        collection_title,
        default_variant: doc.get("default_variant").and_then(hit_variant),
        genres: string_list(doc.get("genres")),
        genre_categories: category_refs(doc.get("genre_categories")),
        type_categories: category_refs(doc.get("type_categories")),
        formats: string_list(doc.get("formats")),
        category_facets: facet_list(doc.get("category_facets")),
        price_amount: doc.get("price_amount").and_then(Value::as_f64),
        created_at: doc.get("created_at").and_then(timestamp),
        stock_status: stock_field(doc.get("stock_status")),
    }
}

/// Copies the index's facet distribution into typed maps; dimensions absent
/// from the response become empty maps.
#[must_use]
pub fn normalize_facets(
    distribution: Option<&std::collections::HashMap<String, std::collections::HashMap<String, u64>>>,
) -> FacetMaps {
    let take = |dimension: &str| {
        distribution
            .and_then(|d| d.get(dimension))
            .cloned()
            .unwrap_or_default()
    };

    FacetMaps {
        genres: take("genres"),
        formats: take("formats"),
        categories: take("categories"),
        variants: take("variants"),
        product_types: take("product_types"),
    }
}

/// Exact total, then estimated total, then the number of hits returned.
#[must_use]
pub fn resolve_total(response: &IndexResponse) -> u64 {
    response
        .total_hits
        .or(response.estimated_total_hits)
        .unwrap_or(response.hits.len() as u64)
}

fn hit_variant(value: &Value) -> Option<HitVariant> {
    let obj = value.as_object()?;
    Some(HitVariant {
        id: str_field(value, "id").unwrap_or_default(),
        title: str_field(value, "title"),
        price_amount: obj.get("price_amount").and_then(Value::as_f64),
        currency_code: str_field(value, "currency_code"),
        inventory_quantity: obj.get("inventory_quantity").and_then(Value::as_i64),
        stock_status: obj
            .get("stock_status")
            .and_then(Value::as_str)
            .and_then(parse_status)
            .unwrap_or(StockStatus::Unknown),
    })
}

/// `None` when the field is absent; `Some(Unknown)` when present but
/// unclassifiable. The hydration predicate treats both as stale.
fn stock_field(value: Option<&Value>) -> Option<StockStatus> {
    let raw = value?.as_str()?;
    Some(parse_status(raw).unwrap_or(StockStatus::Unknown))
}

// Blank is absent, matching the catalog-side field policy.
fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn category_refs(value: Option<&Value>) -> Vec<CategoryRef> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let handle = str_field(item, "handle")?;
                    let label = str_field(item, "label").unwrap_or_else(|| handle.clone());
                    Some(CategoryRef { handle, label })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn facet_list(value: Option<&Value>) -> Vec<CategoryFacet> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let handle = str_field(item, "handle")?;
                    let label = str_field(item, "label").unwrap_or_else(|| handle.clone());
                    let root_handle =
                        str_field(item, "root_handle").unwrap_or_else(|| handle.clone());
                    let root_label =
                        str_field(item, "root_label").unwrap_or_else(|| root_handle.clone());
                    Some(CategoryFacet {
                        handle,
                        label,
                        root_handle,
                        root_label,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    if let Some(raw) = value.as_str() {
        return DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }
    value.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_document_normalizes_all_fields() {
        let doc = json!({
            "id": "prod_01",
            "handle": "portal-avow",
            "title": "Portal - Avow - LP",
            "artist": "Portal",
            "album": "Avow",
            "artist_slug": "portal",
            "album_slug": "avow",
            "collection_title": "Portal",
            "thumbnail": "https://cdn.example/avow.jpg",
            "default_variant": {
                "id": "var_1",
                "title": "LP",
                "price_amount": 28.0,
                "currency_code": "EUR",
                "inventory_quantity": 4,
                "stock_status": "low_stock"
            },
            "genres": ["death metal"],
            "genre_categories": [{"handle": "doom", "label": "Doom"}],
            "formats": ["LP"],
            "category_facets": [
                {"handle": "vinyl", "label": "Vinyl", "root_handle": "format", "root_label": "Format"}
            ],
            "price_amount": 28.0,
            "created_at": "2026-01-15T12:00:00Z",
            "stock_status": "low_stock"
        });

        let hit = normalize_hit(&doc);
        assert_eq!(hit.handle, "portal-avow");
        assert_eq!(hit.artist, "Portal");
        assert_eq!(hit.slug.album_slug, "avow");
        assert_eq!(hit.stock_status, Some(StockStatus::LowStock));
        assert_eq!(hit.price_amount, Some(28.0));
        let variant = hit.default_variant.expect("variant should normalize");
        assert_eq!(variant.inventory_quantity, Some(4));
        assert_eq!(variant.stock_status, StockStatus::LowStock);
        assert!(hit.created_at.is_some());
        assert_eq!(hit.category_facets[0].root_handle, "format");
    }

    #[test]
    fn empty_document_never_fails() {
        let hit = normalize_hit(&json!({}));
        assert!(hit.id.is_empty());
        assert!(hit.handle.is_empty());
        assert!(hit.genres.is_empty());
        assert!(hit.default_variant.is_none());
        assert_eq!(hit.stock_status, None);
        // Identity still derives to something non-empty.
        assert!(!hit.artist.is_empty());
    }

    #[test]
    fn missing_identity_is_derived_from_handle() {
        let hit = normalize_hit(&json!({"handle": "witchtrap-desecration-ritual"}));
        assert_eq!(hit.artist, "witchtrap");
        assert_eq!(hit.album, "desecration ritual");
        assert_eq!(hit.slug.artist_slug, "witchtrap");
    }

    #[test]
    fn whitespace_only_strings_are_absent() {
        let hit = normalize_hit(&json!({
            "handle": "portal-avow",
            "title": "\t",
            "collection_title": "  "
        }));
        assert!(hit.title.is_none());
        assert!(hit.collection_title.is_none());
    }

    #[test]
    fn unclassifiable_stock_string_is_unknown() {
        let hit = normalize_hit(&json!({"stock_status": "???"}));
        assert_eq!(hit.stock_status, Some(StockStatus::Unknown));
    }

    #[test]
    fn wrong_shapes_degrade_per_field() {
        let doc = json!({
            "handle": "bolt-thrower-warmaster",
            "genres": "doom",
            "formats": [1, 2, "LP"],
            "default_variant": "not-an-object",
            "price_amount": "free"
        });
        let hit = normalize_hit(&doc);
        assert!(hit.genres.is_empty());
        assert_eq!(hit.formats, vec!["LP".to_owned()]);
        assert!(hit.default_variant.is_none());
        assert_eq!(hit.price_amount, None);
    }

    #[test]
    fn total_prefers_exact_then_estimated_then_count() {
        let base = IndexResponse {
            hits: vec![json!({}), json!({})],
            facet_distribution: None,
            total_hits: None,
            estimated_total_hits: None,
            offset: None,
        };

        assert_eq!(resolve_total(&base), 2);

        let estimated = IndexResponse {
            estimated_total_hits: Some(40),
            ..base.clone()
        };
        assert_eq!(resolve_total(&estimated), 40);

        let exact = IndexResponse {
            total_hits: Some(37),
            ..estimated
        };
        assert_eq!(resolve_total(&exact), 37);
    }

    #[test]
    fn absent_facet_dimensions_become_empty_maps() {
        let mut distribution = std::collections::HashMap::new();
        distribution.insert(
            "genres".to_owned(),
            std::collections::HashMap::from([("doom".to_owned(), 3_u64)]),
        );
        let facets = normalize_facets(Some(&distribution));
        assert_eq!(facets.genres.get("doom"), Some(&3));
        assert!(facets.formats.is_empty());
        assert!(facets.product_types.is_empty());
    }

    #[test]
    fn response_offset_falls_back_to_request() {
        let response = IndexResponse {
            hits: vec![],
            facet_distribution: None,
            total_hits: None,
            estimated_total_hits: None,
            offset: None,
        };
        let results = normalize_response(response, 24);
        assert_eq!(results.offset, 24);
    }
}
