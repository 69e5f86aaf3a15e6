//! Hydration: reconciling stale index hits against live catalog state.
//!
//! The search index is eventually consistent and lags the catalog. Hits with
//! missing or stale fields are detected by [`needs_hydration`], their handles
//! deduplicated and refetched concurrently, and the fresh records merged in
//! field-by-field by [`merge_hit`]. A failed lookup means "no improvement
//! available", never an error: the shopper sees slightly stale data instead
//! of a failed search.

use std::collections::{HashMap, HashSet};

use futures::stream::{self, StreamExt};

use rrsearch_catalog::CatalogClient;
use rrsearch_core::{to_canonical_hit, SearchHit, StockStatus};

/// Whether a hit is missing enough to justify a catalog refetch.
///
/// Fires when any of: no formats, no default variant, blank collection
/// title, no genre signal from either tags or categories, missing/unknown
/// stock status, or a default variant without a confirmed inventory signal.
#[must_use]
pub fn needs_hydration(hit: &SearchHit) -> bool {
    if hit.formats.is_empty() {
        return true;
    }

    let Some(variant) = &hit.default_variant else {
        return true;
    };

    if hit
        .collection_title
        .as_deref()
        .is_none_or(|t| t.trim().is_empty())
    {
        return true;
    }

    if hit.genres.is_empty() && hit.genre_categories.is_empty() {
        return true;
    }

    if !matches!(
        hit.stock_status,
        Some(StockStatus::InStock | StockStatus::LowStock | StockStatus::SoldOut)
    ) {
        return true;
    }

    if variant.inventory_quantity.is_none() || variant.stock_status == StockStatus::Unknown {
        return true;
    }

    false
}

/// Merges a fresh catalog-derived hit into an index hit.
///
/// The index value wins unless it is empty/absent — except
/// `default_variant`, `collection_title`, and `stock_status`, which take the
/// fresh value whenever the original is null/unknown. The asymmetry is a
/// deliberate policy choice, kept in this one function so it can be revisited
/// per field.
#[must_use]
pub fn merge_hit(original: SearchHit, fresh: SearchHit) -> SearchHit {
    let slug = if original.slug.artist_slug.is_empty() || original.slug.album_slug.is_empty() {
        fresh.slug
    } else {
        original.slug
    };

    let default_variant = match original.default_variant {
        Some(v) if v.stock_status != StockStatus::Unknown => Some(v),
        stale => fresh.default_variant.or(stale),
    };

    let stock_status = match original.stock_status {
        Some(s) if s != StockStatus::Unknown => Some(s),
        unknown => fresh.stock_status.or(unknown),
    };

    SearchHit {
        id: pick_string(original.id, fresh.id),
        handle: pick_string(original.handle, fresh.handle),
        title: pick_opt_string(original.title, fresh.title),
        artist: pick_string(original.artist, fresh.artist),
        album: pick_string(original.album, fresh.album),
        slug,
        thumbnail: pick_opt_string(original.thumbnail, fresh.thumbnail),
        collection_title: pick_opt_string(original.collection_title, fresh.collection_title),
        default_variant,
        genres: pick_list(original.genres, fresh.genres),
        genre_categories: pick_list(original.genre_categories, fresh.genre_categories),
        type_categories: pick_list(original.type_categories, fresh.type_categories),
        formats: pick_list(original.formats, fresh.formats),
        category_facets: pick_list(original.category_facets, fresh.category_facets),
        price_amount: original.price_amount.or(fresh.price_amount),
        created_at: original.created_at.or(fresh.created_at),
        stock_status,
    }
}

/// Refetches and patches every hit that needs hydration.
///
/// Distinct handles are looked up concurrently, bounded by
/// `max_concurrency`; each failure degrades that hit only. Hit order is
/// preserved.
pub async fn hydrate_hits(
    catalog: &CatalogClient,
    hits: Vec<SearchHit>,
    max_concurrency: usize,
) -> Vec<SearchHit> {
    let handles: Vec<String> = {
        let mut seen: HashSet<&str> = HashSet::new();
        hits.iter()
            .filter(|hit| !hit.handle.is_empty() && needs_hydration(hit))
            .filter(|hit| seen.insert(hit.handle.as_str()))
            .map(|hit| hit.handle.clone())
            .collect()
    };

    if handles.is_empty() {
        return hits;
    }

    let fresh: HashMap<String, SearchHit> = stream::iter(handles)
        .map(|handle| async move {
            match catalog.get_by_handle(&handle).await {
                Ok(Some(record)) => Some((handle, to_canonical_hit(&record))),
                Ok(None) => {
                    tracing::debug!(handle = %handle, "no catalog record for stale hit");
                    None
                }
                Err(e) => {
                    tracing::warn!(
                        handle = %handle,
                        error = %e,
                        "hydration lookup failed; hit returned unpatched"
                    );
                    None
                }
            }
        })
        .buffer_unordered(max_concurrency.max(1))
        .filter_map(|outcome| async move { outcome })
        .collect()
        .await;

    hits.into_iter()
        .map(|hit| {
            if needs_hydration(&hit) {
                if let Some(patch) = fresh.get(&hit.handle) {
                    return merge_hit(hit, patch.clone());
                }
            }
            hit
        })
        .collect()
}

fn pick_string(original: String, fresh: String) -> String {
    if original.trim().is_empty() {
        fresh
    } else {
        original
    }
}

fn pick_opt_string(original: Option<String>, fresh: Option<String>) -> Option<String> {
    original.filter(|s| !s.trim().is_empty()).or(fresh)
}

fn pick_list<T>(original: Vec<T>, fresh: Vec<T>) -> Vec<T> {
    if original.is_empty() {
        fresh
    } else {
        original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rrsearch_core::{HitVariant, Slug};

    fn variant(stock: StockStatus, qty: Option<i64>) -> HitVariant {
        HitVariant {
            id: "var_1".to_owned(),
            title: Some("LP".to_owned()),
            price_amount: Some(28.0),
            currency_code: Some("EUR".to_owned()),
            inventory_quantity: qty,
            stock_status: stock,
        }
    }

    fn complete_hit() -> SearchHit {
        SearchHit {
            id: "prod_01".to_owned(),
            handle: "portal-avow".to_owned(),
            title: Some("Portal - Avow".to_owned()),
            artist: "Portal".to_owned(),
            album: "Avow".to_owned(),
            slug: Slug {
                artist: "Portal".to_owned(),
                album: "Avow".to_owned(),
                artist_slug: "portal".to_owned(),
                album_slug: "avow".to_owned(),
            },
            collection_title: Some("Portal".to_owned()),
            default_variant: Some(variant(StockStatus::InStock, Some(10))),
            genres: vec!["death metal".to_owned()],
            formats: vec!["LP".to_owned()],
            stock_status: Some(StockStatus::InStock),
            price_amount: Some(28.0),
            ..SearchHit::default()
        }
    }

    #[test]
    fn complete_hit_skips_hydration() {
        assert!(!needs_hydration(&complete_hit()));
    }

    #[test]
    fn empty_formats_triggers_hydration() {
        let mut hit = complete_hit();
        hit.formats.clear();
        assert!(needs_hydration(&hit));
    }

    #[test]
    fn missing_default_variant_triggers_hydration() {
        let mut hit = complete_hit();
        hit.default_variant = None;
        assert!(needs_hydration(&hit));
    }

    #[test]
    fn blank_collection_title_triggers_hydration() {
        let mut hit = complete_hit();
        hit.collection_title = Some("  ".to_owned());
        assert!(needs_hydration(&hit));
    }

    #[test]
    fn genre_signal_from_either_source_suffices() {
        let mut hit = complete_hit();
        hit.genres.clear();
        hit.genre_categories = vec![rrsearch_core::CategoryRef {
            handle: "doom".to_owned(),
            label: "Doom".to_owned(),
        }];
        assert!(!needs_hydration(&hit));

        hit.genre_categories.clear();
        assert!(needs_hydration(&hit));
    }

    #[test]
    fn unknown_stock_triggers_hydration() {
        let mut hit = complete_hit();
        hit.stock_status = Some(StockStatus::Unknown);
        assert!(needs_hydration(&hit));

        hit.stock_status = None;
        assert!(needs_hydration(&hit));
    }

    #[test]
    fn variant_without_inventory_signal_triggers_hydration() {
        let mut hit = complete_hit();
        hit.default_variant = Some(variant(StockStatus::InStock, None));
        assert!(needs_hydration(&hit));
    }

    #[test]
    fn merge_fills_empty_formats_from_fresh() {
        let mut original = complete_hit();
        original.formats.clear();
        let mut fresh = complete_hit();
        fresh.formats = vec!["Vinyl".to_owned()];

        let merged = merge_hit(original, fresh);
        assert_eq!(merged.formats, vec!["Vinyl".to_owned()]);
    }

    #[test]
    fn merge_keeps_original_non_empty_fields() {
        let original = complete_hit();
        let mut fresh = complete_hit();
        fresh.title = Some("Renamed".to_owned());
        fresh.genres = vec!["grind".to_owned()];

        let merged = merge_hit(original, fresh);
        assert_eq!(merged.title.as_deref(), Some("Portal - Avow"));
        assert_eq!(merged.genres, vec!["death metal".to_owned()]);
    }

    #[test]
    fn merge_keeps_known_original_stock_over_fresh() {
        let mut original = complete_hit();
        original.stock_status = Some(StockStatus::InStock);
        let mut fresh = complete_hit();
        fresh.stock_status = Some(StockStatus::LowStock);

        let merged = merge_hit(original, fresh);
        assert_eq!(merged.stock_status, Some(StockStatus::InStock));
    }

    #[test]
    fn merge_takes_fresh_stock_when_original_unknown() {
        let mut original = complete_hit();
        original.stock_status = Some(StockStatus::Unknown);
        let mut fresh = complete_hit();
        fresh.stock_status = Some(StockStatus::LowStock);

        let merged = merge_hit(original, fresh);
        assert_eq!(merged.stock_status, Some(StockStatus::LowStock));
    }

    #[test]
    fn merge_replaces_unknown_variant_with_fresh() {
        let mut original = complete_hit();
        original.default_variant = Some(variant(StockStatus::Unknown, None));
        let mut fresh = complete_hit();
        fresh.default_variant = Some(variant(StockStatus::LowStock, Some(2)));

        let merged = merge_hit(original, fresh);
        let v = merged.default_variant.expect("variant expected");
        assert_eq!(v.stock_status, StockStatus::LowStock);
        assert_eq!(v.inventory_quantity, Some(2));
    }

    #[test]
    fn merge_prefers_fresh_collection_title_when_blank() {
        let mut original = complete_hit();
        original.collection_title = None;
        let fresh = complete_hit();

        let merged = merge_hit(original, fresh);
        assert_eq!(merged.collection_title.as_deref(), Some("Portal"));
    }
}
