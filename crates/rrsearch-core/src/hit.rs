//! Transformation from an authoritative catalog record to the canonical
//! search hit view model.
//!
//! This is the single source of truth for "what a fresh hit looks like": the
//! index ingestion pipeline and the hydration layer both go through it, so
//! stale index documents and live catalog records converge on one shape.

use crate::categories::{classify_groups, facet_categories};
use crate::slug::slug_for_record;
use crate::stock::{aggregate_stock, resolve_variant_stock};
use crate::types::{CatalogRecord, CatalogVariant, HitVariant, SearchHit};

/// Builds the canonical [`SearchHit`] for a catalog record.
///
/// Pure and total: records without variants, options, or categories produce
/// a hit with `default_variant: None`, empty lists, and `price_amount: None`
/// rather than an error.
#[must_use]
pub fn to_canonical_hit(record: &CatalogRecord) -> SearchHit {
    let slug = slug_for_record(record);
    let default_variant = record.variants.first().map(to_hit_variant);
    let stock_status = aggregate_stock(record.variants.iter().map(resolve_variant_stock));

    let format_label = format_label(record, default_variant.as_ref());
    let formats = format_label.into_iter().collect();

    let genres = record
        .tags
        .iter()
        .filter(|t| !t.value.trim().is_empty())
        .map(|t| t.value.clone())
        .collect();

    let groups = classify_groups(&record.categories, &[]);
    let category_facets = facet_categories(&record.categories);

    let price_amount = default_variant.as_ref().and_then(|v| v.price_amount);
    let collection_title = record
        .collection
        .as_ref()
        .and_then(|c| c.title.as_deref())
        .filter(|t| !t.trim().is_empty())
        .map(str::to_owned);

    SearchHit {
        id: record.id.clone(),
        handle: record.handle.clone(),
        title: record.title.clone(),
        artist: slug.artist.clone(),
        album: slug.album.clone(),
        slug,
        thumbnail: record.thumbnail.clone(),
        collection_title,
        default_variant,
        genres,
        genre_categories: groups.genre_categories,
        type_categories: groups.type_categories,
        formats,
        category_facets,
        price_amount,
        created_at: record.created_at,
        stock_status: Some(stock_status),
    }
}

/// The hit-level format label: the `"Format"` option's first value when
/// present, otherwise the default variant's title.
fn format_label(record: &CatalogRecord, default_variant: Option<&HitVariant>) -> Option<String> {
    let from_option = record
        .options
        .iter()
        .find(|o| o.title.eq_ignore_ascii_case("format"))
        .and_then(|o| o.values.first())
        .filter(|v| !v.trim().is_empty())
        .cloned();

    from_option.or_else(|| {
        default_variant
            .and_then(|v| v.title.as_deref())
            .filter(|t| !t.trim().is_empty())
            .map(str::to_owned)
    })
}

fn to_hit_variant(variant: &CatalogVariant) -> HitVariant {
    HitVariant {
        id: variant.id.clone(),
        title: variant.title.clone(),
        price_amount: variant.calculated_price.as_ref().and_then(|p| p.amount),
        currency_code: variant
            .calculated_price
            .as_ref()
            .and_then(|p| p.currency_code.clone()),
        inventory_quantity: variant.inventory_quantity,
        stock_status: resolve_variant_stock(variant),
    }
}
