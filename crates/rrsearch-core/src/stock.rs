//! Variant-level stock resolution and product-level aggregation.
//!
//! A variant carries up to four availability signals; exactly one is
//! authoritative at a time, in the fixed precedence implemented by
//! [`resolve_variant_stock`]. Aggregation over a product's variants only
//! declares a product sold out when every *known* variant is confirmed
//! unavailable.

use crate::types::{CatalogVariant, StockStatus};

/// Inventory quantities at or below this count are reported as low stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Resolves a single variant's availability signals into a [`StockStatus`].
///
/// Precedence: explicit inventory quantity, then the status string (via the
/// alias table), then `allow_backorder`, then `manage_inventory == false`
/// (unmanaged inventory is always purchasable). Anything else is `Unknown`.
#[must_use]
pub fn resolve_variant_stock(variant: &CatalogVariant) -> StockStatus {
    if let Some(qty) = variant.inventory_quantity {
        if qty <= 0 {
            return StockStatus::SoldOut;
        }
        if qty <= LOW_STOCK_THRESHOLD {
            return StockStatus::LowStock;
        }
        return StockStatus::InStock;
    }

    if let Some(status) = variant.stock_status.as_deref().and_then(parse_status) {
        return status;
    }

    if variant.allow_backorder == Some(true) {
        return StockStatus::InStock;
    }

    if variant.manage_inventory == Some(false) {
        return StockStatus::InStock;
    }

    StockStatus::Unknown
}

/// Normalizes a free-form status string into a known bucket.
///
/// Matching is case-insensitive and tolerant of spaces/hyphens in place of
/// underscores. Returns `None` for unrecognized values so the caller can
/// fall through to the next signal.
#[must_use]
pub fn parse_status(raw: &str) -> Option<StockStatus> {
    let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
    match normalized.as_str() {
        "in_stock" | "instock" | "backorder" | "available" => Some(StockStatus::InStock),
        "low" | "low_stock" | "limited" | "scarce" => Some(StockStatus::LowStock),
        "out" | "out_of_stock" | "sold" | "sold_out" | "unavailable" => Some(StockStatus::SoldOut),
        _ => None,
    }
}

/// Aggregates variant statuses into one product-level status.
///
/// Unknowns are excluded before aggregation. Empty after filtering →
/// `Unknown`; all remaining sold out → `SoldOut`; any remaining low →
/// `LowStock`; otherwise `InStock`. A single low-stock variant surfaces
/// urgency ahead of a generic in-stock claim.
#[must_use]
pub fn aggregate_stock<I>(statuses: I) -> StockStatus
where
    I: IntoIterator<Item = StockStatus>,
{
    let known: Vec<StockStatus> = statuses
        .into_iter()
        .filter(|s| *s != StockStatus::Unknown)
        .collect();

    if known.is_empty() {
        return StockStatus::Unknown;
    }
    if known.iter().all(|s| *s == StockStatus::SoldOut) {
        return StockStatus::SoldOut;
    }
    if known.contains(&StockStatus::LowStock) {
        return StockStatus::LowStock;
    }
    StockStatus::InStock
}
