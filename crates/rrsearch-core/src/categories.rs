//! Category tree classification and facet extraction.
//!
//! The catalog's categories form a tree via `parent_category`
//! back-references. Ancestry walks are bounded to a fixed hop count rather
//! than trusting the tree to be acyclic; a node still unresolved at the
//! bound is treated as its own root.

use crate::types::{Category, CategoryFacet, CategoryRef};

/// Upper bound on `parent_category` hops during a root walk.
pub const MAX_ANCESTRY_HOPS: usize = 16;

/// Handles classified into the product-type group.
const TYPE_HANDLES: &[&str] = &["music", "bundles", "merch"];

/// Handles classified into the genre group.
const GENRE_HANDLES: &[&str] = &["metal", "death", "doom", "grind", "sludge"];

/// Structural handles never surfaced as filterable facets.
const STRUCTURAL_HANDLES: &[&str] = &["artists", "genres"];

/// Root handle whose entire subtree is excluded from facets.
const ARTIST_ROOT_HANDLE: &str = "artists";

/// Type and genre descriptor lists extracted from a record's categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryGroups {
    pub type_categories: Vec<CategoryRef>,
    pub genre_categories: Vec<CategoryRef>,
}

/// Display label for a category: its name when present, otherwise a
/// title-cased rendering of its handle.
#[must_use]
pub fn category_label(category: &Category) -> String {
    match category.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name.to_owned(),
        _ => title_case_handle(&category.handle),
    }
}

/// Collects deduplicated type/genre descriptors from a category list.
///
/// Only handles on the fixed allow-lists are grouped; `exclude` drops
/// caller-supplied handles from both groups.
#[must_use]
pub fn classify_groups(categories: &[Category], exclude: &[&str]) -> CategoryGroups {
    let mut groups = CategoryGroups::default();

    for category in categories {
        let handle = category.handle.as_str();
        if handle.is_empty() || exclude.contains(&handle) {
            continue;
        }

        let target = if TYPE_HANDLES.contains(&handle) {
            &mut groups.type_categories
        } else if GENRE_HANDLES.contains(&handle) {
            &mut groups.genre_categories
        } else {
            continue;
        };

        if !target.iter().any(|r| r.handle == handle) {
            target.push(CategoryRef {
                handle: handle.to_owned(),
                label: category_label(category),
            });
        }
    }

    groups
}

/// Walks `parent_category` to the taxonomy root, bounded by
/// [`MAX_ANCESTRY_HOPS`]. A category with no ancestors is its own root.
#[must_use]
pub fn root_of(category: &Category) -> &Category {
    let mut current = category;
    for _ in 0..MAX_ANCESTRY_HOPS {
        match current.parent_category.as_deref() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}

/// Builds the filterable, non-artist facet list.
///
/// Excludes structural handles (`artists`, `genres`) and any category whose
/// root ancestor is the artists subtree. Each retained facet carries its own
/// handle/label plus its root's, so the UI can group facets under their
/// taxonomy root.
#[must_use]
pub fn facet_categories(categories: &[Category]) -> Vec<CategoryFacet> {
    let mut facets: Vec<CategoryFacet> = Vec::new();

    for category in categories {
        let handle = category.handle.as_str();
        if handle.is_empty() || STRUCTURAL_HANDLES.contains(&handle) {
            continue;
        }

        let root = root_of(category);
        if root.handle == ARTIST_ROOT_HANDLE {
            continue;
        }

        if facets.iter().any(|f| f.handle == handle) {
            continue;
        }

        facets.push(CategoryFacet {
            handle: handle.to_owned(),
            label: category_label(category),
            root_handle: root.handle.clone(),
            root_label: category_label(root),
        });
    }

    facets
}

/// `"black-metal"` → `"Black Metal"`.
fn title_case_handle(handle: &str) -> String {
    handle
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
