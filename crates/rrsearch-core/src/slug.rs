//! Artist/album identity derivation and slugification.
//!
//! Slugs are pure functions of a record's title/metadata/handle/collection
//! title: never stored, always recomputed, and total — any input yields a
//! non-empty artist, album, and slug pair.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::{CatalogRecord, Slug};

/// Brand default used when a record exposes no usable identity at all.
pub const FALLBACK_ARTIST: &str = "Remorseless Records";

/// Slug used when slugification of a name produces an empty string.
pub const FALLBACK_SLUG: &str = "release";

/// Format tokens recognized as a trailing `" - <format>"` title suffix.
const FORMAT_TOKENS: &[&str] = &[
    "cd", "mc", "lp", "cassette", "vinyl", "2lp", "3lp", "7\"", "tape", "digital", "bundle", "box",
];

/// The identity-bearing fields of a record, borrowed.
///
/// Both catalog records and index documents can be projected into this shape,
/// so either source derives identical slugs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugSource<'a> {
    pub title: Option<&'a str>,
    pub metadata: Option<&'a serde_json::Map<String, serde_json::Value>>,
    pub collection_title: Option<&'a str>,
    pub handle: Option<&'a str>,
}

impl<'a> SlugSource<'a> {
    #[must_use]
    pub fn from_record(record: &'a CatalogRecord) -> Self {
        Self {
            title: record.title.as_deref(),
            metadata: record.metadata.as_ref(),
            collection_title: record
                .collection
                .as_ref()
                .and_then(|c| c.title.as_deref()),
            handle: non_blank(&record.handle),
        }
    }
}

/// Derives the `(artist, album)` identity pair and URL-safe slugs.
///
/// Rule order (first match wins): metadata artist+album, then title parsing,
/// then handle parsing, then the collection title / brand default. Metadata
/// may additionally override the slug strings (`artist_slug`/`album_slug`)
/// without affecting the display names.
#[must_use]
pub fn derive_slug(source: &SlugSource<'_>) -> Slug {
    let (mut artist, mut album) = derive_names(source);

    if artist.trim().is_empty() {
        artist = source
            .collection_title
            .and_then(non_blank)
            .unwrap_or(FALLBACK_ARTIST)
            .to_owned();
    }
    if album.trim().is_empty() {
        album.clone_from(&artist);
    }

    let artist_slug = meta_str(source.metadata, "artist_slug")
        .map_or_else(|| slugify(&artist), slugify);
    let album_slug =
        meta_str(source.metadata, "album_slug").map_or_else(|| slugify(&album), slugify);

    Slug {
        artist,
        album,
        artist_slug,
        album_slug,
    }
}

/// Convenience wrapper over [`derive_slug`] for a full catalog record.
#[must_use]
pub fn slug_for_record(record: &CatalogRecord) -> Slug {
    derive_slug(&SlugSource::from_record(record))
}

fn derive_names(source: &SlugSource<'_>) -> (String, String) {
    if let (Some(artist), Some(album)) = (
        meta_str(source.metadata, "artist"),
        meta_str(source.metadata, "album"),
    ) {
        return (artist.to_owned(), album.to_owned());
    }

    if let Some(title) = source.title.and_then(non_blank) {
        return names_from_title(title, source.collection_title);
    }

    if let Some(handle) = source.handle.and_then(non_blank) {
        return names_from_handle(handle);
    }

    let fallback = source
        .collection_title
        .and_then(non_blank)
        .unwrap_or(FALLBACK_ARTIST);
    (fallback.to_owned(), fallback.to_owned())
}

/// Splits `"Artist - Album[ - Format]"` on the first `" - "` separator,
/// first stripping a trailing format suffix when it matches a known token.
fn names_from_title(title: &str, collection_title: Option<&str>) -> (String, String) {
    let stripped = strip_format_suffix(title);

    if let Some((artist, album)) = stripped.split_once(" - ") {
        return (artist.trim().to_owned(), album.trim().to_owned());
    }

    let artist = collection_title.and_then(non_blank).unwrap_or(stripped);
    (artist.to_owned(), stripped.to_owned())
}

fn strip_format_suffix(title: &str) -> &str {
    if let Some((rest, suffix)) = title.rsplit_once(" - ") {
        let token = suffix.trim().to_lowercase();
        if FORMAT_TOKENS.contains(&token.as_str()) {
            return rest;
        }
    }
    title
}

/// `"witchtrap-desecration-ritual"` → `("witchtrap", "desecration ritual")`.
fn names_from_handle(handle: &str) -> (String, String) {
    let normalized = handle.replace('_', "-");
    let mut tokens = normalized.split('-').filter(|t| !t.is_empty());

    let Some(artist) = tokens.next() else {
        return (FALLBACK_ARTIST.to_owned(), FALLBACK_ARTIST.to_owned());
    };

    let album = tokens.collect::<Vec<_>>().join(" ");
    if album.is_empty() {
        (artist.to_owned(), artist.to_owned())
    } else {
        (artist.to_owned(), album)
    }
}

/// Produces a URL-safe slug: NFKD fold dropping combining marks, lowercase,
/// non-alphanumeric runs collapsed to a single hyphen, hyphens trimmed.
/// An empty result becomes [`FALLBACK_SLUG`].
#[must_use]
pub fn slugify(name: &str) -> String {
    let folded: String = name.nfkd().filter(|c| !is_combining_mark(*c)).collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_hyphen = false;
    for c in folded.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        slug
    }
}

fn meta_str<'a>(
    metadata: Option<&'a serde_json::Map<String, serde_json::Value>>,
    key: &str,
) -> Option<&'a str> {
    metadata
        .and_then(|m| m.get(key))
        .and_then(serde_json::Value::as_str)
        .and_then(non_blank)
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
