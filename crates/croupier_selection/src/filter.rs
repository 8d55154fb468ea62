//! Token filtering.

use croupier_core::{MediaItem, SearchQuery};

/// Searches that match every image.
pub const DEFAULT_WILDCARDS: [&str; 3] = ["any", "anybody", "anyone"];

/// Whether `query` should skip filtering.
///
/// True for an empty query and for a query whose joined search equals one of
/// `wildcards` (compared case-insensitively).
pub fn is_wildcard(query: &SearchQuery, wildcards: &[String]) -> bool {
    query.is_empty()
        || wildcards
            .iter()
            .any(|w| w.eq_ignore_ascii_case(query.as_str()))
}

/// Keep the items whose name contains every search token.
///
/// Wildcard queries keep everything.
pub fn filter_items(
    items: Vec<MediaItem>,
    query: &SearchQuery,
    wildcards: &[String],
) -> Vec<MediaItem> {
    if is_wildcard(query, wildcards) {
        return items;
    }

    items
        .into_iter()
        .filter(|item| query.tokens().iter().all(|t| item.name_contains(t)))
        .collect()
}
