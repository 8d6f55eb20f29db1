//! Free-text search, sorting, and pagination helpers.
//!
//! This module lives in `core` (zero internal deps) so the same matching
//! semantics can be exercised by the store layer, the API layer, and unit
//! tests without touching the backing store. The store's native text search
//! is deliberately not used: matching is AND-across-terms with
//! OR-across-fields, which the store's predicate surface cannot express.

use serde::{Deserialize, Serialize};

use crate::disc::DiscRecord;

// ---------------------------------------------------------------------------
// Pagination constants
// ---------------------------------------------------------------------------

/// Default number of discs per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Maximum number of discs per page.
pub const MAX_PAGE_LIMIT: i64 = 500;

/// Rows per request against the backing store. The store silently truncates
/// result sets beyond this window, so exhaustive reads must be chunked.
pub const CHUNK_SIZE: i64 = 1000;

/// Oversized-window multiplier for paged multi-term search.
pub const SEARCH_WINDOW_FACTOR: i64 = 3;

/// Floor for the oversized search window.
pub const MIN_SEARCH_WINDOW: i64 = 1000;

/// Clamp a user-provided page limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1).min(MAX_PAGE_LIMIT)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Candidate-set size for paged multi-term search.
///
/// Multi-term matching happens in process, so the paged path fetches an
/// oversized window (at least [`SEARCH_WINDOW_FACTOR`] times the requested
/// page, never less than [`MIN_SEARCH_WINDOW`] rows) and filters that.
pub fn search_window(limit: i64) -> i64 {
    (limit * SEARCH_WINDOW_FACTOR).max(MIN_SEARCH_WINDOW)
}

// ---------------------------------------------------------------------------
// Term matching
// ---------------------------------------------------------------------------

/// Split a raw query into lower-cased search terms.
///
/// Splits on runs of whitespace. An empty or whitespace-only query yields no
/// terms, which callers treat as "no filter".
pub fn tokenize(query: &str) -> Vec<String> {
    query.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// Parse a term as a rack identifier. Rack ids are positive integers.
pub fn parse_rack_term(term: &str) -> Option<i64> {
    term.parse::<i64>().ok().filter(|n| *n > 0)
}

/// Check whether a disc matches a single lower-cased term.
///
/// A term matches if any searchable text field contains it as a
/// case-insensitive substring, or if it parses as an integer equal to the
/// disc's rack identifier.
pub fn matches_term(disc: &DiscRecord, term: &str) -> bool {
    if let Some(rack_id) = parse_rack_term(term) {
        if disc.rack_id == Some(rack_id) {
            return true;
        }
    }

    disc.searchable_text()
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term))
}

/// Check whether a disc matches every term (AND across terms, OR across
/// fields within a term).
pub fn matches_all_terms(disc: &DiscRecord, terms: &[String]) -> bool {
    terms.iter().all(|term| matches_term(disc, term))
}

// ---------------------------------------------------------------------------
// Range filtering
// ---------------------------------------------------------------------------

/// Drop discs outside the inclusive rack-id range.
///
/// Discs with no rack id are dropped whenever either bound is set: a record
/// that was never assigned a rack cannot satisfy a rack-range filter.
pub fn apply_rack_range(discs: &mut Vec<DiscRecord>, min: Option<i64>, max: Option<i64>) {
    if min.is_none() && max.is_none() {
        return;
    }
    discs.retain(|disc| match disc.rack_id {
        Some(rack_id) => {
            min.is_none_or(|lo| rack_id >= lo) && max.is_none_or(|hi| rack_id <= hi)
        }
        None => false,
    });
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Ordering applied to a materialized disc list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Creation time, most recent first (default).
    #[default]
    Newest,
    /// Creation time, oldest first.
    Oldest,
    /// Rack identifier ascending; missing rack ids sort as 0.
    RackIdAsc,
    /// Rack identifier descending; missing rack ids sort as 0.
    RackIdDesc,
}

/// Sort a materialized disc list in place.
///
/// Pure and store-free. Tie order for equal sort keys is unspecified.
pub fn sort_discs(discs: &mut [DiscRecord], order: SortOrder) {
    match order {
        SortOrder::Newest => discs.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => discs.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::RackIdAsc => discs.sort_by_key(|d| d.rack_sort_key()),
        SortOrder::RackIdDesc => discs.sort_by_key(|d| std::cmp::Reverse(d.rack_sort_key())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
