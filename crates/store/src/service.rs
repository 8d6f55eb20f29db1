//! The single entry point UI callers use: paged and exhaustive disc
//! retrieval with free-text search.
//!
//! Every operation is read-only and single-flight: no shared mutable state,
//! no locks, no transactions, so concurrent calls need no coordination.
//! Suspension happens only at the underlying store reads.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use lostflight_core::disc::DiscRecord;
use lostflight_core::search::{
    apply_rack_range, clamp_limit, clamp_offset, matches_all_terms, matches_term,
    parse_rack_term, search_window, sort_discs, tokenize, SortOrder,
};
use lostflight_core::types::DiscId;

use crate::adapter::{ReadRequest, SourceAdapter};
use crate::chunk::ChunkedFetcher;
use crate::error::StoreError;
use crate::source::{OrderBy, TableSource};

/// Caller-supplied retrieval options.
#[derive(Debug, Clone, Default)]
pub struct DiscQueryOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Exhaustive mode: return the complete matching set instead of one
    /// bounded page.
    pub fetch_all: bool,
    pub sort_by: SortOrder,
    pub min_rack_id: Option<i64>,
    pub max_rack_id: Option<i64>,
}

/// Uniform result envelope for all retrieval paths.
#[derive(Debug, Serialize)]
pub struct DiscPage {
    pub data: Vec<DiscRecord>,
    pub count: i64,
    pub has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<i64>,
}

/// Disc retrieval service over the source adapter.
pub struct DiscService {
    adapter: SourceAdapter,
}

impl DiscService {
    pub fn new(adapter: SourceAdapter) -> Self {
        DiscService { adapter }
    }

    pub fn from_source(source: Arc<dyn TableSource>) -> Self {
        DiscService::new(SourceAdapter::new(source))
    }

    /// Fetch discs without a text query: one page, or everything when
    /// `fetch_all` is set.
    pub async fn get_discs(&self, options: &DiscQueryOptions) -> Result<DiscPage, StoreError> {
        if options.fetch_all {
            let mut discs = ChunkedFetcher::fetch_all(&self.adapter).await?;
            apply_rack_range(&mut discs, options.min_rack_id, options.max_rack_id);
            sort_discs(&mut discs, options.sort_by);
            return Ok(full_page(discs));
        }

        let limit = clamp_limit(options.limit);
        let offset = clamp_offset(options.offset);

        // Single-page path: ordering, the row window, and the rack range
        // are all pushed down, and the count is the store's exact total for
        // the predicate set.
        let fetched = self
            .adapter
            .fetch(&ReadRequest {
                rack_id_min: options.min_rack_id,
                rack_id_max: options.max_rack_id,
                order: OrderBy::from_sort(options.sort_by),
                offset,
                limit,
                want_count: true,
                ..ReadRequest::default()
            })
            .await?;

        let returned = fetched.records.len() as i64;
        let has_more = returned == limit;
        let count = match fetched.total {
            Some(total) => total,
            None => {
                // The store answered a counted read without a total; the
                // consumed extent is the best available lower bound.
                tracing::warn!(offset, returned, "counted read returned no exact total");
                offset + returned
            }
        };
        Ok(DiscPage {
            count,
            has_more,
            next_offset: has_more.then_some(offset + returned),
            data: fetched.records,
        })
    }

    /// Fetch discs matching a free-text query.
    ///
    /// An empty or whitespace-only query is no filter at all and behaves
    /// exactly like [`DiscService::get_discs`].
    pub async fn search_discs(
        &self,
        query: &str,
        options: &DiscQueryOptions,
    ) -> Result<DiscPage, StoreError> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return self.get_discs(options).await;
        }

        let limit = clamp_limit(options.limit);
        let offset = clamp_offset(options.offset);

        let mut matches = if terms.len() == 1 {
            // Single-term path is exhaustive, so its count and has_more are
            // exact even when paged.
            self.single_term_matches(&terms[0]).await?
        } else if options.fetch_all {
            let discs = ChunkedFetcher::fetch_all(&self.adapter).await?;
            discs
                .into_iter()
                .filter(|d| matches_all_terms(d, &terms))
                .collect()
        } else {
            // Paged multi-term path: AND-across-terms cannot be pushed down,
            // so filter an oversized window. Count and has_more are computed
            // from that window and are approximate for result sets larger
            // than it; callers accept this documented limit.
            let discs = ChunkedFetcher::fetch_up_to(&self.adapter, search_window(limit)).await?;
            discs
                .into_iter()
                .filter(|d| matches_all_terms(d, &terms))
                .collect()
        };

        apply_rack_range(&mut matches, options.min_rack_id, options.max_rack_id);
        sort_discs(&mut matches, options.sort_by);

        if options.fetch_all {
            Ok(full_page(matches))
        } else {
            Ok(slice_page(matches, offset, limit))
        }
    }

    /// Direct lookup by the human-facing rack identifier.
    pub async fn find_by_rack_id(&self, rack_id: i64) -> Result<Option<DiscRecord>, StoreError> {
        let fetched = self
            .adapter
            .fetch(&ReadRequest {
                rack_id_eq: Some(rack_id),
                limit: 1,
                ..ReadRequest::default()
            })
            .await?;
        Ok(fetched.records.into_iter().next())
    }

    /// Cheap reachability probe for health checks: one row through the
    /// normal fallback path.
    pub async fn probe(&self) -> Result<(), StoreError> {
        self.adapter
            .fetch(&ReadRequest {
                limit: 1,
                ..ReadRequest::default()
            })
            .await
            .map(|_| ())
    }

    /// All matches for a single term.
    ///
    /// When the term is numeric, a direct rack-id equality lookup runs
    /// first, then the substring scan is merged in and deduplicated by id,
    /// so a disc whose text merely contains the digits still appears
    /// alongside the exact rack hit.
    ///
    /// The scan alone would also match rack equality, but a row can slip
    /// between chunk windows while the scan runs; the direct lookup pins
    /// the exact rack hit independently of the scan.
    async fn single_term_matches(&self, term: &str) -> Result<Vec<DiscRecord>, StoreError> {
        let mut matches: Vec<DiscRecord> = Vec::new();

        if let Some(rack_id) = parse_rack_term(term) {
            let direct = self
                .adapter
                .fetch(&ReadRequest {
                    rack_id_eq: Some(rack_id),
                    ..ReadRequest::default()
                })
                .await?;
            matches.extend(direct.records);
        }

        let seen: HashSet<DiscId> = matches.iter().map(|d| d.id).collect();
        let scanned = ChunkedFetcher::fetch_all(&self.adapter).await?;
        matches.extend(
            scanned
                .into_iter()
                .filter(|d| matches_term(d, term) && !seen.contains(&d.id)),
        );

        Ok(matches)
    }
}

/// Envelope for an exhaustive result: everything is here, nothing follows.
fn full_page(discs: Vec<DiscRecord>) -> DiscPage {
    DiscPage {
        count: discs.len() as i64,
        has_more: false,
        next_offset: None,
        data: discs,
    }
}

/// Envelope for one page sliced out of a materialized, filtered set. The
/// count reflects the whole materialized set, not the slice.
fn slice_page(discs: Vec<DiscRecord>, offset: i64, limit: i64) -> DiscPage {
    let count = discs.len() as i64;
    let data: Vec<DiscRecord> = discs
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();
    let has_more = offset + (data.len() as i64) < count;
    DiscPage {
        count,
        has_more,
        next_offset: has_more.then(|| offset + data.len() as i64),
        data,
    }
}
