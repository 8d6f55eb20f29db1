//! The fallback reader: one logical read over two physical surfaces.
//!
//! The primary surface is a restricted view that already excludes
//! non-active records. If it fails (transport error or schema drift) the
//! identical predicate set is retried once against the raw table with an
//! explicit `status = active` equality filter, so the fallback can never
//! reintroduce non-active rows. The choice is not cached: every call
//! re-attempts the primary first. Retry beyond that single fallback is a
//! caller concern.

use std::sync::Arc;

use lostflight_core::disc::DiscRecord;
use lostflight_core::search::CHUNK_SIZE;

use crate::error::{SourceError, StoreError};
use crate::projection::project_rows;
use crate::source::{OrderBy, RowQuery, TableSource};

/// Restricted view, active records only.
pub const VIEW_PUBLIC_DISCS: &str = "public_discs";

/// Raw table; requires an explicit status filter.
pub const TABLE_DISCS: &str = "discs";

pub const COLUMN_STATUS: &str = "status";
pub const COLUMN_RACK_ID: &str = "rack_id";
pub const STATUS_ACTIVE: &str = "active";

/// Predicates for one logical disc read. The adapter decides which physical
/// surface serves it.
#[derive(Debug, Clone)]
pub struct ReadRequest {
    /// Exact rack-id lookup (the numeric fast path).
    pub rack_id_eq: Option<i64>,
    /// Inclusive rack-id lower bound, pushed down store-side.
    pub rack_id_min: Option<i64>,
    /// Inclusive rack-id upper bound, pushed down store-side.
    pub rack_id_max: Option<i64>,
    pub order: OrderBy,
    pub offset: i64,
    pub limit: i64,
    pub want_count: bool,
}

impl Default for ReadRequest {
    fn default() -> Self {
        ReadRequest {
            rack_id_eq: None,
            rack_id_min: None,
            rack_id_max: None,
            order: OrderBy::created_at_desc(),
            offset: 0,
            limit: CHUNK_SIZE,
            want_count: false,
        }
    }
}

/// One window of projected disc records, plus the exact predicate total
/// when it was requested.
#[derive(Debug)]
pub struct FetchedDiscs {
    pub records: Vec<DiscRecord>,
    pub total: Option<i64>,
}

/// Normalizes the two alternate read surfaces into one record stream.
pub struct SourceAdapter {
    source: Arc<dyn TableSource>,
}

impl SourceAdapter {
    pub fn new(source: Arc<dyn TableSource>) -> Self {
        SourceAdapter { source }
    }

    /// Execute one logical read, falling back from the restricted view to
    /// the raw table if the view fails.
    pub async fn fetch(&self, request: &ReadRequest) -> Result<FetchedDiscs, StoreError> {
        let primary = match self.read_surface(VIEW_PUBLIC_DISCS, request, false).await {
            Ok(fetched) => return Ok(fetched),
            Err(err) => err,
        };

        tracing::warn!(
            surface = VIEW_PUBLIC_DISCS,
            error = %primary,
            "primary read surface failed, retrying against the raw table"
        );

        match self.read_surface(TABLE_DISCS, request, true).await {
            Ok(fetched) => Ok(fetched),
            Err(secondary) => Err(StoreError::SurfacesExhausted { primary, secondary }),
        }
    }

    async fn read_surface(
        &self,
        table: &'static str,
        request: &ReadRequest,
        filter_status: bool,
    ) -> Result<FetchedDiscs, SourceError> {
        let mut query = RowQuery::new(table);
        query.order = request.order;
        query.offset = request.offset;
        query.limit = request.limit;
        query.want_count = request.want_count;

        if filter_status {
            query.eq.push((COLUMN_STATUS, STATUS_ACTIVE.to_string()));
        }
        if let Some(rack_id) = request.rack_id_eq {
            query.eq.push((COLUMN_RACK_ID, rack_id.to_string()));
        }
        if let Some(min) = request.rack_id_min {
            query.gte.push((COLUMN_RACK_ID, min.to_string()));
        }
        if let Some(max) = request.rack_id_max {
            query.lte.push((COLUMN_RACK_ID, max.to_string()));
        }

        let page = self.source.fetch_rows(&query).await?;
        let records = project_rows(page.rows)?;

        tracing::debug!(
            surface = table,
            rows = records.len(),
            offset = request.offset,
            "read surface window"
        );

        Ok(FetchedDiscs {
            records,
            total: page.total,
        })
    }
}
