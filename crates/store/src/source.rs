//! The opaque tabular read surface consumed by the retrieval engine.
//!
//! One call is parameterized by a target collection, equality and numeric
//! range predicates, an order-by column + direction, a row window, and an
//! optional exact-count flag. No joins, aggregation, or full-text indexes
//! are assumed; free-text matching happens in process on top of this.

use async_trait::async_trait;

use lostflight_core::search::{SortOrder, CHUNK_SIZE};

use crate::error::SourceError;

/// Columns the engine orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    CreatedAt,
    RackId,
}

impl OrderColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderColumn::CreatedAt => "created_at",
            OrderColumn::RackId => "rack_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Ordering applied store-side to a row window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: OrderColumn,
    pub direction: OrderDirection,
}

impl OrderBy {
    /// The stable, monotonic ordering used for chunked scans. Creation time
    /// never changes after insert, which bounds omission/duplication across
    /// chunk windows.
    pub fn created_at_desc() -> Self {
        OrderBy {
            column: OrderColumn::CreatedAt,
            direction: OrderDirection::Desc,
        }
    }

    /// Map a caller-facing sort order onto a store-side ordering.
    pub fn from_sort(order: SortOrder) -> Self {
        match order {
            SortOrder::Newest => OrderBy {
                column: OrderColumn::CreatedAt,
                direction: OrderDirection::Desc,
            },
            SortOrder::Oldest => OrderBy {
                column: OrderColumn::CreatedAt,
                direction: OrderDirection::Asc,
            },
            SortOrder::RackIdAsc => OrderBy {
                column: OrderColumn::RackId,
                direction: OrderDirection::Asc,
            },
            SortOrder::RackIdDesc => OrderBy {
                column: OrderColumn::RackId,
                direction: OrderDirection::Desc,
            },
        }
    }
}

/// One bounded read against a collection.
#[derive(Debug, Clone)]
pub struct RowQuery {
    pub table: &'static str,
    /// Equality predicates, `(column, value)`.
    pub eq: Vec<(&'static str, String)>,
    /// Inclusive lower bounds, `(column, value)`.
    pub gte: Vec<(&'static str, String)>,
    /// Inclusive upper bounds, `(column, value)`.
    pub lte: Vec<(&'static str, String)>,
    pub order: OrderBy,
    pub offset: i64,
    pub limit: i64,
    /// Ask the store for the exact total matching the predicates, not just
    /// the window contents.
    pub want_count: bool,
}

impl RowQuery {
    pub fn new(table: &'static str) -> Self {
        RowQuery {
            table,
            eq: Vec::new(),
            gte: Vec::new(),
            lte: Vec::new(),
            order: OrderBy::created_at_desc(),
            offset: 0,
            limit: CHUNK_SIZE,
            want_count: false,
        }
    }
}

/// One window of raw rows, plus the exact total when it was requested.
#[derive(Debug, Default)]
pub struct RowPage {
    pub rows: Vec<serde_json::Value>,
    pub total: Option<i64>,
}

/// A physical read surface. Implemented over the store's REST interface in
/// production and by an in-memory table in tests.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<RowPage, SourceError>;
}
