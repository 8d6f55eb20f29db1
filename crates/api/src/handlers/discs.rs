//! Handlers for the `/discs` resource.
//!
//! All endpoints are public and read-only; authorization lives in the
//! backing store's access rules, not here.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use lostflight_core::disc::DiscRecord;
use lostflight_core::search::SortOrder;
use lostflight_store::{DiscPage, DiscQueryOptions};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /discs`.
///
/// Limits and offsets are clamped in the store layer.
#[derive(Debug, Default, Deserialize)]
pub struct ListDiscsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Exhaustive mode: return every match instead of one page.
    #[serde(default)]
    pub fetch_all: bool,
    pub sort_by: Option<SortOrder>,
    pub min_rack_id: Option<i64>,
    pub max_rack_id: Option<i64>,
}

impl ListDiscsQuery {
    fn into_options(self) -> DiscQueryOptions {
        DiscQueryOptions {
            limit: self.limit,
            offset: self.offset,
            fetch_all: self.fetch_all,
            sort_by: self.sort_by.unwrap_or_default(),
            min_rack_id: self.min_rack_id,
            max_rack_id: self.max_rack_id,
        }
    }
}

/// Query parameters for `GET /discs/search`: the listing parameters plus
/// the free-text query `q`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchDiscsQuery {
    /// Free-text query. Blank behaves exactly like an unfiltered listing.
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    #[serde(default)]
    pub fetch_all: bool,
    pub sort_by: Option<SortOrder>,
    pub min_rack_id: Option<i64>,
    pub max_rack_id: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/discs
///
/// List active discs: one page by default, everything with `fetch_all=true`.
pub async fn list_discs(
    State(state): State<AppState>,
    Query(params): Query<ListDiscsQuery>,
) -> AppResult<Json<DiscPage>> {
    let page = state.service.get_discs(&params.into_options()).await?;
    Ok(Json(page))
}

/// GET /api/v1/discs/search
///
/// Free-text search over active discs with the same paging options as the
/// listing endpoint.
pub async fn search_discs(
    State(state): State<AppState>,
    Query(params): Query<SearchDiscsQuery>,
) -> AppResult<Json<DiscPage>> {
    let query = params.q.clone().unwrap_or_default();
    let options = DiscQueryOptions {
        limit: params.limit,
        offset: params.offset,
        fetch_all: params.fetch_all,
        sort_by: params.sort_by.unwrap_or_default(),
        min_rack_id: params.min_rack_id,
        max_rack_id: params.max_rack_id,
    };

    let page = state.service.search_discs(&query, &options).await?;
    Ok(Json(page))
}

/// GET /api/v1/discs/rack/{rack_id}
///
/// Direct lookup by the human-facing rack identifier.
pub async fn get_by_rack_id(
    State(state): State<AppState>,
    Path(rack_id): Path<i64>,
) -> AppResult<Json<DataResponse<DiscRecord>>> {
    if rack_id <= 0 {
        return Err(AppError::BadRequest("rack id must be positive".to_string()));
    }

    match state.service.find_by_rack_id(rack_id).await? {
        Some(disc) => Ok(Json(DataResponse { data: disc })),
        None => Err(AppError::RackNotFound { rack_id }),
    }
}
