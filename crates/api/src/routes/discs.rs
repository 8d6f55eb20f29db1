//! Route definitions for the public disc listing.
//!
//! Mounted at `/discs` in the API route tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::discs;
use crate::state::AppState;

/// Disc routes mounted at `/discs`.
///
/// ```text
/// GET /                 -> list_discs
/// GET /search           -> search_discs
/// GET /rack/{rack_id}   -> get_by_rack_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(discs::list_discs))
        .route("/search", get(discs::search_discs))
        .route("/rack/{rack_id}", get(discs::get_by_rack_id))
}
