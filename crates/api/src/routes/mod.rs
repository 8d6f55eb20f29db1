pub mod discs;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /discs                  list (paged or exhaustive)
/// /discs/search           free-text search
/// /discs/rack/{rack_id}   direct rack lookup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/discs", discs::router())
}
