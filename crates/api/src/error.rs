use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use lostflight_store::StoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`StoreError`] for retrieval failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses. An empty result list is never an error: callers render "no
/// results" for empty `data` and an error state only for these responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A retrieval error from the store layer.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A disc lookup by rack identifier found nothing.
    #[error("No disc with rack id {rack_id}")]
    RackNotFound { rack_id: i64 },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store retrieval error");
                (
                    StatusCode::BAD_GATEWAY,
                    "STORE_ERROR",
                    "The backing store could not be read".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::RackNotFound { rack_id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("No disc with rack id {rack_id}"),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
