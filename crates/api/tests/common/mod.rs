//! Shared helpers for API integration tests.
//!
//! Builds the full application router (the same middleware stack
//! production uses) over an in-memory table source, so tests exercise
//! CORS, request-id, timeout, tracing, and panic recovery without a live
//! backing store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use lostflight_api::config::ServerConfig;
use lostflight_api::router::build_app_router;
use lostflight_api::state::AppState;
use lostflight_store::{
    DiscService, OrderColumn, OrderDirection, RowPage, RowQuery, SourceError, TableSource,
};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_url: "http://localhost:54321/rest/v1".to_string(),
        store_api_key: String::new(),
    }
}

/// Build the full application router over the given table source.
pub fn build_test_app(source: Arc<dyn TableSource>) -> Router {
    let config = test_config();
    let state = AppState {
        service: Arc::new(DiscService::from_source(source)),
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request build"),
    )
    .await
    .expect("request dispatch")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Deterministic active disc row served by the in-memory source.
pub fn disc_row(n: u32, rack_id: Option<i64>, brand: &str, mold: &str) -> Value {
    json!({
        "id": uuid::Uuid::from_u128(n as u128).to_string(),
        "rack_id": rack_id,
        "brand": brand,
        "mold": mold,
        "color": "Blue",
        "image_urls": [],
        "status": "active",
        "return_status": "Found",
        "created_at": format!("2026-01-10T{:02}:{:02}:00Z", n / 60 % 24, n % 60),
        "updated_at": null
    })
}

/// Healthy in-memory source: the primary view always answers.
pub struct MemorySource {
    rows: Vec<Value>,
}

impl MemorySource {
    pub fn new(rows: Vec<Value>) -> Self {
        MemorySource { rows }
    }
}

#[async_trait]
impl TableSource for MemorySource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<RowPage, SourceError> {
        // Every test row is active, so the view and the raw table agree.
        let mut rows = self.rows.clone();

        for (column, value) in &query.eq {
            if *column == "status" {
                continue;
            }
            rows.retain(|r| r[*column].to_string() == *value);
        }
        for (column, value) in &query.gte {
            let bound: i64 = value.parse().unwrap();
            rows.retain(|r| r[*column].as_i64().is_some_and(|v| v >= bound));
        }
        for (column, value) in &query.lte {
            let bound: i64 = value.parse().unwrap();
            rows.retain(|r| r[*column].as_i64().is_some_and(|v| v <= bound));
        }

        match query.order.column {
            OrderColumn::CreatedAt => rows.sort_by(|a, b| {
                let (a, b) = (a["created_at"].as_str(), b["created_at"].as_str());
                match query.order.direction {
                    OrderDirection::Asc => a.cmp(&b),
                    OrderDirection::Desc => b.cmp(&a),
                }
            }),
            OrderColumn::RackId => {
                rows.sort_by_key(|r| r["rack_id"].as_i64().unwrap_or(0));
                if query.order.direction == OrderDirection::Desc {
                    rows.reverse();
                }
            }
        }

        let total = query.want_count.then_some(rows.len() as i64);
        let window: Vec<Value> = rows
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect();

        Ok(RowPage {
            rows: window,
            total,
        })
    }
}

/// A source where every surface fails, for error-path tests.
pub struct DeadSource;

#[async_trait]
impl TableSource for DeadSource {
    async fn fetch_rows(&self, _query: &RowQuery) -> Result<RowPage, SourceError> {
        Err(SourceError::Transport("store unreachable".to_string()))
    }
}
