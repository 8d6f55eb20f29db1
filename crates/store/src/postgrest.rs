//! HTTP implementation of [`TableSource`] against the store's REST surface.
//!
//! Predicates map onto query-string operators (`eq.`, `gte.`, `lte.`), the
//! row window onto a `Range` header, and exact counting onto
//! `Prefer: count=exact` with the total read back from `Content-Range`.
//! No timeout is enforced here; the caller configures it on the
//! [`reqwest::Client`] it hands in.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, RANGE};

use crate::error::SourceError;
use crate::source::{OrderBy, OrderColumn, OrderDirection, RowPage, RowQuery, TableSource};

/// Read-only client for one store deployment.
pub struct PostgrestSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        PostgrestSource {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    fn headers(&self, query: &RowQuery) -> Result<HeaderMap, SourceError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|_| SourceError::Transport("API key is not a valid header value".to_string()))?;
        headers.insert("apikey", key);

        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| SourceError::Transport("API key is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        // Row window: inclusive item range.
        let last = query.offset + query.limit - 1;
        headers.insert(
            RANGE,
            HeaderValue::from_str(&format!("{}-{}", query.offset, last))
                .map_err(|_| SourceError::Transport("invalid row window".to_string()))?,
        );
        headers.insert("Range-Unit", HeaderValue::from_static("items"));

        if query.want_count {
            headers.insert("Prefer", HeaderValue::from_static("count=exact"));
        }

        Ok(headers)
    }
}

#[async_trait]
impl TableSource for PostgrestSource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<RowPage, SourceError> {
        let url = format!("{}/{}", self.base_url, query.table);

        let mut params: Vec<(&str, String)> = vec![("select", "*".to_string())];
        for (column, value) in &query.eq {
            params.push((*column, format!("eq.{value}")));
        }
        for (column, value) in &query.gte {
            params.push((*column, format!("gte.{value}")));
        }
        for (column, value) in &query.lte {
            params.push((*column, format!("lte.{value}")));
        }
        params.push(("order", order_param(query.order)));

        let response = self
            .client
            .get(&url)
            .headers(self.headers(query)?)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Transport(format!(
                "store responded {status} for {}: {body}",
                query.table
            )));
        }

        let total = if query.want_count {
            response
                .headers()
                .get("Content-Range")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_content_range)
        } else {
            None
        };

        let rows: Vec<serde_json::Value> = response.json().await?;
        Ok(RowPage { rows, total })
    }
}

/// Map an ordering onto the store's `order` parameter.
///
/// Rack-id ordering pins null placement so discs without a rack behave as
/// rack 0 in either direction.
fn order_param(order: OrderBy) -> String {
    match (order.column, order.direction) {
        (OrderColumn::CreatedAt, OrderDirection::Asc) => "created_at.asc".to_string(),
        (OrderColumn::CreatedAt, OrderDirection::Desc) => "created_at.desc".to_string(),
        (OrderColumn::RackId, OrderDirection::Asc) => "rack_id.asc.nullsfirst".to_string(),
        (OrderColumn::RackId, OrderDirection::Desc) => "rack_id.desc.nullslast".to_string(),
    }
}

/// Extract the total from a `Content-Range` value (`"0-49/120"`, `"*/0"`).
fn parse_content_range(value: &str) -> Option<i64> {
    value.rsplit('/').next()?.trim().parse().ok()
}
