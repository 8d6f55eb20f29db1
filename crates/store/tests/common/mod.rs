//! In-memory [`TableSource`] used by the retrieval integration tests.
//!
//! Serves the same two surfaces production does: the `public_discs` view
//! (active rows only, no explicit filter needed) and the raw `discs` table
//! (all rows; callers must filter status themselves). Every call is
//! recorded so tests can assert on chunking behaviour, and the primary
//! surface can be forced to fail or to serve a pre-migration row shape.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use lostflight_store::{
    OrderColumn, OrderDirection, RowPage, RowQuery, SourceError, TableSource,
};

/// Deterministic disc row. `n` drives the id and the creation timestamp:
/// higher `n` means created later.
pub fn disc_row(n: u32, rack_id: Option<i64>, brand: &str, mold: &str) -> Value {
    json!({
        "id": uuid::Uuid::from_u128(n as u128).to_string(),
        "rack_id": rack_id,
        "brand": brand,
        "mold": mold,
        "disc_type": null,
        "color": "Blue",
        "weight": null,
        "condition": null,
        "plastic_type": null,
        "stamp_text": null,
        "phone_number": null,
        "name_on_disc": null,
        "source_id": null,
        "source_name": null,
        "location_found": null,
        "found_date": null,
        "description": null,
        "image_urls": [],
        "status": "active",
        "return_status": "Found",
        "created_at": timestamp(n),
        "updated_at": null
    })
}

/// RFC 3339 timestamp that grows with `n` (minute resolution past an epoch).
fn timestamp(n: u32) -> String {
    let hours = n / 60;
    let minutes = n % 60;
    format!("2026-01-{:02}T{:02}:{:02}:00Z", 1 + hours / 24, hours % 24, minutes)
}

#[derive(Default)]
pub struct MemorySource {
    /// Raw `discs` table contents, all statuses.
    rows: Vec<Value>,
    /// Force every primary-surface call to fail with a transport error.
    fail_primary: bool,
    /// Serve primary rows in the pre-migration shape (no `rack_id` column).
    drift_primary: bool,
    calls: Mutex<Vec<RowQuery>>,
}

impl MemorySource {
    pub fn new(rows: Vec<Value>) -> Self {
        MemorySource {
            rows,
            ..MemorySource::default()
        }
    }

    pub fn with_failing_primary(mut self) -> Self {
        self.fail_primary = true;
        self
    }

    pub fn with_drifted_primary(mut self) -> Self {
        self.drift_primary = true;
        self
    }

    /// Number of calls made against the given surface.
    pub fn calls_to(&self, table: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|q| q.table == table)
            .count()
    }
}

#[async_trait]
impl TableSource for MemorySource {
    async fn fetch_rows(&self, query: &RowQuery) -> Result<RowPage, SourceError> {
        self.calls.lock().unwrap().push(query.clone());

        let mut rows: Vec<Value> = match query.table {
            "public_discs" => {
                if self.fail_primary {
                    return Err(SourceError::Transport("connection refused".to_string()));
                }
                // The view already excludes non-active rows.
                let mut visible: Vec<Value> = self
                    .rows
                    .iter()
                    .filter(|r| r["status"] == "active")
                    .cloned()
                    .collect();
                if self.drift_primary {
                    for row in &mut visible {
                        row.as_object_mut().unwrap().remove("rack_id");
                    }
                }
                visible
            }
            "discs" => self.rows.clone(),
            other => {
                return Err(SourceError::Transport(format!("unknown table `{other}`")));
            }
        };

        for (column, value) in &query.eq {
            rows.retain(|r| matches_eq(&r[*column], value));
        }
        for (column, value) in &query.gte {
            let bound: i64 = value.parse().unwrap();
            rows.retain(|r| r[*column].as_i64().is_some_and(|v| v >= bound));
        }
        for (column, value) in &query.lte {
            let bound: i64 = value.parse().unwrap();
            rows.retain(|r| r[*column].as_i64().is_some_and(|v| v <= bound));
        }

        sort_rows(&mut rows, query);

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

fn matches_eq(cell: &Value, value: &str) -> bool {
    match cell {
        Value::String(s) => s == value,
        Value::Number(n) => n.to_string() == value,
        _ => false,
    }
}

fn sort_rows(rows: &mut [Value], query: &RowQuery) {
    match query.order.column {
        OrderColumn::CreatedAt => {
            // Fixed-width RFC 3339 timestamps sort lexicographically.
            rows.sort_by(|a, b| {
                let (a, b) = (a["created_at"].as_str(), b["created_at"].as_str());
                match query.order.direction {
                    OrderDirection::Asc => a.cmp(&b),
                    OrderDirection::Desc => b.cmp(&a),
                }
            });
        }
        OrderColumn::RackId => {
            // Nulls behave as rack 0: first ascending, last descending.
            rows.sort_by_key(|r| r["rack_id"].as_i64().unwrap_or(0));
            if query.order.direction == OrderDirection::Desc {
                rows.reverse();
            }
        }
    }
}
