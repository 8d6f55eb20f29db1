//! Shaping of raw store rows into [`DiscRecord`]s.
//!
//! No business rules live here beyond field presence and typing; visibility
//! filtering is the adapter's job. The one structural check is the drift
//! sentinel: `rack_id` was added to the schema after the public view was
//! first created, so a surface still serving the pre-migration shape lacks
//! the column entirely and must not be trusted for the rest of the row
//! either.

use serde_json::Value;

use lostflight_core::disc::DiscRecord;

use crate::error::SourceError;

/// Column whose absence marks a stale read surface.
pub const DRIFT_SENTINEL_COLUMN: &str = "rack_id";

/// Project a window of raw rows. Any malformed row fails the whole window
/// with a [`SourceError::SchemaMismatch`].
pub fn project_rows(rows: Vec<Value>) -> Result<Vec<DiscRecord>, SourceError> {
    rows.into_iter().map(project_row).collect()
}

fn project_row(row: Value) -> Result<DiscRecord, SourceError> {
    let object = row
        .as_object()
        .ok_or_else(|| SourceError::SchemaMismatch("row is not a JSON object".to_string()))?;

    // Key absence, not a null value: a null rack_id is a disc that was
    // never racked, a missing column is a stale surface.
    if !object.contains_key(DRIFT_SENTINEL_COLUMN) {
        return Err(SourceError::SchemaMismatch(format!(
            "row is missing the `{DRIFT_SENTINEL_COLUMN}` column"
        )));
    }

    serde_json::from_value(row).map_err(|err| SourceError::SchemaMismatch(err.to_string()))
}
