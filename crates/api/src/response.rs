//! Shared response envelope types for API handlers.
//!
//! List endpoints serialize the store layer's page envelope directly
//! (`data`, `count`, `has_more`, `next_offset`); single-record endpoints
//! use [`DataResponse`] for the standard `{ "data": ... }` shape.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
