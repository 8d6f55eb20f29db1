//! Retrieval engine between the disc registry API and the backing
//! tabular store.
//!
//! The store is an opaque read-only collaborator reached over HTTP: it
//! supports equality, range, and order-by predicates plus a bounded row
//! window per request, and nothing else. Everything this crate does
//! (surface fallback, chunked exhaustive reads, in-process term matching,
//! pagination envelopes) exists to bridge that narrow surface to the
//! search semantics the UI needs.

pub mod adapter;
pub mod chunk;
pub mod error;
pub mod postgrest;
pub mod projection;
pub mod service;
pub mod source;

pub use adapter::{FetchedDiscs, ReadRequest, SourceAdapter};
pub use chunk::ChunkedFetcher;
pub use error::{SourceError, StoreError};
pub use postgrest::PostgrestSource;
pub use service::{DiscPage, DiscQueryOptions, DiscService};
pub use source::{OrderBy, OrderColumn, OrderDirection, RowPage, RowQuery, TableSource};
