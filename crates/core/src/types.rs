//! Shared primitive type aliases.

/// Opaque stable record identifier, assigned by the backing store.
pub type DiscId = uuid::Uuid;

/// UTC timestamp used for all bookkeeping columns.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
