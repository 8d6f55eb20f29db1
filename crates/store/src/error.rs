//! Error types for the retrieval engine.

/// A failure of one physical read surface for one call.
///
/// Schema drift is a typed signal rather than a field-presence check at the
/// call site: a surface that returns rows missing an expected column fails
/// with [`SourceError::SchemaMismatch`], which the adapter treats as soft
/// and recovers by falling back to the raw table.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The read call itself failed (network, permission, malformed
    /// predicate, non-2xx response).
    #[error("transport failure: {0}")]
    Transport(String),

    /// Returned rows do not match the expected row shape.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

/// A retrieval failure surfaced to callers.
///
/// Single-surface failures are recovered internally by the adapter's
/// fallback, so the only error callers ever see carries both surface
/// failures. A non-error result never contains partial data: any chunk
/// failure discards everything accumulated before it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("disc retrieval failed (primary surface: {primary}; fallback surface: {secondary})")]
    SurfacesExhausted {
        primary: SourceError,
        secondary: SourceError,
    },
}
