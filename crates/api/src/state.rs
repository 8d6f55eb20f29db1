use std::sync::Arc;

use lostflight_store::DiscService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Disc retrieval service over the backing store.
    pub service: Arc<DiscService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
