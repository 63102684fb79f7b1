use std::sync::Arc;

use school_db::store::SchoolStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (Postgres in production).
    pub store: Arc<dyn SchoolStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
