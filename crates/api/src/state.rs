use std::sync::Arc;

use idstore_db::store::RecordStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: both fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Store implementation chosen at startup (Postgres or in-memory).
    pub store: Arc<dyn RecordStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
