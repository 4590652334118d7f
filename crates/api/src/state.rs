use std::sync::Arc;

use watchlog_db::store::TitleStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; the store is constructed once in `main` and shared.
#[derive(Clone)]
pub struct AppState {
    /// Catalog storage (PostgreSQL or in-process).
    pub store: Arc<dyn TitleStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
