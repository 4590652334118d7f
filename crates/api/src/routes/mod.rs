pub mod health;
pub mod titles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /titles                  list, create
/// /titles/summary          per-state counts
/// /titles/{id}             get, patch, delete
/// /titles/{id}/advance     next lifecycle state
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/titles", titles::router())
}
