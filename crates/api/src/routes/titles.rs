//! Route definitions for the catalog.
//!
//! Mounted at `/titles` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::titles;
use crate::state::AppState;

/// Title routes.
///
/// ```text
/// GET    /                  -> list_titles
/// POST   /                  -> create_title
/// GET    /summary           -> title_summary
/// GET    /{id}              -> get_title
/// PATCH  /{id}              -> patch_title (state-only or full)
/// DELETE /{id}              -> delete_title
/// POST   /{id}/advance      -> advance_title
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(titles::list_titles).post(titles::create_title))
        .route("/summary", get(titles::title_summary))
        .route(
            "/{id}",
            get(titles::get_title)
                .patch(titles::patch_title)
                .delete(titles::delete_title),
        )
        .route("/{id}/advance", post(titles::advance_title))
}
