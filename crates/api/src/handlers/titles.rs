//! Handlers for the `/titles` resource.
//!
//! Each handler validates the payload through `watchlog_core` and then issues
//! a single storage call. Nothing is held across requests.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;

use watchlog_core::error::CoreError;
use watchlog_core::lifecycle::{self, TitleState};
use watchlog_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT};
use watchlog_core::types::DbId;
use watchlog_core::validation::validate_title;
use watchlog_db::models::title::{Title, TitleListParams};

use crate::error::{AppError, AppResult};
use crate::query::title_filter;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::EntryNotFound { id })
}

fn ensure_object(body: &Value) -> AppResult<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Request body must be a JSON object".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// GET /titles
// ---------------------------------------------------------------------------

/// List titles filtered by `q`, `state` and `kind`, newest update first.
pub async fn list_titles(
    State(state): State<AppState>,
    Query(params): Query<TitleListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = title_filter(&params)?;
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, DEFAULT_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let titles = state.store.list(&filter, limit, offset).await?;
    Ok(Json(DataResponse { data: titles }))
}

// ---------------------------------------------------------------------------
// GET /titles/summary
// ---------------------------------------------------------------------------

/// Per-state counts for the current search. A `state` parameter is ignored.
pub async fn title_summary(
    State(state): State<AppState>,
    Query(params): Query<TitleListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = title_filter(&params)?.without_state();
    let counts = state.store.count_by_state(&filter).await?;
    Ok(Json(DataResponse { data: counts }))
}

// ---------------------------------------------------------------------------
// POST /titles
// ---------------------------------------------------------------------------

pub async fn create_title(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    ensure_object(&body)?;
    let input = validate_title(&body)?;

    let title = state.store.insert(&input).await?;

    tracing::info!(
        title_id = title.id,
        kind = %input.kind,
        state = %input.state,
        "Title created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: title })))
}

// ---------------------------------------------------------------------------
// GET /titles/{id}
// ---------------------------------------------------------------------------

pub async fn get_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let title = state.store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: title }))
}

// ---------------------------------------------------------------------------
// PATCH /titles/{id}
// ---------------------------------------------------------------------------

/// Update a title.
///
/// A body of exactly `{ "state": ... }` takes the lightweight path, which
/// never enters `watched`. Any other body is a full replacement and goes
/// through the entry validator.
pub async fn patch_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    ensure_object(&body)?;

    if let Some(target) = lifecycle::parse_quick_patch(&body) {
        let title = set_state(&state, id, target?).await?;
        return Ok(Json(DataResponse { data: title }));
    }

    let input = validate_title(&body)?;
    let title = state
        .store
        .replace(id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(title_id = id, state = %input.state, "Title replaced");

    Ok(Json(DataResponse { data: title }))
}

// ---------------------------------------------------------------------------
// POST /titles/{id}/advance
// ---------------------------------------------------------------------------

/// Move a title to the next state of the cycle through the lightweight path.
///
/// Advancing from `watching` is rejected: entering `watched` needs a full
/// patch carrying `notePost`.
pub async fn advance_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let current = state.store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    let from: TitleState = current.state.parse()?;
    let target = lifecycle::check_quick_transition(from.next())?;

    let title = set_state(&state, id, target).await?;
    Ok(Json(DataResponse { data: title }))
}

// ---------------------------------------------------------------------------
// DELETE /titles/{id}
// ---------------------------------------------------------------------------

pub async fn delete_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }
    tracing::info!(title_id = id, "Title deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn set_state(state: &AppState, id: DbId, target: TitleState) -> AppResult<Title> {
    let title = state
        .store
        .update_state(id, target)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(title_id = id, state = %target, "Title state updated");
    Ok(title)
}
