//! Repository for the `titles` table.

use sqlx::PgPool;
use watchlog_core::lifecycle::TitleState;
use watchlog_core::search::TitleFilter;
use watchlog_core::types::DbId;
use watchlog_core::validation::NewTitle;

use crate::models::title::{StateCounts, Title};

/// Column list for `titles` queries.
const COLUMNS: &str = "\
    id, title, kind, state, platform, rating, \
    external_score_imdb, external_score_film_affinity, \
    genres, note_pre, note_post, created_at, updated_at";

/// Filter predicate shared by listing and counting. Every parameter may be
/// NULL, which disables that criterion.
const FILTER_CLAUSE: &str = "\
    ($1::text IS NULL OR state = $1) \
    AND ($2::text IS NULL OR kind = $2) \
    AND ($3::text IS NULL OR title ILIKE $3 ESCAPE '\\')";

/// Provides CRUD operations for catalog titles.
pub struct TitleRepo;

impl TitleRepo {
    /// Insert a validated title, returning the full row.
    pub async fn create(pool: &PgPool, input: &NewTitle) -> Result<Title, sqlx::Error> {
        let query = format!(
            "INSERT INTO titles \
                (title, kind, state, platform, rating, \
                 external_score_imdb, external_score_film_affinity, \
                 genres, note_pre, note_post) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(&input.title)
            .bind(input.kind.as_str())
            .bind(input.state.as_str())
            .bind(&input.platform)
            .bind(input.rating)
            .bind(&input.external_score_imdb)
            .bind(&input.external_score_film_affinity)
            .bind(&input.genres)
            .bind(&input.note_pre)
            .bind(&input.note_post)
            .fetch_one(pool)
            .await
    }

    /// Find a title by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Title>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles WHERE id = $1");
        sqlx::query_as::<_, Title>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List titles matching `filter`, most recently updated first.
    pub async fn list(
        pool: &PgPool,
        filter: &TitleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Title>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM titles WHERE {FILTER_CLAUSE} \
             ORDER BY updated_at DESC, id DESC \
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(filter.state.map(TitleState::as_str))
            .bind(filter.kind.map(|k| k.as_str()))
            .bind(filter.q.as_deref().map(like_pattern))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count titles per state among those matching `filter`.
    pub async fn count_by_state(
        pool: &PgPool,
        filter: &TitleFilter,
    ) -> Result<StateCounts, sqlx::Error> {
        let query = format!(
            "SELECT state, COUNT(*) FROM titles WHERE {FILTER_CLAUSE} GROUP BY state"
        );
        let rows = sqlx::query_as::<_, (String, i64)>(&query)
            .bind(filter.state.map(TitleState::as_str))
            .bind(filter.kind.map(|k| k.as_str()))
            .bind(filter.q.as_deref().map(like_pattern))
            .fetch_all(pool)
            .await?;

        let mut counts = StateCounts::default();
        for (state, count) in rows {
            match state.parse::<TitleState>() {
                Ok(state) => counts.add(state, count),
                Err(_) => tracing::warn!(%state, "Skipping titles with unknown state"),
            }
        }
        Ok(counts)
    }

    /// Replace every editable field of a title. Returns `None` if not found.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &NewTitle,
    ) -> Result<Option<Title>, sqlx::Error> {
        let query = format!(
            "UPDATE titles SET \
                title = $2, kind = $3, state = $4, platform = $5, rating = $6, \
                external_score_imdb = $7, external_score_film_affinity = $8, \
                genres = $9, note_pre = $10, note_post = $11, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.kind.as_str())
            .bind(input.state.as_str())
            .bind(&input.platform)
            .bind(input.rating)
            .bind(&input.external_score_imdb)
            .bind(&input.external_score_film_affinity)
            .bind(&input.genres)
            .bind(&input.note_pre)
            .bind(&input.note_post)
            .fetch_optional(pool)
            .await
    }

    /// Change only the state of a title. Leaving `watched` clears the
    /// post-viewing note. Returns `None` if not found.
    pub async fn update_state(
        pool: &PgPool,
        id: DbId,
        state: TitleState,
    ) -> Result<Option<Title>, sqlx::Error> {
        let query = format!(
            "UPDATE titles SET \
                state = $2, \
                note_post = CASE WHEN $2 = 'watched' THEN note_post ELSE '' END, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(id)
            .bind(state.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Delete a title. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build an `ILIKE` pattern matching `q` anywhere, escaping wildcards.
fn like_pattern(q: &str) -> String {
    let mut escaped = String::with_capacity(q.len() + 2);
    escaped.push('%');
    for c in q.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
