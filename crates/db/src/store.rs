//! The storage seam used by request handlers.

use async_trait::async_trait;
use watchlog_core::lifecycle::TitleState;
use watchlog_core::search::TitleFilter;
use watchlog_core::types::DbId;
use watchlog_core::validation::NewTitle;

use crate::models::title::{StateCounts, Title};
use crate::repositories::TitleRepo;
use crate::DbPool;

/// Generic insert / update / delete / find over catalog titles.
///
/// Implementations own timestamps: `created_at` is set once on insert and
/// `updated_at` is refreshed on every mutation. "Not found" is reported as
/// `Ok(None)` / `Ok(false)`, never as an error.
#[async_trait]
pub trait TitleStore: Send + Sync {
    /// Confirm the backing storage is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    async fn insert(&self, input: &NewTitle) -> Result<Title, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Title>, sqlx::Error>;

    /// Matching titles, most recently updated first.
    async fn list(
        &self,
        filter: &TitleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Title>, sqlx::Error>;

    async fn count_by_state(&self, filter: &TitleFilter) -> Result<StateCounts, sqlx::Error>;

    /// Overwrite every editable field.
    async fn replace(&self, id: DbId, input: &NewTitle) -> Result<Option<Title>, sqlx::Error>;

    /// Overwrite only the state; the post-viewing note is cleared unless the
    /// new state is watched.
    async fn update_state(
        &self,
        id: DbId,
        state: TitleState,
    ) -> Result<Option<Title>, sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgTitleStore {
    pool: DbPool,
}

impl PgTitleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TitleStore for PgTitleStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn insert(&self, input: &NewTitle) -> Result<Title, sqlx::Error> {
        TitleRepo::create(&self.pool, input).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Title>, sqlx::Error> {
        TitleRepo::find_by_id(&self.pool, id).await
    }

    async fn list(
        &self,
        filter: &TitleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Title>, sqlx::Error> {
        TitleRepo::list(&self.pool, filter, limit, offset).await
    }

    async fn count_by_state(&self, filter: &TitleFilter) -> Result<StateCounts, sqlx::Error> {
        TitleRepo::count_by_state(&self.pool, filter).await
    }

    async fn replace(&self, id: DbId, input: &NewTitle) -> Result<Option<Title>, sqlx::Error> {
        TitleRepo::replace(&self.pool, id, input).await
    }

    async fn update_state(
        &self,
        id: DbId,
        state: TitleState,
    ) -> Result<Option<Title>, sqlx::Error> {
        TitleRepo::update_state(&self.pool, id, state).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        TitleRepo::delete(&self.pool, id).await
    }
}
