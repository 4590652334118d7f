//! Catalog entry model and listing DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use watchlog_core::lifecycle::TitleState;
use watchlog_core::types::{DbId, Timestamp};

/// A row from the `titles` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Title {
    pub id: DbId,
    pub title: String,
    pub kind: String,
    pub state: String,
    pub platform: String,
    pub rating: i16,
    pub external_score_imdb: Option<String>,
    pub external_score_film_affinity: Option<String>,
    pub genres: Vec<String>,
    pub note_pre: String,
    pub note_post: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query parameters for listing titles.
#[derive(Debug, Default, Deserialize)]
pub struct TitleListParams {
    pub q: Option<String>,
    pub state: Option<String>,
    pub kind: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Number of titles in each lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateCounts {
    pub to_watch: i64,
    pub watching: i64,
    pub watched: i64,
    pub total: i64,
}

impl StateCounts {
    /// Add `count` titles in `state`.
    pub fn add(&mut self, state: TitleState, count: i64) {
        match state {
            TitleState::ToWatch => self.to_watch += count,
            TitleState::Watching => self.watching += count,
            TitleState::Watched => self.watched += count,
        }
        self.total += count;
    }
}
