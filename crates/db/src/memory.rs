//! In-process [`TitleStore`], used when no `DATABASE_URL` is configured and
//! by the HTTP integration tests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use watchlog_core::catalog::Kind;
use watchlog_core::lifecycle::TitleState;
use watchlog_core::search::TitleFilter;
use watchlog_core::types::{DbId, Timestamp};
use watchlog_core::validation::NewTitle;

use crate::models::title::{StateCounts, Title};
use crate::store::TitleStore;

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    last_stamp: Option<Timestamp>,
    titles: BTreeMap<DbId, Title>,
}

impl Inner {
    /// Current time, forced strictly past the previous stamp so listing
    /// order and `updated_at` refreshes stay observable within one tick.
    fn stamp(&mut self) -> Timestamp {
        let now = chrono::Utc::now();
        let next = match self.last_stamp {
            Some(last) if now <= last => last + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(next);
        next
    }
}

/// Titles kept in a map behind an async lock. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryTitleStore {
    inner: RwLock<Inner>,
}

impl MemoryTitleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Copy the editable fields of `input` onto `title`.
fn apply(title: &mut Title, input: &NewTitle) {
    title.title = input.title.clone();
    title.kind = input.kind.as_str().to_string();
    title.state = input.state.as_str().to_string();
    title.platform = input.platform.clone();
    title.rating = input.rating;
    title.external_score_imdb = input.external_score_imdb.clone();
    title.external_score_film_affinity = input.external_score_film_affinity.clone();
    title.genres = input.genres.clone();
    title.note_pre = input.note_pre.clone();
    title.note_post = input.note_post.clone();
}

fn matches(filter: &TitleFilter, title: &Title) -> bool {
    match (title.state.parse::<TitleState>(), title.kind.parse::<Kind>()) {
        (Ok(state), Ok(kind)) => filter.matches(&title.title, state, kind),
        _ => false,
    }
}

#[async_trait]
impl TitleStore for MemoryTitleStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn insert(&self, input: &NewTitle) -> Result<Title, sqlx::Error> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let created_at = inner.stamp();
        let mut title = Title {
            id: inner.last_id,
            title: String::new(),
            kind: String::new(),
            state: String::new(),
            platform: String::new(),
            rating: 0,
            external_score_imdb: None,
            external_score_film_affinity: None,
            genres: Vec::new(),
            note_pre: String::new(),
            note_post: String::new(),
            created_at,
            updated_at: created_at,
        };
        apply(&mut title, input);
        inner.titles.insert(title.id, title.clone());
        Ok(title)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Title>, sqlx::Error> {
        Ok(self.inner.read().await.titles.get(&id).cloned())
    }

    async fn list(
        &self,
        filter: &TitleFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Title>, sqlx::Error> {
        let inner = self.inner.read().await;
        let mut titles: Vec<Title> = inner
            .titles
            .values()
            .filter(|t| matches(filter, t))
            .cloned()
            .collect();
        titles.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(titles.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_by_state(&self, filter: &TitleFilter) -> Result<StateCounts, sqlx::Error> {
        let inner = self.inner.read().await;
        let mut counts = StateCounts::default();
        for title in inner.titles.values().filter(|t| matches(filter, t)) {
            if let Ok(state) = title.state.parse::<TitleState>() {
                counts.add(state, 1);
            }
        }
        Ok(counts)
    }

    async fn replace(&self, id: DbId, input: &NewTitle) -> Result<Option<Title>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        if !inner.titles.contains_key(&id) {
            return Ok(None);
        }
        let updated_at = inner.stamp();
        Ok(inner.titles.get_mut(&id).map(|title| {
            apply(title, input);
            title.updated_at = updated_at;
            title.clone()
        }))
    }

    async fn update_state(
        &self,
        id: DbId,
        state: TitleState,
    ) -> Result<Option<Title>, sqlx::Error> {
        let mut inner = self.inner.write().await;
        if !inner.titles.contains_key(&id) {
            return Ok(None);
        }
        let updated_at = inner.stamp();
        Ok(inner.titles.get_mut(&id).map(|title| {
            title.state = state.as_str().to_string();
            if !state.requires_note_post() {
                title.note_post.clear();
            }
            title.updated_at = updated_at;
            title.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        Ok(self.inner.write().await.titles.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use watchlog_core::validation::validate_title;

    use super::*;

    fn new_title(name: &str, kind: &str, genre: &str) -> NewTitle {
        validate_title(&json!({
            "title": name,
            "kind": kind,
            "platform": "NETFLIX",
            "rating": 8,
            "genres": [genre],
            "notePre": "recommended"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_timestamps() {
        let store = MemoryTitleStore::new();
        let a = store.insert(&new_title("Alien", "movie", "Terror")).await.unwrap();
        let b = store.insert(&new_title("Lost", "series", "Misterio")).await.unwrap();
        assert!(b.id > a.id);
        assert_eq!(a.created_at, a.updated_at);
        assert_eq!(a.state, "to_watch");
        assert_eq!(b.kind, "series");
    }

    #[tokio::test]
    async fn missing_ids_resolve_to_none() {
        let store = MemoryTitleStore::new();
        let input = new_title("Alien", "movie", "Terror");
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
        assert_eq!(store.replace(42, &input).await.unwrap(), None);
        assert_eq!(store.update_state(42, TitleState::Watching).await.unwrap(), None);
        assert!(!store.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn list_filters_and_orders_newest_first() {
        let store = MemoryTitleStore::new();
        let alien = store.insert(&new_title("Alien", "movie", "Terror")).await.unwrap();
        store.insert(&new_title("Aliens", "movie", "Acción")).await.unwrap();
        store.insert(&new_title("Lost", "series", "Misterio")).await.unwrap();
        store.update_state(alien.id, TitleState::Watching).await.unwrap();

        let all = store.list(&TitleFilter::default(), 200, 0).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title, "Alien");

        let filter = TitleFilter::new(Some("ALIEN"), None, Some(Kind::Movie));
        let movies = store.list(&filter, 200, 0).await.unwrap();
        assert_eq!(movies.len(), 2);

        let filter = TitleFilter::new(None, Some(TitleState::Watching), None);
        let watching = store.list(&filter, 200, 0).await.unwrap();
        assert_eq!(watching.len(), 1);
        assert_eq!(watching[0].id, alien.id);

        let page = store.list(&TitleFilter::default(), 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn counts_group_by_state() {
        let store = MemoryTitleStore::new();
        let a = store.insert(&new_title("Alien", "movie", "Terror")).await.unwrap();
        store.insert(&new_title("Lost", "series", "Misterio")).await.unwrap();
        store.update_state(a.id, TitleState::Watching).await.unwrap();

        let counts = store.count_by_state(&TitleFilter::default()).await.unwrap();
        assert_eq!(
            counts,
            StateCounts {
                to_watch: 1,
                watching: 1,
                watched: 0,
                total: 2,
            }
        );
    }

    #[tokio::test]
    async fn leaving_watched_clears_note_post() {
        let store = MemoryTitleStore::new();
        let created = store.insert(&new_title("Alien", "movie", "Terror")).await.unwrap();
        let mut watched = new_title("Alien", "movie", "Terror");
        watched.state = TitleState::Watched;
        watched.note_post = "tense".to_string();
        let replaced = store.replace(created.id, &watched).await.unwrap().unwrap();
        assert_eq!(replaced.note_post, "tense");

        let reset = store
            .update_state(created.id, TitleState::ToWatch)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(reset.state, "to_watch");
        assert_eq!(reset.note_post, "");
        assert!(reset.updated_at > replaced.updated_at);
    }

    #[tokio::test]
    async fn delete_removes_the_entry() {
        let store = MemoryTitleStore::new();
        let created = store.insert(&new_title("Alien", "movie", "Terror")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert_eq!(store.find_by_id(created.id).await.unwrap(), None);
    }
}
