//! Integration tests for the `titles` repository against PostgreSQL.
//!
//! These need a live server: run with
//! `DATABASE_URL=postgres://... cargo test -p watchlog-db -- --ignored`.

use serde_json::json;
use sqlx::PgPool;
use watchlog_core::catalog::Kind;
use watchlog_core::lifecycle::TitleState;
use watchlog_core::search::TitleFilter;
use watchlog_core::validation::{validate_title, NewTitle};
use watchlog_db::repositories::TitleRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn matrix() -> NewTitle {
    validate_title(&json!({
        "title": "Matrix",
        "kind": "movie",
        "platform": "NETFLIX",
        "rating": 9,
        "genres": ["Acción", "Ciencia Ficción"],
        "notePre": "classic",
        "externalScoreImdb": "8,7"
    }))
    .unwrap()
}

fn watched(mut input: NewTitle, note: &str) -> NewTitle {
    input.state = TitleState::Watched;
    input.note_post = note.to_string();
    input
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn create_round_trips_all_fields(pool: PgPool) {
    let created = TitleRepo::create(&pool, &matrix()).await.unwrap();

    assert!(created.id > 0);
    assert_eq!(created.title, "Matrix");
    assert_eq!(created.kind, "movie");
    assert_eq!(created.state, "to_watch");
    assert_eq!(created.external_score_imdb.as_deref(), Some("8.7"));
    assert_eq!(created.external_score_film_affinity, None);
    assert_eq!(created.genres, vec!["Acción", "Ciencia Ficción"]);
    assert_eq!(created.note_post, "");
    assert_eq!(created.created_at, created.updated_at);

    let found = TitleRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn replace_refreshes_updated_at_only(pool: PgPool) {
    let created = TitleRepo::create(&pool, &matrix()).await.unwrap();
    let replaced = TitleRepo::replace(&pool, created.id, &matrix())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(replaced.created_at, created.created_at);
    assert!(replaced.updated_at >= created.updated_at);
    assert_eq!(replaced.title, created.title);
    assert_eq!(replaced.genres, created.genres);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn update_state_clears_note_post_when_leaving_watched(pool: PgPool) {
    let created = TitleRepo::create(&pool, &watched(matrix(), "great"))
        .await
        .unwrap();
    assert_eq!(created.note_post, "great");

    let reset = TitleRepo::update_state(&pool, created.id, TitleState::ToWatch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reset.state, "to_watch");
    assert_eq!(reset.note_post, "");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn schema_rejects_watched_without_note(pool: PgPool) {
    let mut input = matrix();
    input.state = TitleState::Watched;
    assert!(TitleRepo::create(&pool, &input).await.is_err());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn schema_rejects_both_external_scores(pool: PgPool) {
    let mut input = matrix();
    input.external_score_film_affinity = Some("7.9".to_string());
    assert!(TitleRepo::create(&pool, &input).await.is_err());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn list_applies_filters_and_escapes_wildcards(pool: PgPool) {
    TitleRepo::create(&pool, &matrix()).await.unwrap();
    let mut percent = matrix();
    percent.title = "100% Wolf".to_string();
    TitleRepo::create(&pool, &percent).await.unwrap();

    let all = TitleRepo::list(&pool, &TitleFilter::default(), 200, 0)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].title, "100% Wolf");

    let filter = TitleFilter::new(Some("MATRIX"), None, Some(Kind::Movie));
    let found = TitleRepo::list(&pool, &filter, 200, 0).await.unwrap();
    assert_eq!(found.len(), 1);

    let filter = TitleFilter::new(Some("%"), None, None);
    let found = TitleRepo::list(&pool, &filter, 200, 0).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "100% Wolf");

    let filter = TitleFilter::new(None, None, Some(Kind::Series));
    assert!(TitleRepo::list(&pool, &filter, 200, 0)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn count_by_state_groups_rows(pool: PgPool) {
    TitleRepo::create(&pool, &matrix()).await.unwrap();
    TitleRepo::create(&pool, &watched(matrix(), "great"))
        .await
        .unwrap();

    let counts = TitleRepo::count_by_state(&pool, &TitleFilter::default())
        .await
        .unwrap();
    assert_eq!(counts.to_watch, 1);
    assert_eq!(counts.watched, 1);
    assert_eq!(counts.total, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL pointing at PostgreSQL"]
async fn delete_reports_whether_a_row_was_removed(pool: PgPool) {
    let created = TitleRepo::create(&pool, &matrix()).await.unwrap();
    assert!(TitleRepo::delete(&pool, created.id).await.unwrap());
    assert!(!TitleRepo::delete(&pool, created.id).await.unwrap());
    assert_eq!(TitleRepo::find_by_id(&pool, created.id).await.unwrap(), None);
}
