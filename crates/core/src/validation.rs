//! Entry validator.
//!
//! Turns an untyped JSON field set into a normalized [`NewTitle`] or a single
//! [`CoreError`] naming the first rule the payload breaks. Used by both the
//! create and the full-patch paths; timestamps are left to storage.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::catalog::{self, Kind};
use crate::error::CoreError;
use crate::lifecycle::TitleState;
use crate::score;

// ---------------------------------------------------------------------------
// Field names (wire format)
// ---------------------------------------------------------------------------

pub const FIELD_TITLE: &str = "title";
pub const FIELD_KIND: &str = "kind";
pub const FIELD_STATE: &str = "state";
pub const FIELD_PLATFORM: &str = "platform";
pub const FIELD_RATING: &str = "rating";
pub const FIELD_SCORE_IMDB: &str = "externalScoreImdb";
pub const FIELD_SCORE_FILM_AFFINITY: &str = "externalScoreFilmAffinity";
pub const FIELD_GENRES: &str = "genres";
pub const FIELD_NOTE_PRE: &str = "notePre";
pub const FIELD_NOTE_POST: &str = "notePost";

/// Lowest personal rating.
pub const MIN_RATING: i16 = 1;

/// Highest personal rating.
pub const MAX_RATING: i16 = 10;

/// A payload that passed every rule, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTitle {
    pub title: String,
    pub kind: Kind,
    pub state: TitleState,
    pub platform: String,
    pub rating: i16,
    pub external_score_imdb: Option<String>,
    pub external_score_film_affinity: Option<String>,
    pub genres: Vec<String>,
    pub note_pre: String,
    /// Empty unless `state` is watched.
    pub note_post: String,
}

/// Validate and normalize a create / full-patch payload.
///
/// A non-object payload is treated as an empty field set.
pub fn validate_title(input: &Value) -> Result<NewTitle, CoreError> {
    let empty = Map::new();
    let fields = input.as_object().unwrap_or(&empty);

    // Presence first, so a sparse payload reports the missing field rather
    // than whatever happens to be malformed.
    let title = required_text(fields, FIELD_TITLE)?;
    let kind_raw = required_text(fields, FIELD_KIND)?;
    let platform = required_text(fields, FIELD_PLATFORM)?;
    let note_pre = required_text(fields, FIELD_NOTE_PRE)?;
    let rating_raw = required_value(fields, FIELD_RATING)?;
    let genres_raw = required_value(fields, FIELD_GENRES)?;

    let kind: Kind = kind_raw.parse()?;
    catalog::validate_platform(&platform)?;
    let rating = validate_rating(rating_raw)?;
    let genres = validate_genres(genres_raw, kind)?;

    let (external_score_imdb, external_score_film_affinity) = validate_scores(
        score_text(fields.get(FIELD_SCORE_IMDB)),
        score_text(fields.get(FIELD_SCORE_FILM_AFFINITY)),
    )?;

    let state = match fields.get(FIELD_STATE) {
        None | Some(Value::Null) => TitleState::default(),
        Some(Value::String(s)) => s.trim().parse()?,
        Some(other) => return Err(CoreError::InvalidState(other.to_string())),
    };

    let note_post = if state.requires_note_post() {
        let note = optional_text(fields, FIELD_NOTE_POST);
        if note.is_empty() {
            return Err(CoreError::NotePostRequiredForWatched);
        }
        note
    } else {
        String::new()
    };

    Ok(NewTitle {
        title,
        kind,
        state,
        platform,
        rating,
        external_score_imdb,
        external_score_film_affinity,
        genres,
        note_pre,
        note_post,
    })
}

/// Validate a personal rating: an integral JSON number in `[1, 10]`.
pub fn validate_rating(value: &Value) -> Result<i16, CoreError> {
    let invalid = || CoreError::InvalidRating(value.to_string());

    let n = value.as_f64().ok_or_else(invalid)?;
    if n.fract() != 0.0 || !(f64::from(MIN_RATING)..=f64::from(MAX_RATING)).contains(&n) {
        return Err(invalid());
    }
    Ok(n as i16)
}

/// Validate genres against the vocabulary for `kind`.
///
/// Members are trimmed and de-duplicated, keeping first-seen order.
pub fn validate_genres(value: &Value, kind: Kind) -> Result<Vec<String>, CoreError> {
    let items = value.as_array().ok_or_else(|| CoreError::InvalidGenre {
        genre: value.to_string(),
        kind,
    })?;

    let mut genres: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let genre = match item.as_str() {
            Some(s) => s.trim(),
            None => {
                return Err(CoreError::InvalidGenre {
                    genre: item.to_string(),
                    kind,
                })
            }
        };
        if !kind.allows_genre(genre) {
            return Err(CoreError::InvalidGenre {
                genre: genre.to_string(),
                kind,
            });
        }
        if !genres.iter().any(|g| g == genre) {
            genres.push(genre.to_string());
        }
    }
    Ok(genres)
}

/// Apply the exclusivity rule and normalize both external scores.
///
/// Both raw values being non-empty is rejected regardless of whether either
/// parses. A single unparseable or out-of-range score is dropped.
pub fn validate_scores(
    imdb_raw: Option<String>,
    film_affinity_raw: Option<String>,
) -> Result<(Option<String>, Option<String>), CoreError> {
    let imdb_raw = imdb_raw.filter(|s| !s.trim().is_empty());
    let film_affinity_raw = film_affinity_raw.filter(|s| !s.trim().is_empty());

    if imdb_raw.is_some() && film_affinity_raw.is_some() {
        return Err(CoreError::ScoresMutuallyExclusive);
    }

    Ok((
        imdb_raw.as_deref().and_then(score::parse_score),
        film_affinity_raw.as_deref().and_then(score::parse_score),
    ))
}

// ---------------------------------------------------------------------------
// Field access helpers
// ---------------------------------------------------------------------------

/// A trimmed, non-empty string field. Non-string values count as missing.
fn required_text(fields: &Map<String, Value>, field: &'static str) -> Result<String, CoreError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(CoreError::MissingRequiredField { field })
}

/// Any non-null value; empty strings and empty arrays count as missing.
fn required_value<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value, CoreError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(CoreError::MissingRequiredField { field }),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(CoreError::MissingRequiredField { field })
        }
        Some(Value::Array(a)) if a.is_empty() => Err(CoreError::MissingRequiredField { field }),
        Some(value) => Ok(value),
    }
}

fn optional_text(fields: &Map<String, Value>, field: &str) -> String {
    fields
        .get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Raw text of a score field. Numbers are accepted as typed by JSON clients.
fn score_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
