use crate::catalog::Kind;
use crate::types::DbId;

/// Rejection reasons for catalog operations.
///
/// Every variant except [`CoreError::EntryNotFound`] is a local validation
/// failure; the caller's only remedy is to resubmit a corrected payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required field: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("Invalid kind '{0}'. Must be one of: movie, series")]
    InvalidKind(String),

    #[error("Invalid state '{0}'. Must be one of: to_watch, watching, watched")]
    InvalidState(String),

    #[error("Invalid platform '{0}'")]
    InvalidPlatform(String),

    #[error("Invalid rating '{0}'. Must be an integer between 1 and 10")]
    InvalidRating(String),

    #[error("Invalid genre '{genre}' for kind {kind}")]
    InvalidGenre { genre: String, kind: Kind },

    #[error("IMDb and FilmAffinity scores are mutually exclusive")]
    ScoresMutuallyExclusive,

    #[error("notePost is required when state is watched")]
    NotePostRequiredForWatched,

    #[error("Entry not found: title with id {id}")]
    EntryNotFound { id: DbId },
}

impl CoreError {
    /// Stable machine-readable code, surfaced to API clients alongside the
    /// human-readable message.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::MissingRequiredField { .. } => "MISSING_REQUIRED_FIELD",
            CoreError::InvalidKind(_) => "INVALID_KIND",
            CoreError::InvalidState(_) => "INVALID_STATE",
            CoreError::InvalidPlatform(_) => "INVALID_PLATFORM",
            CoreError::InvalidRating(_) => "INVALID_RATING",
            CoreError::InvalidGenre { .. } => "INVALID_GENRE",
            CoreError::ScoresMutuallyExclusive => "SCORES_MUTUALLY_EXCLUSIVE",
            CoreError::NotePostRequiredForWatched => "NOTE_POST_REQUIRED_FOR_WATCHED",
            CoreError::EntryNotFound { .. } => "ENTRY_NOT_FOUND",
        }
    }

    /// `true` for payload problems, `false` for lookups that did not resolve.
    pub fn is_validation(&self) -> bool {
        !matches!(self, CoreError::EntryNotFound { .. })
    }
}
