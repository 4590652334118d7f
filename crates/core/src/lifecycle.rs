//! Title lifecycle: the `to_watch -> watching -> watched -> to_watch` cycle.
//!
//! Two update paths exist. The full path re-runs the entry validator and may
//! enter any state. The lightweight path only carries a `state` and may never
//! enter `watched`, because that state requires a post-viewing note.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;

/// Lifecycle stage of a catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleState {
    #[default]
    ToWatch,
    Watching,
    Watched,
}

impl TitleState {
    pub const ALL: [TitleState; 3] = [TitleState::ToWatch, TitleState::Watching, TitleState::Watched];

    pub fn as_str(self) -> &'static str {
        match self {
            TitleState::ToWatch => "to_watch",
            TitleState::Watching => "watching",
            TitleState::Watched => "watched",
        }
    }

    /// The next state in the cycle. There is no terminal state.
    pub fn next(self) -> TitleState {
        match self {
            TitleState::ToWatch => TitleState::Watching,
            TitleState::Watching => TitleState::Watched,
            TitleState::Watched => TitleState::ToWatch,
        }
    }

    /// Whether moving from `self` to `target` follows the cycle.
    ///
    /// Staying in the same state is always allowed.
    pub fn can_transition_to(self, target: TitleState) -> bool {
        self == target || self.next() == target
    }

    /// Only watched entries carry a post-viewing note.
    pub fn requires_note_post(self) -> bool {
        self == TitleState::Watched
    }
}

impl fmt::Display for TitleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TitleState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to_watch" => Ok(TitleState::ToWatch),
            "watching" => Ok(TitleState::Watching),
            "watched" => Ok(TitleState::Watched),
            other => Err(CoreError::InvalidState(other.to_string())),
        }
    }
}

/// Gate for the lightweight, state-only update path.
///
/// `watched` is always rejected here, even when the stored entry already has
/// a post-viewing note. The stored state is not consulted.
pub fn check_quick_transition(target: TitleState) -> Result<TitleState, CoreError> {
    if target.requires_note_post() {
        return Err(CoreError::NotePostRequiredForWatched);
    }
    Ok(target)
}

/// Recognize a lightweight patch body: a JSON object whose only key is
/// `state`.
///
/// Returns `None` when the body is a full patch. Otherwise returns the gated
/// target state, or `InvalidState` for a non-string or unknown value.
pub fn parse_quick_patch(body: &Value) -> Option<Result<TitleState, CoreError>> {
    let map = body.as_object()?;
    if map.len() != 1 {
        return None;
    }
    let raw = map.get("state")?;

    let result = match raw.as_str() {
        Some(s) => s.parse::<TitleState>().and_then(check_quick_transition),
        None => Err(CoreError::InvalidState(raw.to_string())),
    };
    Some(result)
}
