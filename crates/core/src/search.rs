//! Listing filters and pagination helpers.

use crate::catalog::Kind;
use crate::lifecycle::TitleState;

/// Default and maximum page size for title listings.
pub const DEFAULT_LIST_LIMIT: i64 = 200;

/// Criteria for listing titles. `None` fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    /// Case-insensitive substring of the title, already trimmed.
    pub q: Option<String>,
    pub state: Option<TitleState>,
    pub kind: Option<Kind>,
}

impl TitleFilter {
    /// Build a filter, dropping a blank search string.
    pub fn new(q: Option<&str>, state: Option<TitleState>, kind: Option<Kind>) -> Self {
        Self {
            q: normalize_query(q),
            state,
            kind,
        }
    }

    /// The same filter without the state criterion, used for per-state counts.
    pub fn without_state(&self) -> Self {
        Self {
            state: None,
            ..self.clone()
        }
    }

    /// In-process evaluation of the filter against one entry.
    pub fn matches(&self, title: &str, state: TitleState, kind: Kind) -> bool {
        self.state.map_or(true, |s| s == state)
            && self.kind.map_or(true, |k| k == kind)
            && self
                .q
                .as_deref()
                .map_or(true, |q| contains_ignore_case(title, q))
    }
}

/// Trim a user-provided search string; blank means "no search".
pub fn normalize_query(q: Option<&str>) -> Option<String> {
    q.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Unicode-aware case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
