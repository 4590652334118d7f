//! External review scores (IMDb, FilmAffinity).
//!
//! Scores arrive as free text typed by the user, possibly with a comma as the
//! decimal separator, and are stored as text with exactly one decimal digit.

/// Lowest accepted score.
pub const MIN_SCORE: f64 = 0.0;

/// Highest accepted score.
pub const MAX_SCORE: f64 = 10.0;

/// Trim whitespace and replace the first comma with a period.
pub fn normalize_decimal(raw: &str) -> String {
    raw.trim().replacen(',', ".", 1)
}

/// Parse a raw score into its canonical one-decimal text form.
///
/// Returns `None` for empty input, unparseable text, non-finite numbers and
/// anything outside `[0, 10]`. Rounding is half away from zero, so `"9.95"`
/// becomes `"10.0"` and `"9,55"` becomes `"9.6"`.
pub fn parse_score(raw: &str) -> Option<String> {
    let normalized = normalize_decimal(raw);
    if normalized.is_empty() {
        return None;
    }
    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&value) {
        return None;
    }
    // `+ 0.0` folds negative zero into zero.
    let rounded = (value * 10.0).round() / 10.0 + 0.0;
    Some(format!("{rounded:.1}"))
}
