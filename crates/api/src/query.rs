//! Query-string parsing shared by the title handlers.

use watchlog_core::catalog::Kind;
use watchlog_core::error::CoreError;
use watchlog_core::lifecycle::TitleState;
use watchlog_core::search::TitleFilter;
use watchlog_db::models::title::TitleListParams;

/// Turn raw `?q=&state=&kind=` parameters into a typed filter.
///
/// Blank values do not filter; unknown states or kinds are rejected.
pub fn title_filter(params: &TitleListParams) -> Result<TitleFilter, CoreError> {
    let state = non_blank(params.state.as_deref())
        .map(str::parse::<TitleState>)
        .transpose()?;
    let kind = non_blank(params.kind.as_deref())
        .map(str::parse::<Kind>)
        .transpose()?;
    Ok(TitleFilter::new(params.q.as_deref(), state, kind))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_parameters_do_not_filter() {
        let params = TitleListParams {
            q: Some(" ".into()),
            state: Some(String::new()),
            kind: None,
            ..Default::default()
        };
        assert_eq!(title_filter(&params), Ok(TitleFilter::default()));
    }

    #[test]
    fn known_values_are_parsed() {
        let params = TitleListParams {
            q: Some("matrix".into()),
            state: Some("watching".into()),
            kind: Some("movie".into()),
            ..Default::default()
        };
        let filter = title_filter(&params).unwrap();
        assert_eq!(filter.q.as_deref(), Some("matrix"));
        assert_eq!(filter.state, Some(TitleState::Watching));
        assert_eq!(filter.kind, Some(Kind::Movie));
    }

    #[test]
    fn unknown_values_are_rejected() {
        let params = TitleListParams {
            state: Some("vista".into()),
            ..Default::default()
        };
        assert_eq!(
            title_filter(&params),
            Err(CoreError::InvalidState("vista".into()))
        );

        let params = TitleListParams {
            kind: Some("anime".into()),
            ..Default::default()
        };
        assert_eq!(
            title_filter(&params),
            Err(CoreError::InvalidKind("anime".into()))
        );
    }
}
