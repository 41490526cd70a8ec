use log::debug;
use serde::Serialize;

use super::query::{parse_with_default_scheme, QueryParts};
use crate::common::TrackingParams;
use crate::error::UtmError;

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedUrl {
    pub params: TrackingParams,
    pub normalized_url: String,
    /// Query pairs that are not tracking keys, in original order.
    pub other_params: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    pub reject_multiple_query_separators: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            reject_multiple_query_separators: true,
        }
    }
}

/// Extracts the tracking parameters from a pasted URL.
///
/// Succeeds with an empty parameter set when the URL carries none.
pub fn parse(raw: &str) -> Result<ParsedUrl, UtmError> {
    parse_with(raw, &ParseOptions::default())
}

pub fn parse_with(raw: &str, options: &ParseOptions) -> Result<ParsedUrl, UtmError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UtmError::EmptyInput);
    }

    if options.reject_multiple_query_separators && query_separator_count(trimmed) > 1 {
        return Err(UtmError::MalformedQuery);
    }

    let url = parse_with_default_scheme(trimmed)?;
    let parts = QueryParts::split(&url);

    debug!(
        "Parsed {} tracking value(s) and {} other pair(s) from {}",
        parts.tracking.iter().count(),
        parts.others.len(),
        url
    );

    Ok(ParsedUrl {
        other_params: parts.other_pairs(),
        params: parts.tracking,
        normalized_url: url.to_string(),
    })
}

fn query_separator_count(raw: &str) -> usize {
    let before_fragment = raw.split('#').next().unwrap_or(raw);
    before_fragment.matches('?').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TrackingKey;

    #[test]
    fn test_blank_input() {
        assert_eq!(parse("").unwrap_err(), UtmError::EmptyInput);
        assert_eq!(parse("   \t").unwrap_err(), UtmError::EmptyInput);
    }

    #[test]
    fn test_double_question_mark() {
        assert_eq!(parse("site.com??a=1").unwrap_err(), UtmError::MalformedQuery);
        assert_eq!(
            parse("https://site.com/?a=1?utm_source=x").unwrap_err(),
            UtmError::MalformedQuery
        );
    }

    #[test]
    fn test_question_mark_in_fragment_is_fine() {
        let parsed = parse("https://site.com/?utm_source=google#faq?q=1").unwrap();
        assert_eq!(parsed.params.get(TrackingKey::Source), Some("google"));
    }

    #[test]
    fn test_double_question_mark_allowed_when_disabled() {
        let options = ParseOptions {
            reject_multiple_query_separators: false,
        };
        assert!(parse_with("site.com??a=1", &options).is_ok());
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(parse("https://"), Err(UtmError::InvalidUrl(_))));
        assert!(matches!(parse("http://exa mple.com"), Err(UtmError::InvalidUrl(_))));
    }

    #[test]
    fn test_scheme_assumed() {
        let parsed = parse("example.com?utm_source=google").unwrap();
        assert!(parsed.normalized_url.starts_with("https://example.com/"));
        assert_eq!(parsed.params.get(TrackingKey::Source), Some("google"));
    }

    #[test]
    fn test_empty_value_is_present() {
        let parsed = parse("https://example.com/?utm_term=&utm_source=google").unwrap();
        assert_eq!(parsed.params.get(TrackingKey::Term), Some(""));
        assert_eq!(parsed.params.get(TrackingKey::Content), None);
    }

    #[test]
    fn test_no_query_is_empty_set() {
        let parsed = parse("https://example.com/landing").unwrap();
        assert!(parsed.params.is_empty());
        assert!(parsed.other_params.is_empty());
    }

    #[test]
    fn test_spaces_are_decoded() {
        let parsed = parse("example.com?utm_campaign=Spring Sale").unwrap();
        assert_eq!(parsed.params.get(TrackingKey::Campaign), Some("Spring Sale"));
    }

    #[test]
    fn test_other_params_kept_aside() {
        let parsed = parse("https://example.com/?gclid=123&utm_medium=cpc").unwrap();
        assert_eq!(
            parsed.other_params,
            vec![("gclid".to_string(), "123".to_string())]
        );
        assert_eq!(parsed.params.get(TrackingKey::Medium), Some("cpc"));
    }

    #[test]
    fn test_bare_flag_reported_with_empty_value() {
        let parsed = parse("https://example.com/?debug&utm_source=google").unwrap();
        assert_eq!(
            parsed.other_params,
            vec![("debug".to_string(), String::new())]
        );
    }
}
