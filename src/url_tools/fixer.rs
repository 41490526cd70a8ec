use log::{debug, warn};

use super::query::{parse_with_default_scheme, QueryParts};
use crate::common::constants::SUGGESTION_DISJUNCTION;
use crate::common::{TrackingKey, TrackingParams};
use crate::validator::{Severity, ValidationFinding};

/// Reads the first alternative of a suggestion as a `key=value` pair.
pub fn parse_suggestion(suggestion: &str) -> Option<(TrackingKey, String)> {
    let first = suggestion.split(SUGGESTION_DISJUNCTION).next()?.trim();
    let (name, value) = first.split_once('=')?;
    let key = TrackingKey::from_query_name(name.trim())?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((key, value.to_string()))
}

/// Applies one suggestion to `url`. Returns `url` untouched when either the
/// suggestion or the URL cannot be read.
pub fn apply_fix(url: &str, suggestion: &str) -> String {
    let Some((key, value)) = parse_suggestion(suggestion) else {
        debug!("Ignoring suggestion without key=value shape: '{}'", suggestion);
        return url.to_string();
    };

    let parsed = match parse_with_default_scheme(url.trim()) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Cannot apply fix to '{}': {}", url, e);
            return url.to_string();
        }
    };

    let parts = QueryParts::split(&parsed);
    let tracking = parts.tracking.with(key, value);
    parts.with_tracking(tracking).to_url_string(false)
}

/// Folds `apply_fix` over the suggestions of blocking findings only.
pub fn apply_all_fixes(url: &str, findings: &[ValidationFinding]) -> String {
    findings
        .iter()
        .filter(|f| f.severity == Severity::Blocking)
        .filter_map(|f| f.suggestion.as_deref())
        .fold(url.to_string(), |current, suggestion| {
            apply_fix(&current, suggestion)
        })
}

/// Rebuilds the query of `url` from `params`, keeping non-tracking pairs.
pub fn build_clean_url(url: &str, params: &TrackingParams) -> String {
    match parse_with_default_scheme(url.trim()) {
        Ok(parsed) => QueryParts::split(&parsed)
            .with_tracking(params.clone())
            .to_url_string(true),
        Err(e) => {
            warn!("Cannot rebuild '{}': {}", url, e);
            url.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocking(suggestion: &str) -> ValidationFinding {
        ValidationFinding::blocking(None, "test", Some(suggestion.to_string()))
    }

    #[test]
    fn test_parse_suggestion() {
        assert_eq!(
            parse_suggestion("utm_campaign=spring_sale"),
            Some((TrackingKey::Campaign, "spring_sale".to_string()))
        );
        assert_eq!(
            parse_suggestion("utm_source=facebook or utm_source=instagram"),
            Some((TrackingKey::Source, "facebook".to_string()))
        );
        assert_eq!(parse_suggestion("use lowercase"), None);
        assert_eq!(parse_suggestion("utm_source="), None);
        assert_eq!(parse_suggestion("gclid=abc"), None);
    }

    #[test]
    fn test_apply_fix_takes_first_alternative() {
        let fixed = apply_fix(
            "https://example.com/?utm_source=fb",
            "utm_source=facebook or utm_source=instagram",
        );
        assert_eq!(fixed, "https://example.com/?utm_source=facebook");
    }

    #[test]
    fn test_apply_fix_adds_missing_key_in_order() {
        let fixed = apply_fix(
            "https://example.com/?utm_campaign=x&ref=nav&utm_source=google",
            "utm_medium=cpc",
        );
        assert_eq!(
            fixed,
            "https://example.com/?ref=nav&utm_source=google&utm_medium=cpc&utm_campaign=x"
        );
    }

    #[test]
    fn test_apply_fix_keeps_foreign_encoding_and_flags() {
        assert_eq!(
            apply_fix("https://a.com/?q=caf%E9&utm_source=x", "utm_source=google"),
            "https://a.com/?q=caf%E9&utm_source=google"
        );
        assert_eq!(
            apply_fix("https://a.com/?debug&utm_source=x", "utm_source=google"),
            "https://a.com/?debug&utm_source=google"
        );
    }

    #[test]
    fn test_apply_fix_bad_suggestion_is_noop() {
        let url = "https://example.com/?utm_source=google";
        assert_eq!(apply_fix(url, "not a fix"), url);
    }

    #[test]
    fn test_apply_fix_bad_url_is_noop() {
        assert_eq!(apply_fix("https://", "utm_source=google"), "https://");
    }

    #[test]
    fn test_apply_all_fixes_skips_advisories() {
        let findings = vec![
            blocking("utm_campaign=spring_sale"),
            ValidationFinding::advisory(
                Some(TrackingKey::Medium),
                "prefer cpc",
                Some("utm_medium=cpc".to_string()),
            ),
        ];
        let fixed = apply_all_fixes(
            "https://example.com/?utm_medium=ppc&utm_campaign=Spring+Sale",
            &findings,
        );
        assert_eq!(
            fixed,
            "https://example.com/?utm_medium=ppc&utm_campaign=spring_sale"
        );
    }

    #[test]
    fn test_apply_all_fixes_in_order() {
        let findings = vec![blocking("utm_source=a"), blocking("utm_source=b")];
        let fixed = apply_all_fixes("https://example.com/", &findings);
        assert_eq!(fixed, "https://example.com/?utm_source=b");
    }

    #[test]
    fn test_build_clean_url() {
        let params = TrackingParams::default()
            .with(TrackingKey::Campaign, "launch")
            .with(TrackingKey::Source, "google")
            .with(TrackingKey::Term, "");
        let clean = build_clean_url("https://example.com/p?utm_source=old&gclid=1#x", &params);
        assert_eq!(
            clean,
            "https://example.com/p?gclid=1&utm_source=google&utm_campaign=launch#x"
        );
    }

    #[test]
    fn test_build_clean_url_keeps_other_segments_verbatim() {
        let params = TrackingParams::default().with(TrackingKey::Source, "google");
        assert_eq!(
            build_clean_url("https://a.com/?q=caf%E9&debug&x=a+b&utm_source=G", &params),
            "https://a.com/?q=caf%E9&debug&x=a+b&utm_source=google"
        );
    }

    #[test]
    fn test_build_clean_url_bad_base() {
        let params = TrackingParams::default().with(TrackingKey::Source, "google");
        assert_eq!(build_clean_url("", &params), "");
    }
}
