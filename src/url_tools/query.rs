use regex::Regex;
use url::{form_urlencoded, Url};

use crate::common::constants::DEFAULT_SCHEME;
use crate::common::{TrackingKey, TrackingParams};
use crate::error::UtmError;

thread_local! {
    static SCHEME_RE: Regex = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").unwrap();
}

/// A URL split into its base, the non-tracking query segments and the
/// tracking values.
///
/// Non-tracking segments are kept exactly as they appeared in the query
/// string (original order, original encoding) so rebuilding never rewrites
/// them.
#[derive(Debug, Clone)]
pub(crate) struct QueryParts {
    pub base: Url,
    pub others: Vec<String>,
    pub tracking: TrackingParams,
}

pub(crate) fn has_scheme(raw: &str) -> bool {
    SCHEME_RE.with(|re| re.is_match(raw))
}

/// Parses `raw`, assuming `https://` when no scheme is given.
pub(crate) fn parse_with_default_scheme(raw: &str) -> Result<Url, UtmError> {
    let candidate = if has_scheme(raw) {
        raw.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, raw)
    };
    let url = Url::parse(&candidate)?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(UtmError::InvalidUrl(format!("'{}' has no host", raw)));
    }
    Ok(url)
}

/// Decodes one raw `name=value` segment. A bare `name` yields an empty value.
fn decode_segment(segment: &str) -> (String, String) {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .unwrap_or_default()
}

impl QueryParts {
    /// Duplicate tracking keys keep their first value.
    pub fn split(url: &Url) -> Self {
        let mut others = Vec::new();
        let mut tracking = TrackingParams::default();

        let segments = url.query().unwrap_or("").split('&');
        for segment in segments.filter(|s| !s.is_empty()) {
            let (name, value) = decode_segment(segment);
            match TrackingKey::from_query_name(&name) {
                Some(key) if tracking.get(key).is_none() => {
                    tracking = tracking.with(key, value);
                }
                Some(_) => {}
                None => others.push(segment.to_string()),
            }
        }

        let mut base = url.clone();
        base.set_query(None);

        Self {
            base,
            others,
            tracking,
        }
    }

    pub fn with_tracking(self, tracking: TrackingParams) -> Self {
        Self { tracking, ..self }
    }

    /// Decoded view of the non-tracking segments.
    pub fn other_pairs(&self) -> Vec<(String, String)> {
        self.others.iter().map(|s| decode_segment(s)).collect()
    }

    /// Writes the non-tracking segments back verbatim, then the tracking
    /// keys in canonical order. Blank tracking values are dropped when
    /// `skip_blank` is set.
    pub fn to_url_string(&self, skip_blank: bool) -> String {
        let mut segments = self.others.clone();
        for (key, value) in self.tracking.iter() {
            if skip_blank && value.trim().is_empty() {
                continue;
            }
            segments.push(
                form_urlencoded::Serializer::new(String::new())
                    .append_pair(key.as_str(), value)
                    .finish(),
            );
        }

        let mut url = self.base.clone();
        if !segments.is_empty() {
            url.set_query(Some(&segments.join("&")));
        }
        url.to_string()
    }
}
