use serde::{Deserialize, Serialize};
use std::fmt;

/// The five recognised tracking keys, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrackingKey {
    #[serde(rename = "utm_source")]
    Source,
    #[serde(rename = "utm_medium")]
    Medium,
    #[serde(rename = "utm_campaign")]
    Campaign,
    #[serde(rename = "utm_content")]
    Content,
    #[serde(rename = "utm_term")]
    Term,
}

impl TrackingKey {
    pub const ALL: [TrackingKey; 5] = [
        TrackingKey::Source,
        TrackingKey::Medium,
        TrackingKey::Campaign,
        TrackingKey::Content,
        TrackingKey::Term,
    ];

    /// Query parameter name as it appears in a URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrackingKey::Source => "utm_source",
            TrackingKey::Medium => "utm_medium",
            TrackingKey::Campaign => "utm_campaign",
            TrackingKey::Content => "utm_content",
            TrackingKey::Term => "utm_term",
        }
    }

    /// Exact, case-sensitive lookup of a query parameter name.
    pub fn from_query_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for TrackingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values of the five tracking keys. `None` means absent, which is not the
/// same as present-with-empty-string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackingParams {
    #[serde(rename = "utm_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "utm_medium", skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(rename = "utm_campaign", skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
    #[serde(rename = "utm_content", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "utm_term", skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
}

impl TrackingParams {
    pub fn get(&self, key: TrackingKey) -> Option<&str> {
        self.slot(key).as_deref()
    }

    /// Value when present and not just whitespace.
    pub fn non_blank(&self, key: TrackingKey) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn is_blank(&self, key: TrackingKey) -> bool {
        self.non_blank(key).is_none()
    }

    /// Returns a copy with `key` set to `value`.
    pub fn with(&self, key: TrackingKey, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        *next.slot_mut(key) = Some(value.into());
        next
    }

    /// Returns a copy with `key` removed.
    pub fn without(&self, key: TrackingKey) -> Self {
        let mut next = self.clone();
        *next.slot_mut(key) = None;
        next
    }

    /// Present keys in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackingKey, &str)> + '_ {
        TrackingKey::ALL
            .into_iter()
            .filter_map(move |key| self.get(key).map(|v| (key, v)))
    }

    pub fn has_any_value(&self) -> bool {
        TrackingKey::ALL.into_iter().any(|key| !self.is_blank(key))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn slot(&self, key: TrackingKey) -> &Option<String> {
        match key {
            TrackingKey::Source => &self.source,
            TrackingKey::Medium => &self.medium,
            TrackingKey::Campaign => &self.campaign,
            TrackingKey::Content => &self.content,
            TrackingKey::Term => &self.term,
        }
    }

    fn slot_mut(&mut self, key: TrackingKey) -> &mut Option<String> {
        match key {
            TrackingKey::Source => &mut self.source,
            TrackingKey::Medium => &mut self.medium,
            TrackingKey::Campaign => &mut self.campaign,
            TrackingKey::Content => &mut self.content,
            TrackingKey::Term => &mut self.term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_name_lookup() {
        assert_eq!(
            TrackingKey::from_query_name("utm_medium"),
            Some(TrackingKey::Medium)
        );
        assert_eq!(TrackingKey::from_query_name("UTM_MEDIUM"), None);
        assert_eq!(TrackingKey::from_query_name("gclid"), None);
    }

    #[test]
    fn test_with_does_not_touch_original() {
        let params = TrackingParams::default();
        let updated = params.with(TrackingKey::Source, "google");

        assert_eq!(params.get(TrackingKey::Source), None);
        assert_eq!(updated.get(TrackingKey::Source), Some("google"));
        assert_eq!(updated.without(TrackingKey::Source), params);
    }

    #[test]
    fn test_empty_value_is_present_but_blank() {
        let params = TrackingParams::default().with(TrackingKey::Term, "");

        assert_eq!(params.get(TrackingKey::Term), Some(""));
        assert!(params.is_blank(TrackingKey::Term));
        assert!(!params.is_empty());
        assert!(!params.has_any_value());
    }

    #[test]
    fn test_iter_uses_canonical_order() {
        let params = TrackingParams::default()
            .with(TrackingKey::Term, "shoes")
            .with(TrackingKey::Source, "google");

        let keys: Vec<TrackingKey> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![TrackingKey::Source, TrackingKey::Term]);
    }

    #[test]
    fn test_serialize_uses_query_names() {
        let params = TrackingParams::default().with(TrackingKey::Medium, "cpc");
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"utm_medium":"cpc"}"#);
    }
}
