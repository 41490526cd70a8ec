use serde::Serialize;

use crate::common::{TrackingKey, TrackingParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The URL is not usable as-is.
    Blocking,
    /// Stylistic or preferential.
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationFinding {
    pub severity: Severity,
    pub param: Option<TrackingKey>,
    pub message: String,
    /// `key=value`, or several of them joined with `" or "`.
    pub suggestion: Option<String>,
}

impl ValidationFinding {
    pub fn blocking(
        param: Option<TrackingKey>,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            severity: Severity::Blocking,
            param,
            message: message.into(),
            suggestion,
        }
    }

    pub fn advisory(
        param: Option<TrackingKey>,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            severity: Severity::Advisory,
            param,
            message: message.into(),
            suggestion,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub has_warnings: bool,
    pub blocking: Vec<ValidationFinding>,
    pub advisory: Vec<ValidationFinding>,
    pub params: TrackingParams,
    pub channel_id: String,
}

impl ValidationOutcome {
    pub fn from_findings(
        findings: Vec<ValidationFinding>,
        params: &TrackingParams,
        channel_id: &str,
    ) -> Self {
        let (blocking, advisory): (Vec<_>, Vec<_>) =
            findings.into_iter().partition(ValidationFinding::is_blocking);

        Self {
            is_valid: blocking.is_empty(),
            has_warnings: !advisory.is_empty(),
            blocking,
            advisory,
            params: params.clone(),
            channel_id: channel_id.to_string(),
        }
    }

    /// Blocking findings attached to `key`.
    pub fn blocking_for(&self, key: TrackingKey) -> impl Iterator<Item = &ValidationFinding> + '_ {
        self.blocking.iter().filter(move |f| f.param == Some(key))
    }
}

/// `key=value` in the shape the fixer reads.
pub(crate) fn suggest(key: TrackingKey, value: &str) -> String {
    format!("{}={}", key, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_splits_by_severity() {
        let findings = vec![
            ValidationFinding::advisory(Some(TrackingKey::Term), "recommended", None),
            ValidationFinding::blocking(Some(TrackingKey::Source), "missing", None),
        ];
        let outcome = ValidationOutcome::from_findings(findings, &TrackingParams::default(), "x");

        assert!(!outcome.is_valid);
        assert!(outcome.has_warnings);
        assert_eq!(outcome.blocking.len(), 1);
        assert_eq!(outcome.advisory.len(), 1);
        assert_eq!(outcome.blocking_for(TrackingKey::Source).count(), 1);
    }

    #[test]
    fn test_advisories_alone_keep_outcome_valid() {
        let findings = vec![ValidationFinding::advisory(None, "style", None)];
        let outcome = ValidationOutcome::from_findings(findings, &TrackingParams::default(), "x");
        assert!(outcome.is_valid);
        assert!(outcome.has_warnings);
    }

    #[test]
    fn test_suggest_shape() {
        assert_eq!(suggest(TrackingKey::Medium, "cpc"), "utm_medium=cpc");
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Blocking).unwrap(),
            "\"blocking\""
        );
    }
}
