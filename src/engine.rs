use crate::common::TrackingParams;
use crate::detector;
use crate::error::UtmError;
use crate::normalizer;
use crate::rules::RulesRepository;
use crate::url_tools::{self, ParseOptions, ParsedUrl};
use crate::validator::{self, ValidationFinding, ValidationOutcome};

/// Everything the presentation layer may call, bound to one rulebook.
///
/// Holds no mutable state; every method is a pure function of its
/// arguments and the rulebook.
#[derive(Debug, Clone)]
pub struct UtmEngine {
    rules: RulesRepository,
}

impl UtmEngine {
    pub fn new(rules: RulesRepository) -> Self {
        Self { rules }
    }

    pub fn with_builtin_rules() -> Result<Self, UtmError> {
        Ok(Self::new(RulesRepository::builtin()?))
    }

    pub fn rules(&self) -> &RulesRepository {
        &self.rules
    }

    pub fn parse(&self, raw: &str) -> Result<ParsedUrl, UtmError> {
        let options = ParseOptions {
            reject_multiple_query_separators: self.rules.global_rules().no_multiple_question_marks,
        };
        url_tools::parse_with(raw, &options)
    }

    pub fn detect(&self, params: &TrackingParams) -> Option<String> {
        detector::detect(params, &self.rules)
    }

    pub fn validate(&self, params: &TrackingParams, channel_id: &str) -> ValidationOutcome {
        validator::validate(params, channel_id, &self.rules)
    }

    pub fn normalize(&self, value: &str, preserve_macro: bool) -> String {
        normalizer::normalize(value, preserve_macro)
    }

    pub fn apply_fix(&self, url: &str, suggestion: &str) -> String {
        url_tools::apply_fix(url, suggestion)
    }

    pub fn apply_all_fixes(&self, url: &str, findings: &[ValidationFinding]) -> String {
        url_tools::apply_all_fixes(url, findings)
    }

    pub fn build_clean_url(&self, url: &str, params: &TrackingParams) -> String {
        url_tools::build_clean_url(url, params)
    }
}
