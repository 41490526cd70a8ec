use regex::Regex;

use super::defaults::default_value;
use super::findings::{suggest, ValidationFinding};
use crate::common::constants::MACRO_TOKEN;
use crate::common::{TrackingKey, TrackingParams};
use crate::normalizer::normalize;
use crate::rules::{ChannelConfig, GlobalRules, ParamRule};

/// Cross-channel checks: required keys, then at most one format finding per
/// value (spacing, then case, then character set).
pub fn check(
    params: &TrackingParams,
    channel: &ChannelConfig,
    global: &GlobalRules,
    allowed_pattern: &Regex,
) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    for &key in &global.required_params {
        if params.is_blank(key) {
            findings.push(ValidationFinding::blocking(
                Some(key),
                format!("{} is required", key),
                Some(suggest(key, &default_value(channel, key))),
            ));
        }
    }

    if global.require_at_least_one_utm
        && global.required_params.is_empty()
        && !params.has_any_value()
    {
        findings.push(ValidationFinding::blocking(
            None,
            "No UTM parameters found",
            None,
        ));
    }

    for key in TrackingKey::ALL {
        let Some(value) = params.non_blank(key) else {
            continue;
        };
        let rule = channel.rule(key);
        if let Some(finding) = check_format(key, value, rule, global, allowed_pattern) {
            findings.push(finding);
        }
    }

    findings
}

fn check_format(
    key: TrackingKey,
    value: &str,
    rule: Option<&ParamRule>,
    global: &GlobalRules,
    allowed_pattern: &Regex,
) -> Option<ValidationFinding> {
    let allow_macro = rule.map_or(false, |r| r.allow_macro);
    let fix = || normalized_suggestion(key, value, allow_macro);

    if global.no_spaces && value.chars().any(char::is_whitespace) {
        return Some(ValidationFinding::blocking(
            Some(key),
            format!("{} contains spaces: '{}'", key, value),
            fix(),
        ));
    }

    if global.lowercase_only && value != value.to_lowercase() {
        let lowered = value.to_lowercase();
        // A case-only mismatch against an allowed value is matched anyway.
        if rule.map_or(false, |r| r.allows(&lowered)) {
            return Some(ValidationFinding::advisory(
                Some(key),
                format!("{} '{}' should be written in lowercase", key, value),
                Some(suggest(key, &lowered)),
            ));
        }
        return Some(ValidationFinding::blocking(
            Some(key),
            format!("{} must be lowercase: '{}'", key, value),
            fix(),
        ));
    }

    let checked = if allow_macro {
        value.replace(MACRO_TOKEN, "")
    } else {
        value.to_string()
    };
    if !checked.is_empty() && !allowed_pattern.is_match(&checked) {
        return Some(ValidationFinding::blocking(
            Some(key),
            format!("{} contains characters that are not allowed: '{}'", key, value),
            fix(),
        ));
    }

    None
}

fn normalized_suggestion(key: TrackingKey, value: &str, allow_macro: bool) -> Option<String> {
    let normalized = normalize(value, allow_macro);
    if normalized.is_empty() || normalized == value {
        None
    } else {
        Some(suggest(key, &normalized))
    }
}
