use std::collections::HashSet;

use super::defaults::default_value;
use super::findings::{suggest, ValidationFinding};
use crate::common::constants::{
    MAX_REMINDER_EXAMPLES, MAX_SUGGESTED_ALTERNATIVES, SUGGESTION_DISJUNCTION,
};
use crate::common::{TrackingKey, TrackingParams};
use crate::rules::{ChannelConfig, GlobalRules, ParamRule};

/// Per-channel checks. Keys listed in `flagged` already carry a blocking
/// format finding and are not checked against the allowed set again.
pub fn check(
    params: &TrackingParams,
    channel: &ChannelConfig,
    global: &GlobalRules,
    flagged: &HashSet<TrackingKey>,
) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();

    for (&key, rule) in &channel.params {
        match params.non_blank(key) {
            None => {
                if let Some(finding) = check_missing(key, rule, channel, global) {
                    findings.push(finding);
                }
            }
            Some(_) if flagged.contains(&key) => {}
            Some(value) => {
                if let Some(finding) = check_value(key, value, rule, channel) {
                    findings.push(finding);
                }
            }
        }
    }

    findings
}

fn check_missing(
    key: TrackingKey,
    rule: &ParamRule,
    channel: &ChannelConfig,
    global: &GlobalRules,
) -> Option<ValidationFinding> {
    if rule.warn_if_missing {
        let mut message = format!("{} is recommended for {}", key, channel.label);
        if !rule.examples.is_empty() {
            let examples: Vec<&str> = rule
                .examples
                .iter()
                .take(MAX_REMINDER_EXAMPLES)
                .map(String::as_str)
                .collect();
            message.push_str(&format!(" (e.g. {})", examples.join(", ")));
        }
        let suggestion = (rule.preferred.is_some() || rule.allowed.is_some())
            .then(|| suggest(key, &default_value(channel, key)));
        return Some(ValidationFinding::advisory(Some(key), message, suggestion));
    }

    if rule.required && !global.required_params.contains(&key) {
        return Some(ValidationFinding::blocking(
            Some(key),
            format!("{} is required for {}", key, channel.label),
            Some(suggest(key, &default_value(channel, key))),
        ));
    }

    None
}

fn check_value(
    key: TrackingKey,
    value: &str,
    rule: &ParamRule,
    channel: &ChannelConfig,
) -> Option<ValidationFinding> {
    let allowed = rule.allowed.as_ref()?;

    if !rule.allows(value) {
        if rule.allow_free_text {
            return None;
        }
        return Some(ValidationFinding::blocking(
            Some(key),
            format!(
                "'{}' is not an accepted {} for {} (expected one of: {})",
                value,
                key,
                channel.label,
                allowed.join(", ")
            ),
            alternatives(key, rule, allowed),
        ));
    }

    if rule.warn_if_not_preferred && !rule.is_preferred(value) {
        let preferred = rule.preferred.as_deref()?;
        return Some(ValidationFinding::advisory(
            Some(key),
            format!(
                "{} '{}' is accepted, but '{}' is preferred for {}",
                key, value, preferred, channel.label
            ),
            Some(suggest(key, preferred)),
        ));
    }

    None
}

/// Preferred value first, then the rest of the allowed set.
fn alternatives(key: TrackingKey, rule: &ParamRule, allowed: &[String]) -> Option<String> {
    let mut candidates: Vec<&str> = Vec::new();
    if let Some(preferred) = rule.preferred.as_deref() {
        candidates.push(preferred);
    }
    for value in allowed {
        if !candidates.iter().any(|c| c.eq_ignore_ascii_case(value)) {
            candidates.push(value);
        }
    }
    if candidates.is_empty() {
        return None;
    }

    Some(
        candidates
            .into_iter()
            .take(MAX_SUGGESTED_ALTERNATIVES)
            .map(|v| suggest(key, v))
            .collect::<Vec<_>>()
            .join(SUGGESTION_DISJUNCTION),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RulesRepository;

    fn run(params: &TrackingParams, channel_id: &str) -> Vec<ValidationFinding> {
        let repo = RulesRepository::builtin().unwrap();
        let channel = repo.channel_by_id(channel_id).unwrap();
        check(params, channel, repo.global_rules(), &HashSet::new())
    }

    fn base(source: &str, medium: &str) -> TrackingParams {
        TrackingParams::default()
            .with(TrackingKey::Source, source)
            .with(TrackingKey::Medium, medium)
            .with(TrackingKey::Campaign, "launch")
    }

    #[test]
    fn test_value_outside_allowed_set_blocks() {
        let findings = run(&base("fb", "paid_social"), "meta_ads");
        let blocking: Vec<_> = findings.iter().filter(|f| f.is_blocking()).collect();
        assert_eq!(blocking.len(), 1);
        assert_eq!(
            blocking[0].suggestion.as_deref(),
            Some("utm_source=facebook or utm_source=instagram or utm_source=meta")
        );
    }

    #[test]
    fn test_allowed_match_ignores_case() {
        let findings = run(&base("Google", "CPC"), "google_ads");
        assert!(findings.iter().all(|f| !f.is_blocking()));
    }

    #[test]
    fn test_free_text_skips_allowed_set() {
        let json = r#"{"version": 1, "globalRules": {}, "channels": [
            {"id": "p", "label": "Partners", "platform": "P", "trafficType": "affiliate",
             "params": {"utm_source": {"allowed": ["awin"], "allowFreeText": true}}}]}"#;
        let repo = RulesRepository::from_json(json).unwrap();
        let channel = repo.channel_by_id("p").unwrap();
        let params = TrackingParams::default().with(TrackingKey::Source, "some_blog");
        assert!(check(&params, channel, repo.global_rules(), &HashSet::new()).is_empty());
    }

    #[test]
    fn test_not_preferred_is_advisory() {
        let findings = run(&base("google", "ppc"), "google_ads");
        let medium: Vec<_> = findings
            .iter()
            .filter(|f| f.param == Some(TrackingKey::Medium))
            .collect();
        assert_eq!(medium.len(), 1);
        assert!(!medium[0].is_blocking());
        assert_eq!(medium[0].suggestion.as_deref(), Some("utm_medium=cpc"));
    }

    #[test]
    fn test_missing_reminder_quotes_two_examples() {
        let findings = run(&base("google", "cpc"), "google_ads");
        let term = findings
            .iter()
            .find(|f| f.param == Some(TrackingKey::Term))
            .unwrap();
        assert!(!term.is_blocking());
        assert!(term.message.contains("running_shoes, brand_name"));
        assert!(!term.message.contains("free_shipping"));
        assert_eq!(term.suggestion, None);
    }

    #[test]
    fn test_flagged_keys_skip_value_checks() {
        let repo = RulesRepository::builtin().unwrap();
        let channel = repo.channel_by_id("google_ads").unwrap();
        let params = base("google", "Paid Search");
        let flagged: HashSet<TrackingKey> = [TrackingKey::Medium].into_iter().collect();
        let findings = check(&params, channel, repo.global_rules(), &flagged);
        assert!(findings.iter().all(|f| f.param != Some(TrackingKey::Medium)));
    }

    #[test]
    fn test_channel_required_outside_global_list() {
        let json = r#"{"version": 1, "globalRules": {"requiredParams": ["utm_source"]}, "channels": [
            {"id": "n", "label": "Newsletter", "platform": "N", "trafficType": "email",
             "params": {"utm_content": {"required": true, "allowed": ["header"]}}}]}"#;
        let repo = RulesRepository::from_json(json).unwrap();
        let channel = repo.channel_by_id("n").unwrap();
        let params = TrackingParams::default().with(TrackingKey::Source, "newsletter");
        let findings = check(&params, channel, repo.global_rules(), &HashSet::new());
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_blocking());
        assert_eq!(findings[0].suggestion.as_deref(), Some("utm_content=header"));
    }
}
