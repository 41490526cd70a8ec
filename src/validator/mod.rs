//! Evaluates tracking values against the global rules and one channel.

mod channel;
mod defaults;
mod findings;
mod global;

use log::debug;
use std::collections::HashSet;

use crate::common::{TrackingKey, TrackingParams};
use crate::error::UtmError;
use crate::rules::RulesRepository;

pub use findings::{Severity, ValidationFinding, ValidationOutcome};

pub fn validate(
    params: &TrackingParams,
    channel_id: &str,
    rules: &RulesRepository,
) -> ValidationOutcome {
    let Some(channel) = rules.channel_by_id(channel_id) else {
        let finding = ValidationFinding::blocking(
            None,
            UtmError::UnknownChannel(channel_id.to_string()).to_string(),
            None,
        );
        return ValidationOutcome::from_findings(vec![finding], params, channel_id);
    };

    if channel.no_utm {
        let findings = if params.has_any_value() {
            vec![ValidationFinding::blocking(
                None,
                format!("{} traffic must not carry UTM parameters", channel.label),
                None,
            )]
        } else {
            Vec::new()
        };
        return ValidationOutcome::from_findings(findings, params, channel_id);
    }

    let global = rules.global_rules();
    let mut findings = global::check(params, channel, global, rules.allowed_pattern());

    let flagged: HashSet<TrackingKey> = findings
        .iter()
        .filter(|f| f.is_blocking())
        .filter_map(|f| f.param)
        .collect();
    findings.extend(channel::check(params, channel, global, &flagged));

    let outcome = ValidationOutcome::from_findings(findings, params, channel_id);
    debug!(
        "Validated against '{}': {} blocking, {} advisory",
        channel_id,
        outcome.blocking.len(),
        outcome.advisory.len()
    );
    outcome
}
