//! Infers the channel a set of tracking values was built for.

use log::debug;

use crate::common::{TrackingKey, TrackingParams};
use crate::rules::{ChannelConfig, RulesRepository};

/// Returns the id of the best matching channel, or `None` when neither
/// source nor medium carries a value.
///
/// Tiers, first hit wins: source and medium together, source alone (paid
/// channels first), medium alone, then the first channel that accepts
/// tracking parameters at all.
pub fn detect(params: &TrackingParams, rules: &RulesRepository) -> Option<String> {
    let source = params.non_blank(TrackingKey::Source).map(str::to_lowercase);
    let medium = params.non_blank(TrackingKey::Medium).map(str::to_lowercase);

    if source.is_none() && medium.is_none() {
        debug!("No source or medium, skipping channel detection");
        return None;
    }

    let candidates: Vec<&ChannelConfig> =
        rules.all_channels().iter().filter(|c| !c.no_utm).collect();

    let source = source.as_deref();
    let medium = medium.as_deref();

    if let (Some(source), Some(medium)) = (source, medium) {
        if let Some(channel) = candidates
            .iter()
            .find(|c| source_matches(c, source, true) && medium_matches(c, medium))
        {
            debug!("Detected '{}' from source and medium", channel.id);
            return Some(channel.id.clone());
        }
    }

    if let Some(source) = source {
        let by_source = candidates
            .iter()
            .filter(|c| c.traffic_type.is_paid())
            .find(|c| source_matches(c, source, false))
            .or_else(|| candidates.iter().find(|c| source_matches(c, source, false)));
        if let Some(channel) = by_source {
            debug!("Detected '{}' from source only", channel.id);
            return Some(channel.id.clone());
        }
    }

    if let Some(medium) = medium {
        if let Some(channel) = candidates.iter().find(|c| medium_matches(c, medium)) {
            debug!("Detected '{}' from medium only", channel.id);
            return Some(channel.id.clone());
        }
    }

    let fallback = candidates.first().map(|c| c.id.clone());
    debug!("No channel matched, falling back to {:?}", fallback);
    fallback
}

fn source_matches(channel: &ChannelConfig, source: &str, accept_free_text: bool) -> bool {
    channel
        .rule(TrackingKey::Source)
        .map_or(false, |rule| {
            rule.allows(source) || (accept_free_text && rule.allow_free_text)
        })
}

fn medium_matches(channel: &ChannelConfig, medium: &str) -> bool {
    channel
        .rule(TrackingKey::Medium)
        .map_or(false, |rule| rule.allows(medium))
}
