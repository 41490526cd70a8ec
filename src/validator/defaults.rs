use crate::common::constants::{DEFAULT_CAMPAIGN, DEFAULT_CONTENT, DEFAULT_TERM};
use crate::common::TrackingKey;
use crate::normalizer::normalize;
use crate::rules::{ChannelConfig, TrafficType};

/// Value proposed when `key` is missing for `channel`: the rule's preferred
/// value, else its first allowed value, else a key-specific fallback.
pub(crate) fn default_value(channel: &ChannelConfig, key: TrackingKey) -> String {
    if let Some(rule) = channel.rule(key) {
        if let Some(preferred) = &rule.preferred {
            return preferred.clone();
        }
        if let Some(first) = rule.allowed.as_ref().and_then(|a| a.first()) {
            return first.clone();
        }
    }

    match key {
        TrackingKey::Source => {
            let platform = normalize(&channel.platform, false);
            if platform.is_empty() {
                normalize(&channel.id, false)
            } else {
                platform
            }
        }
        TrackingKey::Medium => match channel.traffic_type {
            TrafficType::Organic => "organic",
            TrafficType::Email => "email",
            TrafficType::Referral => "referral",
            TrafficType::Affiliate => "affiliate",
            TrafficType::Paid | TrafficType::PaidSearch | TrafficType::PaidSocial => "paid",
        }
        .to_string(),
        TrackingKey::Campaign => DEFAULT_CAMPAIGN.to_string(),
        TrackingKey::Content => DEFAULT_CONTENT.to_string(),
        TrackingKey::Term => DEFAULT_TERM.to_string(),
    }
}
