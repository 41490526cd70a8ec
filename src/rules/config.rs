use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common::TrackingKey;

fn default_true() -> bool {
    true
}

fn default_allowed_pattern() -> String {
    "^[a-z0-9_]+$".to_string()
}

/// Traffic classification of a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficType {
    Paid,
    PaidSearch,
    PaidSocial,
    Organic,
    Email,
    Referral,
    Affiliate,
}

impl TrafficType {
    pub fn is_paid(&self) -> bool {
        matches!(
            self,
            TrafficType::Paid | TrafficType::PaidSearch | TrafficType::PaidSocial
        )
    }
}

/// Constraint on one tracking key within one channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParamRule {
    pub required: bool,
    pub allowed: Option<Vec<String>>,
    pub preferred: Option<String>,
    pub warn_if_not_preferred: bool,
    pub allow_free_text: bool,
    pub allow_macro: bool,
    pub warn_if_missing: bool,
    pub guidance: Option<String>,
    pub examples: Vec<String>,
}

impl ParamRule {
    /// Case-insensitive membership in the allowed set. `false` when the rule has no set.
    pub fn allows(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        self.allowed
            .as_deref()
            .unwrap_or_default()
            .iter()
            .any(|a| a.to_lowercase() == value)
    }

    pub fn is_preferred(&self, value: &str) -> bool {
        self.preferred
            .as_deref()
            .map_or(true, |p| p.to_lowercase() == value.to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelConfig {
    pub id: String,
    pub label: String,
    pub platform: String,
    pub traffic_type: TrafficType,
    /// Channel must not carry any tracking parameters (e.g. organic search).
    #[serde(default)]
    pub no_utm: bool,
    #[serde(default)]
    pub params: BTreeMap<TrackingKey, ParamRule>,
}

impl ChannelConfig {
    pub fn rule(&self, key: TrackingKey) -> Option<&ParamRule> {
        if self.no_utm {
            return None;
        }
        self.params.get(&key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalRules {
    #[serde(default)]
    pub required_params: Vec<TrackingKey>,
    #[serde(default = "default_true")]
    pub lowercase_only: bool,
    #[serde(default = "default_allowed_pattern")]
    pub allowed_pattern: String,
    #[serde(default = "default_true")]
    pub no_spaces: bool,
    #[serde(default = "default_true")]
    pub no_multiple_question_marks: bool,
    #[serde(default)]
    pub require_at_least_one_utm: bool,
}

/// Top-level rulebook document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesConfig {
    pub version: u32,
    pub global_rules: GlobalRules,
    pub channels: Vec<ChannelConfig>,
}
