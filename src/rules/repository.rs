use log::{debug, info};
use regex::Regex;
use std::collections::HashSet;

use super::config::{ChannelConfig, GlobalRules, RulesConfig};
use crate::common::constants::BUILTIN_RULES_JSON;
use crate::error::UtmError;

/// Read-only view over a loaded rulebook.
#[derive(Debug, Clone)]
pub struct RulesRepository {
    version: u32,
    global: GlobalRules,
    channels: Vec<ChannelConfig>,
    allowed_pattern: Regex,
}

impl RulesRepository {
    pub fn new(config: RulesConfig) -> Result<Self, UtmError> {
        let allowed_pattern = Regex::new(&config.global_rules.allowed_pattern)?;

        let mut seen = HashSet::new();
        for channel in &config.channels {
            if !seen.insert(channel.id.as_str()) {
                return Err(UtmError::InvalidRules(format!(
                    "duplicate channel id '{}'",
                    channel.id
                )));
            }
        }

        info!(
            "Rules v{} loaded with {} channel(s)",
            config.version,
            config.channels.len()
        );

        Ok(Self {
            version: config.version,
            global: config.global_rules,
            channels: config.channels,
            allowed_pattern,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, UtmError> {
        let config: RulesConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    /// The rulebook shipped with the crate.
    pub fn builtin() -> Result<Self, UtmError> {
        debug!("Loading built-in rulebook");
        Self::from_json(BUILTIN_RULES_JSON)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn all_channels(&self) -> &[ChannelConfig] {
        &self.channels
    }

    pub fn channel_by_id(&self, id: &str) -> Option<&ChannelConfig> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn global_rules(&self) -> &GlobalRules {
        &self.global
    }

    /// Compiled form of `GlobalRules::allowed_pattern`.
    pub fn allowed_pattern(&self) -> &Regex {
        &self.allowed_pattern
    }
}
