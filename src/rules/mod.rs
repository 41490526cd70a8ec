mod config;
mod repository;

pub use config::{ChannelConfig, GlobalRules, ParamRule, RulesConfig, TrafficType};
pub use repository::RulesRepository;
