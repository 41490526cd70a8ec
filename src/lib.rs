//! UTM Checker - validate and repair campaign tracking parameters
//!
//! Checks the `utm_*` parameters of a URL against a rulebook of global
//! rules and per-channel rules, then proposes single-click corrections.
//!
//! # Quick Start
//!
//! ```
//! use utm_checker::{TrackingKey, UtmEngine};
//!
//! let engine = UtmEngine::with_builtin_rules()?;
//!
//! let parsed = engine.parse("example.com?utm_source=google&utm_medium=cpc&utm_campaign=Spring Sale")?;
//! let channel = engine.detect(&parsed.params).unwrap_or_else(|| "google_ads".to_string());
//! let outcome = engine.validate(&parsed.params, &channel);
//! assert!(!outcome.is_valid);
//!
//! let fixed = engine.apply_all_fixes(&parsed.normalized_url, &outcome.blocking);
//! let reparsed = engine.parse(&fixed)?;
//! assert_eq!(reparsed.params.get(TrackingKey::Campaign), Some("spring_sale"));
//! # Ok::<(), utm_checker::UtmError>(())
//! ```
//!
//! # Components
//!
//! - `rules` - rulebook types and the read-only repository
//! - `url_tools` - parser, fixer and URL rebuilder
//! - `detector` - channel auto-detection
//! - `validator` - blocking and advisory findings
//! - `normalizer` - value clean-up shared by validator and fixer

pub use common::{TrackingKey, TrackingParams};
pub use detector::detect;
pub use engine::UtmEngine;
pub use error::UtmError;
pub use normalizer::normalize;
pub use rules::{ChannelConfig, GlobalRules, ParamRule, RulesConfig, RulesRepository, TrafficType};
pub use url_tools::{
    apply_all_fixes, apply_fix, build_clean_url, parse, parse_with, ParseOptions, ParsedUrl,
};
pub use validator::{validate, Severity, ValidationFinding, ValidationOutcome};

pub mod common;
pub mod detector;
pub mod engine;
pub mod error;
pub mod normalizer;
pub mod report;
pub mod rules;
pub mod settings;
pub mod url_tools;
pub mod validator;
