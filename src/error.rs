//! Error types for URL parsing and rulebook loading.

use thiserror::Error;

/// Errors surfaced by the engine. All of them are local to one call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtmError {
    /// The input was empty or whitespace only.
    #[error("Please enter a URL")]
    EmptyInput,

    /// More than one `?` appears before the fragment.
    #[error("URL contains more than one '?' query separator")]
    MalformedQuery,

    /// The input could not be parsed as a URL even after assuming a scheme.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Validation was requested against a channel id the rulebook lacks.
    #[error("Unknown channel: {0}")]
    UnknownChannel(String),

    /// The rulebook document is not usable.
    #[error("Invalid rules configuration: {0}")]
    InvalidRules(String),
}

impl From<url::ParseError> for UtmError {
    fn from(err: url::ParseError) -> Self {
        UtmError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for UtmError {
    fn from(err: serde_json::Error) -> Self {
        UtmError::InvalidRules(err.to_string())
    }
}

impl From<regex::Error> for UtmError {
    fn from(err: regex::Error) -> Self {
        UtmError::InvalidRules(format!("allowedPattern does not compile: {}", err))
    }
}
