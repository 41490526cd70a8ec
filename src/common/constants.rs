/// Click-time substitution placeholder that must survive normalization
pub const MACRO_TOKEN: &str = "{{campaign.name}}";

/// Internal stand-in for the macro token while a value is being normalized.
/// A private-use code point, stripped from input before shielding.
pub const MACRO_SENTINEL: &str = "\u{E000}";

/// Scheme assumed when the user pastes a URL without one
pub const DEFAULT_SCHEME: &str = "https";

/// Separator between alternative fixes inside a suggestion
pub const SUGGESTION_DISJUNCTION: &str = " or ";

/// Maximum number of candidates listed in a disallowed-value suggestion
pub const MAX_SUGGESTED_ALTERNATIVES: usize = 3;

/// Maximum number of rule examples quoted in a reminder
pub const MAX_REMINDER_EXAMPLES: usize = 2;

/// Generic fallbacks used when a rule names neither a preferred nor an allowed value
pub const DEFAULT_CAMPAIGN: &str = "campaign_name";
pub const DEFAULT_CONTENT: &str = "ad_content";
pub const DEFAULT_TERM: &str = "keyword";

/// Bundled rulebook used when no rules file is configured
pub const BUILTIN_RULES_JSON: &str = include_str!("../rules/default_rules.json");

/// Settings file name looked up in the user's config directory
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const APP_CONFIG_DIR: &str = "utm-checker";
