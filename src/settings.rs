use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::common::constants::{APP_CONFIG_DIR, SETTINGS_FILE_NAME};
use crate::rules::RulesRepository;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Rulebook to load instead of the bundled one.
    #[serde(default)]
    pub rules_file: Option<String>,
    /// Used when auto-detection is off or finds nothing.
    #[serde(default)]
    pub default_channel: Option<String>,
    #[serde(default = "default_true")]
    pub auto_detect_channel: bool,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default = "default_true")]
    pub show_warnings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules_file: None,
            default_channel: None,
            auto_detect_channel: true,
            output_format: OutputFormat::Text,
            show_warnings: true,
        }
    }
}

impl Settings {
    pub fn load(settings_file: &str) -> Result<Self> {
        let path = Path::new(settings_file);
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "settings file not found at '{}'",
                settings_file
            ));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", settings_file))?;

        let settings: Settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", settings_file))?;

        info!("Settings loaded from '{}'.", settings_file);
        Ok(settings)
    }

    /// Explicit path if given, else the user config directory, else defaults.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::user_settings_path() {
            Some(path) if path.exists() => Self::load(&path.to_string_lossy()),
            _ => {
                debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn user_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(SETTINGS_FILE_NAME))
    }

    /// Loads the configured rulebook, falling back to the bundled one.
    pub fn load_rules(&self, override_file: Option<&str>) -> Result<RulesRepository> {
        match override_file.or(self.rules_file.as_deref()) {
            Some(file) => {
                let contents = fs::read_to_string(file)
                    .with_context(|| format!("Failed to read rules file: {}", file))?;
                let rules = RulesRepository::from_json(&contents)
                    .with_context(|| format!("Failed to load rules file: {}", file))?;
                info!("Rules loaded from '{}'.", file);
                Ok(rules)
            }
            None => Ok(RulesRepository::builtin().context("Bundled rulebook is invalid")?),
        }
    }
}
