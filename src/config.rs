//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rbset/rbset.toml`
//! 3. Explicit config: `--config <file>`
//! 4. Environment variables: `RBSET_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DumpStyle;

/// How `printtree` renders a tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DumpConfig {
    /// Prefix for red elements
    pub red_marker: String,
    /// Text between elements
    pub separator: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        let style = DumpStyle::default();
        Self {
            red_marker: style.red_marker,
            separator: style.separator,
        }
    }
}

/// Raw dump config for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDumpConfig {
    pub red_marker: Option<String>,
    pub separator: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub verify: Option<bool>,
    #[serde(default)]
    pub dump: RawDumpConfig,
}

impl DumpConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawDumpConfig) -> Self {
        Self {
            red_marker: overlay
                .red_marker
                .clone()
                .unwrap_or_else(|| self.red_marker.clone()),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
        }
    }
}

/// Unified configuration for rbset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Check every tree invariant after each insert
    pub verify: bool,
    /// Dump rendering
    pub dump: DumpConfig,
}

/// Get the XDG config directory for rbset.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rbset").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rbset.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Style handed to the tree when dumping.
    pub fn dump_style(&self) -> DumpStyle {
        DumpStyle {
            red_marker: self.dump.red_marker.clone(),
            separator: self.dump.separator.clone(),
        }
    }

    /// Merge overlay config onto self (base); overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            verify: overlay.verify.unwrap_or(self.verify),
            dump: self.dump.merge(&overlay.dump),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Config file given on the command line; must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rbset/rbset.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `RBSET_*` prefix
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Apply RBSET_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(Environment::with_prefix("RBSET").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("verify") {
            settings.verify = val;
        }
        if let Ok(val) = config.get_string("dump.red_marker") {
            settings.dump.red_marker = val;
        }
        if let Ok(val) = config.get_string("dump.separator") {
            settings.dump.separator = val;
        }

        Ok(settings)
    }

    /// An empty separator would glue elements together.
    fn validate(&self) -> Result<(), ApplicationError> {
        if self.dump.separator.is_empty() {
            return Err(ApplicationError::Config {
                message: "dump.separator must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# rbset configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/rbset/rbset.toml
#   Explicit: rbset --config <file>
#   Env:      RBSET_* environment variables (RBSET_VERIFY, RBSET_DUMP__RED_MARKER)

# Check all red-black invariants after every insert
# verify = false

[dump]
# Prefix printed in front of red elements
# red_marker = "*"

# Text between elements (must not be empty)
# separator = " "
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_match_classic_dump() {
        let settings = Settings::default();
        assert!(!settings.verify);
        assert_eq!(settings.dump.red_marker, "*");
        assert_eq!(settings.dump.separator, " ");
        assert_eq!(settings.dump_style(), DumpStyle::default());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            verify: Some(true),
            dump: RawDumpConfig {
                red_marker: Some("r".into()),
                separator: None,
            },
        };

        let merged = base.merge_with(&overlay);

        assert!(merged.verify);
        assert_eq!(merged.dump.red_marker, "r");
        assert_eq!(merged.dump.separator, " ");
    }

    #[test]
    fn given_empty_overlay_when_merging_then_base_kept() {
        let base = Settings {
            verify: true,
            dump: DumpConfig {
                red_marker: "#".into(),
                separator: ",".into(),
            },
        };
        assert_eq!(base.merge_with(&RawSettings::default()), base);
    }

    #[test]
    fn given_empty_separator_when_validating_then_config_error() {
        let mut settings = Settings::default();
        settings.dump.separator.clear();
        assert!(matches!(
            settings.validate(),
            Err(ApplicationError::Config { .. })
        ));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.verify.is_none());
        assert!(raw.dump.red_marker.is_none());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().expect("serialize");
        let back: Settings = toml::from_str(&text).expect("parse");
        assert_eq!(back, settings);
    }
}
