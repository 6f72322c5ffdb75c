//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/isic4/isic4.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ISIC4_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, DEFAULT_LANGUAGE};

const ENV_PREFIX: &str = "ISIC4";

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub language: Option<String>,
    pub case_sensitive: Option<bool>,
    pub data_dir: Option<PathBuf>,
}

/// Unified configuration for isic4.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Dataset language (default: "en")
    pub language: String,
    /// Exact-case search matching (default: false)
    pub case_sensitive: bool,
    /// Directory of `<language>.json` datasets; bundled datasets when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            case_sensitive: false,
            data_dir: None,
        }
    }
}

/// Get the XDG config directory for isic4.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "isic4").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("isic4.toml"))
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

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), config_file, ENV_PREFIX)
    }

    /// Load with an explicit global config path and environment prefix.
    ///
    /// `global` is skipped when `None` or absent on disk; only `<env_prefix>_*`
    /// variables are read.
    pub fn load_layers(
        global: Option<&Path>,
        config_file: Option<&Path>,
        env_prefix: &str,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, skipped when absent
        if let Some(global_path) = global {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, env_prefix)?;

        current.normalize();
        Ok(current)
    }

    /// Overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            language: overlay
                .language
                .clone()
                .unwrap_or_else(|| self.language.clone()),
            case_sensitive: overlay.case_sensitive.unwrap_or(self.case_sensitive),
            data_dir: overlay.data_dir.clone().or_else(|| self.data_dir.clone()),
        }
    }

    /// Apply `<prefix>_*` environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, prefix: &str) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(prefix).prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("language") {
            settings.language = val;
        }
        if let Ok(val) = config.get_string("case_sensitive") {
            settings.case_sensitive = parse_bool(&val).ok_or_else(|| ApplicationError::Config {
                message: format!("{prefix}_CASE_SENSITIVE: not a boolean: '{val}'"),
            })?;
        }
        if let Ok(val) = config.get_string("data_dir") {
            settings.data_dir = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Lowercase the language and expand shell variables in `data_dir`.
    fn normalize(&mut self) {
        self.language = self.language.to_lowercase();
        if let Some(dir) = &self.data_dir {
            self.data_dir = Some(PathBuf::from(expand_env_vars(&dir.to_string_lossy())));
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# isic4 configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/isic4/isic4.toml
#   File:   --config <path>
#   Env:    ISIC4_LANGUAGE, ISIC4_CASE_SENSITIVE, ISIC4_DATA_DIR

# Dataset language
# language = "en"

# Match search queries with exact case
# case_sensitive = false

# Directory with <language>.json datasets (bundled datasets when unset)
# data_dir = "~/.local/share/isic4"
"#
        .to_string()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_layers(None, None, "ISIC4_TEST_DEFAULTS").expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.language, "en");
        assert!(!settings.case_sensitive);
    }

    #[test]
    fn given_global_and_explicit_file_when_loading_then_explicit_wins() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global.toml");
        let local = temp.path().join("local.toml");
        std::fs::write(&global, "language = \"ar\"\ncase_sensitive = true\n").unwrap();
        std::fs::write(&local, "language = \"EN\"\n").unwrap();

        let settings =
            Settings::load_layers(Some(&global), Some(&local), "ISIC4_TEST_FILES").unwrap();

        assert_eq!(settings.language, "en", "explicit file wins and is lowercased");
        assert!(settings.case_sensitive, "unspecified keys inherit from global");
    }

    #[test]
    fn given_missing_explicit_file_when_loading_then_fails() {
        let err = Settings::load_layers(None, Some(Path::new("/nonexistent/isic4.toml")), "ISIC4_TEST_MISSING")
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_env_overrides_when_loading_then_env_wins() {
        std::env::set_var("ISIC4_TEST_ENV_LANGUAGE", "AR");
        std::env::set_var("ISIC4_TEST_ENV_CASE_SENSITIVE", "yes");
        std::env::set_var("ISIC4_TEST_ENV_DATA_DIR", "$HOME/isic");

        let settings = Settings::load_layers(None, None, "ISIC4_TEST_ENV").unwrap();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert_eq!(settings.language, "ar");
        assert!(settings.case_sensitive);
        assert_eq!(settings.data_dir, Some(PathBuf::from(format!("{home}/isic"))));
    }

    #[test]
    fn given_invalid_bool_in_env_when_loading_then_fails() {
        std::env::set_var("ISIC4_TEST_BADBOOL_CASE_SENSITIVE", "maybe");
        let err = Settings::load_layers(None, None, "ISIC4_TEST_BADBOOL").unwrap_err();
        assert!(err.to_string().contains("not a boolean"));
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("ON", Some(true))]
    #[case("0", Some(false))]
    #[case("no", Some(false))]
    #[case("maybe", None)]
    fn test_parse_bool(#[case] input: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(input), expected);
    }

    #[test]
    fn test_to_toml_round_trips_through_raw_settings() {
        let settings = Settings {
            language: "ar".into(),
            case_sensitive: true,
            data_dir: Some(PathBuf::from("/srv/isic")),
        };
        let raw: RawSettings = toml::from_str(&settings.to_toml().unwrap()).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }

    #[test]
    fn test_template_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.language.is_none());
    }
}
