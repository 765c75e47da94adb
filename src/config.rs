use crate::error::{ReleaseMakerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "releasemaker.toml";

/// File name looked up in the user config directory.
pub const USER_CONFIG_FILE: &str = ".releasemaker.toml";

/// Represents the complete configuration for release-maker.
///
/// Contains forge endpoints, the token variable, the default branch, changelog
/// settings, marker symbols and the emoji category table.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_web_url")]
    pub web_url: String,

    #[serde(default = "default_token_env_var")]
    pub token_env_var: String,

    #[serde(default = "default_branch")]
    pub default_branch: String,

    #[serde(default = "default_changelog_file")]
    pub changelog_file: String,

    #[serde(default = "default_release_label")]
    pub release_label: String,

    #[serde(default)]
    pub markers: MarkersConfig,

    #[serde(default = "default_categories")]
    pub categories: BTreeMap<String, Vec<String>>,
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_token_env_var() -> String {
    "GH_TOKEN".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_release_label() -> String {
    "release".to_string()
}

/// Returns the default category table, keyed by category name.
fn default_categories() -> BTreeMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 6] = [
        (
            "Additions",
            &["✨", "🎉", "➕", "📈", "🌐", "💬", "🔊", "🚸", "🥅", "💫"],
        ),
        (
            "Fixes",
            &["🐛", "🚑", "🩹", "🔒", "🍎", "🐧", "🏁", "🤖", "🍏", "✏️", "🚨", "💚"],
        ),
        (
            "Ops",
            &["🔧", "🐳", "👷", "🚀", "🔨", "📌", "⬆️", "⬇️", "📦", "🔐", "🧱"],
        ),
        ("Documentation", &["📝", "💡", "📄", "👥"]),
        ("Removals", &["🔥", "➖", "⏪", "🔇", "🗑️", "⚰️"]),
        ("Refactors", &["♻️", "🎨", "🚚", "🏗️", "⚡"]),
    ];

    table
        .iter()
        .map(|(category, emoji)| {
            (
                category.to_string(),
                emoji.iter().map(|e| e.to_string()).collect(),
            )
        })
        .collect()
}

/// Marker symbols used while classifying pull requests.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MarkersConfig {
    /// Leading symbol of release pull requests, which never show up in notes
    #[serde(default = "default_release_emoji")]
    pub release_emoji: String,

    /// Emoji recorded for titles without any leading emoji
    #[serde(default = "default_unknown_emoji")]
    pub unknown_emoji: String,

    /// Category of emoji missing from the category table
    #[serde(default = "default_other_category")]
    pub other_category: String,
}

fn default_release_emoji() -> String {
    "🔖".to_string()
}

fn default_unknown_emoji() -> String {
    "?".to_string()
}

fn default_other_category() -> String {
    "Other Changes".to_string()
}

impl Default for MarkersConfig {
    fn default() -> Self {
        MarkersConfig {
            release_emoji: default_release_emoji(),
            unknown_emoji: default_unknown_emoji(),
            other_category: default_other_category(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            web_url: default_web_url(),
            token_env_var: default_token_env_var(),
            default_branch: default_branch(),
            changelog_file: default_changelog_file(),
            release_label: default_release_label(),
            markers: MarkersConfig::default(),
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Resolves the forge token.
    ///
    /// An explicit token wins; otherwise the variable named by `token_env_var`
    /// is read. Empty values count as missing.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var(&self.token_env_var).ok())
            .filter(|token| !token.trim().is_empty())
    }

    /// Like [`Config::resolve_token`], but a missing token is an error.
    pub fn require_token(&self, explicit: Option<&str>) -> Result<String> {
        self.resolve_token(explicit).ok_or_else(|| {
            ReleaseMakerError::token(format!(
                "Please provide a forge token with --gh-token or in the {} env var",
                self.token_env_var
            ))
        })
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasemaker.toml` in current directory
/// 3. `.releasemaker.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)
        .map_err(|e| ReleaseMakerError::config(format!("Invalid configuration: {}", e)))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories_cover_taxonomy() {
        let config = Config::default();
        for category in ["Additions", "Fixes", "Ops", "Documentation", "Removals"] {
            assert!(
                config.categories.contains_key(category),
                "missing category {}",
                category
            );
        }
        assert!(config.categories["Additions"].contains(&"✨".to_string()));
        assert!(config.categories["Fixes"].contains(&"🐛".to_string()));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(r#"default_branch = "main""#).unwrap();
        assert_eq!(config.default_branch, "main");
        assert_eq!(config.api_url, "https://api.github.com");
        assert_eq!(config.markers.release_emoji, "🔖");
        assert!(!config.categories.is_empty());
    }

    #[test]
    fn test_explicit_token_wins() {
        let config = Config {
            token_env_var: "RELEASE_MAKER_TEST_UNSET_TOKEN".to_string(),
            ..Config::default()
        };
        assert_eq!(config.resolve_token(Some("abc")), Some("abc".to_string()));
        assert_eq!(config.resolve_token(Some("  ")), None);
    }

    #[test]
    fn test_require_token_names_variable() {
        let config = Config {
            token_env_var: "RELEASE_MAKER_TEST_UNSET_TOKEN".to_string(),
            ..Config::default()
        };
        let err = config.require_token(None).unwrap_err();
        assert!(err.to_string().contains("RELEASE_MAKER_TEST_UNSET_TOKEN"));
    }
}
