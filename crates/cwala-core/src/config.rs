//! Configuration management for the Campaignwala client.
//!
//! Loads configuration from ${CWALA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Colour theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Returns the short display name for this theme.
    pub fn display_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Returns the other theme (used by the toggle key).
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Commented config template, embedded from default_config.toml at
/// compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Lays the user's values over the bundled template, so a save picks up
/// template keys and comments the user's file predates.
fn overlay_on_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Bundled config template is not valid TOML")?;
    let user_doc: DocumentMut = user_config
        .parse()
        .context("Failed to parse existing config")?;

    overlay_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

fn overlay_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, item) in source.iter() {
        match item {
            Item::Value(value) => target[key] = Item::Value(value.clone()),
            Item::Table(table) => match target.get_mut(key) {
                Some(Item::Table(existing)) => overlay_items(existing, table),
                _ => target[key] = Item::Table(table.clone()),
            },
            // User arrays win wholesale; element-wise merging has no
            // sensible meaning here.
            Item::ArrayOfTables(arr) => target[key] = Item::ArrayOfTables(arr.clone()),
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for client configuration and data files.
    //!
    //! CWALA_HOME resolution order:
    //! 1. CWALA_HOME environment variable (if set)
    //! 2. ~/.config/cwala (default)

    use std::path::PathBuf;

    /// Returns the cwala home directory.
    ///
    /// Checks CWALA_HOME env var first, falls back to ~/.config/cwala
    pub fn cwala_home() -> PathBuf {
        if let Ok(home) = std::env::var("CWALA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("cwala"))
            .expect("Cannot locate a home directory")
    }

    /// Returns the path to config.toml.
    pub fn config_path() -> PathBuf {
        cwala_home().join("config.toml")
    }

    /// Returns the path to the cached session file.
    pub fn session_path() -> PathBuf {
        cwala_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        cwala_home().join("logs")
    }
}

/// Default value for serde when notification_popup_secs is missing.
fn default_popup_secs() -> u64 {
    Config::DEFAULT_POPUP_SECS
}

/// Client settings, stored as TOML under CWALA_HOME.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API base URL (the CWALA_API_URL env var takes precedence).
    pub api_url: Option<String>,

    /// Colour theme preference.
    pub theme: Theme,

    /// Seconds a notification popup stays on screen before auto-hiding.
    #[serde(default = "default_popup_secs")]
    pub notification_popup_secs: u64,
}

impl Config {
    const DEFAULT_POPUP_SECS: u64 = 6;

    /// Loads settings from the standard location.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads settings from `path`. A missing file is not an error; the
    /// defaults apply.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Returns the configured API base URL if set and non-empty.
    pub fn effective_api_url(&self) -> Option<&str> {
        self.api_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// How long a notification popup stays visible.
    pub fn popup_duration(&self) -> Duration {
        Duration::from_secs(self.notification_popup_secs)
    }

    /// Saves only the theme field to the config file.
    ///
    /// The file is created on first save; on later saves the user's
    /// other keys and comments survive untouched.
    pub fn save_theme(theme: Theme) -> Result<()> {
        Self::save_theme_to(&paths::config_path(), theme)
    }

    /// Saves only the theme field to a specific config file path.
    ///
    /// A missing file gets the commented template; an existing one is laid
    /// over the template first, so other keys and comments survive.
    pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            overlay_on_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        doc["theme"] = value(theme.display_name());

        Self::write_atomic(path, &doc.to_string())
    }

    /// Writes the commented template to `path`.
    /// Refuses to overwrite a file that already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }

        Self::write_atomic(path, default_config_template())
    }

    /// Temp file + rename, so a crash mid-write never truncates the config.
    fn write_atomic(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, content)
            .with_context(|| format!("Failed to write config to {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to rename {} to {}", tmp.display(), path.display()))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            theme: Theme::default(),
            notification_popup_secs: Self::DEFAULT_POPUP_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// A missing file loads as the defaults.
    #[test]
    fn test_missing_file_loads_as_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.api_url, None);
        assert_eq!(config.notification_popup_secs, 6);
    }

    /// Keys absent from the file keep their default values.
    #[test]
    fn test_partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "theme = \"light\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.notification_popup_secs, 6);
    }

    /// Init writes the template, creating parent directories on the way.
    #[test]
    fn test_init_writes_commented_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Campaignwala Configuration"));
        assert!(contents.contains("# api_url ="));
    }

    /// Init never overwrites an existing file.
    #[test]
    fn test_init_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "theme = \"light\"\n").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    /// API URL: loaded from config file.
    #[test]
    fn test_api_url_loaded_from_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            "api_url = \"https://staging.campaignwala.com\"\n",
        )
        .unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(
            config.effective_api_url(),
            Some("https://staging.campaignwala.com")
        );
    }

    /// API URL: empty/whitespace treated as unset.
    #[test]
    fn test_api_url_empty_is_none() {
        let config = Config {
            api_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_api_url(), None);
    }

    /// save_theme: creates new config file with template if it doesn't exist.
    #[test]
    fn test_save_theme_creates_file_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        Config::save_theme_to(&config_path, Theme::Light).unwrap();

        assert!(config_path.exists());

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, Theme::Light);

        // The commented template came along
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Campaignwala Configuration"));
        assert!(contents.contains("theme = \"light\""));
    }

    /// save_theme: preserves other fields in existing config.
    #[test]
    fn test_save_theme_preserves_other_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(
            &config_path,
            r#"api_url = "https://staging.campaignwala.com"
notification_popup_secs = 10
theme = "dark"
"#,
        )
        .unwrap();

        Config::save_theme_to(&config_path, Theme::Light).unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://staging.campaignwala.com")
        ); // preserved
        assert_eq!(config.notification_popup_secs, 10); // preserved
    }

    /// save_theme: uses template structure but preserves user values.
    #[test]
    fn test_save_theme_merges_with_template() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        // Old format, no template comments
        fs::write(&config_path, "notification_popup_secs = 3\n").unwrap();

        Config::save_theme_to(&config_path, Theme::Light).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Campaignwala Configuration"));

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.notification_popup_secs, 3);
        assert_eq!(config.theme, Theme::Light);
    }

    /// save_theme: creates parent directories if needed.
    #[test]
    fn test_save_theme_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("dir").join("config.toml");

        Config::save_theme_to(&config_path, Theme::Dark).unwrap();

        assert!(config_path.exists());
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.theme, Theme::Dark);
    }

    /// save_theme: roundtrip through both values.
    #[test]
    fn test_save_theme_roundtrip() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        Config::save_theme_to(&config_path, Theme::Light).unwrap();
        assert_eq!(Config::load_from(&config_path).unwrap().theme, Theme::Light);

        Config::save_theme_to(&config_path, Theme::Dark).unwrap();
        assert_eq!(Config::load_from(&config_path).unwrap().theme, Theme::Dark);
    }

    /// Theme toggling flips between the two values.
    #[test]
    fn test_theme_toggled() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    /// Popup duration comes from the configured seconds.
    #[test]
    fn test_popup_duration() {
        let config = Config {
            notification_popup_secs: 3,
            ..Default::default()
        };
        assert_eq!(config.popup_duration(), Duration::from_secs(3));
    }
}
