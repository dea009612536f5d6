use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme_name")]
    pub theme: String,

    #[serde(default)]
    pub explorer: ExplorerConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub mouse: MouseConfig,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

/// Tree and file list configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Width of the tree panel as a percentage of the screen
    #[serde(default = "default_tree_width_percent")]
    pub tree_width_percent: u16,

    /// Directory selected at startup when none is given on the command line.
    /// The current working directory is used when this is unset.
    #[serde(default)]
    pub start_dir: Option<PathBuf>,

    /// Directories shown at the top level next to the system roots
    #[serde(default)]
    pub extra_roots: Vec<PathBuf>,
}

fn default_tree_width_percent() -> u16 {
    40
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            tree_width_percent: default_tree_width_percent(),
            start_dir: None,
            extra_roots: Vec::new(),
        }
    }
}

/// Download configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Text shown in the empty URL field
    #[serde(default = "default_url_placeholder")]
    pub url_placeholder: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_url_placeholder() -> String {
    "Please paste URL for download".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_user_agent() -> String {
    format!("paraload/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            url_placeholder: default_url_placeholder(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Mouse configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouseConfig {
    /// Two clicks on the same row within this window count as a double click
    #[serde(default = "default_double_click_ms")]
    pub double_click_ms: u64,
}

fn default_double_click_ms() -> u64 {
    400
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            double_click_ms: default_double_click_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            explorer: ExplorerConfig::default(),
            download: DownloadConfig::default(),
            mouse: MouseConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }
        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// `<config_dir>/paraload/config.json`
    #[cfg(feature = "runtime")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("paraload").join("config.json"))
    }

    /// Load and validate the effective configuration.
    ///
    /// An explicit path must exist. The fallback path is optional: when it
    /// does not exist the defaults are used.
    pub fn load(explicit: Option<&Path>, fallback: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config = match (explicit, fallback) {
            (Some(path), _) => {
                tracing::info!("Loading config from {:?}", path);
                Self::load_from_file(path)?
            }
            (None, Some(path)) if path.exists() => {
                tracing::info!("Loading config from {:?}", path);
                Self::load_from_file(&path)?
            }
            _ => {
                tracing::debug!("No config file, using defaults");
                Self::default()
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(10..=90).contains(&self.explorer.tree_width_percent) {
            return Err(ConfigError::ValidationError(format!(
                "tree_width_percent must be between 10 and 90, got {}",
                self.explorer.tree_width_percent
            )));
        }

        if self.download.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.mouse.double_click_ms == 0 {
            return Err(ConfigError::ValidationError(
                "double_click_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Pretty JSON of the effective configuration (`--dump-config`)
    pub fn to_pretty_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }
}

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.explorer.tree_width_percent, 40);
        assert_eq!(config.download.url_placeholder, "Please paste URL for download");
        assert!(config.download.user_agent.starts_with("paraload/"));
        assert_eq!(config.mouse.double_click_ms, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "explorer": { "tree_width_percent": 25 } }"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.explorer.tree_width_percent, 25);
        assert_eq!(config.download.timeout_secs, 300);
        assert!(config.explorer.extra_roots.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.explorer.start_dir = Some(PathBuf::from("/srv/data"));
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load_from_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validation() {
        let mut config = Config::default();
        config.explorer.tree_width_percent = 95;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        let mut config = Config::default();
        config.download.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mouse.double_click_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_fallbacks() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.json");

        // Missing fallback means defaults
        assert_eq!(Config::load(None, Some(missing.clone())).unwrap(), Config::default());
        assert_eq!(Config::load(None, None).unwrap(), Config::default());

        // Missing explicit file is an error
        assert!(matches!(
            Config::load(Some(&missing), None),
            Err(ConfigError::IoError(_))
        ));

        let invalid = temp_dir.path().join("invalid.json");
        std::fs::write(&invalid, r#"{ "mouse": { "double_click_ms": 0 } }"#).unwrap();
        assert!(matches!(
            Config::load(None, Some(invalid)),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
