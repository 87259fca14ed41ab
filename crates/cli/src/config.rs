//! `pdeck.toml` — sheet source, column rules, metadata proxy, store path.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use previewdeck_ingest::ColumnRules;

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "pdeck.toml";

#[derive(Debug)]
pub enum ConfigError {
    /// TOML parse / deserialization error.
    Parse(String),
    /// Semantic validation error (empty candidate list, zero timeout).
    Validation(String),
    /// Config file read error.
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Validation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "config I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Shareable spreadsheet link. May instead come from the CLI flag.
    #[serde(default)]
    pub sheet_url: Option<String>,
    /// Label used when neither the sheet nor the page yields a title.
    #[serde(default = "default_title")]
    pub default_title: String,
    #[serde(default)]
    pub columns: ColumnsConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_url: None,
            default_title: default_title(),
            columns: ColumnsConfig::default(),
            metadata: MetadataConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ColumnsConfig {
    /// URL column candidates, priority-ordered, matched case-insensitively.
    #[serde(default = "default_url_columns")]
    pub url: Vec<String>,
    /// Title column candidates, same matching.
    #[serde(default = "default_title_columns")]
    pub title: Vec<String>,
    /// Category column, matched exactly.
    #[serde(default = "default_category_column")]
    pub category: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            url: default_url_columns(),
            title: default_title_columns(),
            category: default_category_column(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MetadataConfig {
    #[serde(default = "default_proxy_base")]
    pub proxy_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            proxy_base: default_proxy_base(),
            timeout_secs: default_timeout_secs(),
            enabled: default_enabled(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    /// Card-store file. Defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// Defaults match the original deployment's constants.

fn default_title() -> String {
    "Test funnel".into()
}

fn default_url_columns() -> Vec<String> {
    ColumnRules::default().url_columns
}

fn default_title_columns() -> Vec<String> {
    ColumnRules::default().title_columns
}

fn default_category_column() -> String {
    ColumnRules::default().category_column
}

fn default_proxy_base() -> String {
    previewdeck_client::metadata::DEFAULT_PROXY_BASE.into()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_enabled() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl Config {
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, else `pdeck.toml` in cwd, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(CONFIG_FILENAME);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let text = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.url.is_empty() {
            return Err(ConfigError::Validation(
                "columns.url must list at least one candidate header".into(),
            ));
        }
        if self.columns.title.is_empty() {
            return Err(ConfigError::Validation(
                "columns.title must list at least one candidate header".into(),
            ));
        }
        if self.columns.category.trim().is_empty() {
            return Err(ConfigError::Validation("columns.category must not be empty".into()));
        }
        if self.metadata.timeout_secs == 0 {
            return Err(ConfigError::Validation("metadata.timeout_secs must be > 0".into()));
        }
        if self.metadata.proxy_base.trim().is_empty() {
            return Err(ConfigError::Validation("metadata.proxy_base must not be empty".into()));
        }
        Ok(())
    }

    pub fn column_rules(&self) -> ColumnRules {
        ColumnRules {
            url_columns: self.columns.url.clone(),
            title_columns: self.columns.title.clone(),
            category_column: self.columns.category.clone(),
            default_title: self.default_title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.sheet_url, None);
        assert_eq!(config.default_title, "Test funnel");
        assert_eq!(config.columns.url[0], "preview link");
        assert_eq!(config.columns.category, "Page");
        assert_eq!(config.metadata.proxy_base, "https://api.allorigins.win");
        assert_eq!(config.metadata.timeout_secs, 10);
        assert!(config.metadata.enabled);
        assert!(config.store.path.is_none());
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
sheet_url = "https://docs.google.com/spreadsheets/d/abc123/edit"
default_title = "Landing page"

[columns]
url = ["page url"]
title = ["campaign"]
category = "Segment"

[metadata]
proxy_base = "https://relay.internal"
timeout_secs = 3
enabled = false

[store]
path = "/tmp/cards.json"
"#;
        let config = Config::from_toml(input).unwrap();
        assert_eq!(config.sheet_url.as_deref(), Some("https://docs.google.com/spreadsheets/d/abc123/edit"));
        assert_eq!(config.columns.url, vec!["page url"]);
        assert_eq!(config.columns.category, "Segment");
        assert!(!config.metadata.enabled);
        assert_eq!(config.store.path.as_deref(), Some(Path::new("/tmp/cards.json")));

        let rules = config.column_rules();
        assert_eq!(rules.title_columns, vec!["campaign"]);
        assert_eq!(rules.default_title, "Landing page");
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let input = "[metadata]\ntimeout_secs = 30\n";
        let config = Config::from_toml(input).unwrap();
        assert_eq!(config.metadata.timeout_secs, 30);
        assert_eq!(config.metadata.proxy_base, "https://api.allorigins.win");
        assert_eq!(config.columns.url.len(), 5);
    }

    #[test]
    fn reject_empty_url_candidates() {
        let err = Config::from_toml("[columns]\nurl = []\n").unwrap_err();
        assert!(err.to_string().contains("columns.url"));
    }

    #[test]
    fn reject_zero_timeout() {
        let err = Config::from_toml("[metadata]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn reject_malformed_toml() {
        let err = Config::from_toml("sheet_url = [broken").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_missing_explicit_path_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/pdeck.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdeck.toml");
        std::fs::write(&path, "default_title = \"X\"\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.default_title, "X");
    }
}
