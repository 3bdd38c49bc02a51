//! Configuration management for lectern
//!
//! Handles loading, saving, and validating configuration from TOML files.

mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the ingestion/search API service
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable name for the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Search configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Fixture corpus configuration
    #[serde(default)]
    pub fixtures: FixturesConfig,

    /// Paths configuration (internal, not user-editable)
    #[serde(skip)]
    pub paths: PathsConfig,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default number of results
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,

    /// Maximum results allowed
    #[serde(default = "default_search_max_results")]
    pub max_results: usize,
}

/// Fixture corpus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturesConfig {
    /// Output directory for generated fixture files
    /// (relative paths resolve against the base dir)
    #[serde(default = "default_fixtures_dir")]
    pub output_dir: PathBuf,
}

/// Internal paths configuration
#[derive(Debug, Clone, Default)]
pub struct PathsConfig {
    /// Base directory for lectern data
    pub base_dir: PathBuf,

    /// Path to config file
    pub config_file: PathBuf,

    /// Path to SQLite database
    pub db_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key_env: default_api_key_env(),
            search: SearchConfig::default(),
            fixtures: FixturesConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_search_limit(),
            max_results: default_search_max_results(),
        }
    }
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            output_dir: default_fixtures_dir(),
        }
    }
}

impl Config {
    /// Get the default base directory for lectern (~/.lectern)
    pub fn default_base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lectern")
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        Self::default_base_dir().join("config.toml")
    }

    /// Initialize paths configuration
    fn init_paths(&mut self, base_dir: Option<PathBuf>) {
        let base = base_dir.unwrap_or_else(Self::default_base_dir);
        self.paths = PathsConfig {
            config_file: base.join("config.toml"),
            db_file: base.join("collections.db"),
            base_dir: base,
        };
    }

    /// Load configuration from a specific file path
    pub fn load(config_path: &Path) -> Result<Self> {
        debug!("Loading config from {:?}", config_path);

        if !config_path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                config_path.display()
            )));
        }

        let content = std::fs::read_to_string(config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Set up paths based on config file location
        let base = config_path.parent().unwrap_or(Path::new(".")).to_path_buf();
        config.paths = PathsConfig {
            config_file: config_path.to_path_buf(),
            db_file: base.join("collections.db"),
            base_dir: base,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific base directory
    pub fn load_from(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.init_paths(base_dir);

        if config.paths.config_file.exists() {
            debug!("Loading config from {:?}", config.paths.config_file);
            let content = std::fs::read_to_string(&config.paths.config_file)?;
            let mut loaded: Config = toml::from_str(&content)?;
            loaded.paths = config.paths;
            config = loaded;
        } else {
            debug!("No config file found, using defaults");
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = self.paths.config_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&self.paths.config_file, content)?;
        info!("Saved config to {:?}", self.paths.config_file);
        Ok(())
    }

    /// Get the API key from environment
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env).ok()
    }

    /// Resolve the fixture output directory against the base dir
    pub fn fixtures_dir(&self) -> PathBuf {
        if self.fixtures.output_dir.is_absolute() {
            self.fixtures.output_dir.clone()
        } else {
            self.paths.base_dir.join(&self.fixtures.output_dir)
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_url)
            .map_err(|e| Error::Config(format!("api_url is not a valid URL: {}", e)))?;

        if self.search.default_limit == 0 {
            return Err(Error::Config(
                "search.default_limit must be positive".to_string(),
            ));
        }

        if self.search.default_limit > self.search.max_results {
            return Err(Error::Config(
                "search.default_limit must be <= search.max_results".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://127.0.0.1:8877");
        assert_eq!(config.search.default_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.init_paths(Some(tmp.path().to_path_buf()));
        config.api_url = "http://localhost:9000".to_string();

        config.save().unwrap();
        assert!(config.paths.config_file.exists());

        let loaded = Config::load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(loaded.api_url, "http://localhost:9000");
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        // Invalid: default limit above max
        config.search.default_limit = config.search.max_results + 1;
        assert!(config.validate().is_err());

        // Fix it
        config.search.default_limit = 10;
        assert!(config.validate().is_ok());

        // Invalid: unparseable API URL
        config.api_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fixtures_dir_resolution() {
        let mut config = Config::default();
        config.init_paths(Some(PathBuf::from("/data/lectern")));

        assert_eq!(
            config.fixtures_dir(),
            PathBuf::from("/data/lectern/fixtures")
        );

        config.fixtures.output_dir = PathBuf::from("/tmp/corpus");
        assert_eq!(config.fixtures_dir(), PathBuf::from("/tmp/corpus"));
    }
}
