//! Configuration management for Headline.
//!
//! Configuration is read from `~/.config/headline/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::news::LatencyPolicy;

pub const DEFAULT_ENDPOINT: &str = "https://gnews.io/api/v4/top-headlines";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub latency: LatencyPolicy,
    pub storage: StorageConfig,
}

/// News API access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Top-headlines endpoint
    pub endpoint: String,

    /// API key sent as the `apikey` parameter
    pub api_key: String,

    /// Country every request is restricted to (default: "br")
    pub country: String,

    /// Client-side request timeout in seconds (default: 15)
    pub timeout_secs: u64,

    /// Probe the API host before each request (default: true)
    pub check_connectivity: bool,

    /// Reachability probe timeout in milliseconds (default: 3000)
    pub probe_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            country: "br".to_string(),
            timeout_secs: 15,
            check_connectivity: true,
            probe_timeout_ms: 3000,
        }
    }
}

impl ApiConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Fallback cache of the home feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entries older than this are treated as missing (default: 6)
    pub ttl_hours: u64,

    /// Sequences are truncated to this many elements before being stored (default: 25)
    pub max_items: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 6,
            max_items: 25,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours * 3600)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path (default: `<data dir>/headline/headline.db`)
    pub db_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating a commented default there
    /// when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/headline/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("headline").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# Headline Configuration

[api]
# Top-headlines endpoint of the news API
endpoint = "https://gnews.io/api/v4/top-headlines"

# Your API key
api_key = ""

# Country every request is restricted to
country = "br"

# Give up on a request after this many seconds
timeout_secs = 15

# Check that the API host is reachable before each request
check_connectivity = true
probe_timeout_ms = 3000

[cache]
# Cached home feed expires after this many hours
ttl_hours = 6

# At most this many articles are cached
max_items = 25

[latency]
# Minimum perceived latency before a fetch, in milliseconds.
# Initial loads wait a random time in [initial_min_ms, initial_max_ms],
# refreshes wait refresh_ms. Set all to 0 to disable.
initial_min_ms = 2000
initial_max_ms = 4000
refresh_ms = 500

[storage]
# db_path = "/path/to/headline.db"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.api.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.cache.max_items, 25);
        assert_eq!(config.latency, LatencyPolicy::default());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[api]
api_key = "abc"

[latency]
refresh_ms = 0
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.api.api_key, "abc");
        assert_eq!(config.api.country, "br");
        assert_eq!(config.latency.refresh_ms, 0);
        assert_eq!(config.latency.initial_min_ms, 2000);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.cache.ttl(), Duration::from_secs(6 * 3600));
        assert!(config.storage.db_path.is_none());
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api.country, "br");

        // The written file loads back to the same values
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.cache.max_items, config.cache.max_items);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[api\nbroken").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
