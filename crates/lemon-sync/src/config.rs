//! # Sync Configuration
//!
//! Configuration for the menu feed, cache location and search behavior.
//!
//! ## Configuration Sources
//! ```text
//! 1. Environment Variables (highest priority)
//!    LEMON_MENU_ENDPOINT, LEMON_DATABASE_PATH, LEMON_DEBOUNCE_MS
//!
//! 2. TOML Config File
//!    ~/.config/lemon/lemon.toml (Linux)
//!    ~/Library/Application Support/com.lemon.app/lemon.toml (macOS)
//!
//! 3. Default Values (lowest priority)
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [menu]
//! endpoint = "https://example.com/menu.json"
//! request_timeout_secs = 10
//!
//! [cache]
//! database_path = "/data/lemon.db"
//!
//! [search]
//! debounce_ms = 500
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};
use url::Url;

use crate::error::{SyncError, SyncResult};
use crate::feed::{DEFAULT_MENU_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::search::DEFAULT_DEBOUNCE_MS;

// =============================================================================
// Menu Feed Settings
// =============================================================================

/// Settings for the remote menu endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuSettings {
    /// HTTP endpoint returning the menu JSON document.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds. Without one, a hung request would leave
    /// the UI on its loading state indefinitely.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_MENU_ENDPOINT.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for MenuSettings {
    fn default() -> Self {
        MenuSettings {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

// =============================================================================
// Cache Settings
// =============================================================================

/// Settings for the local cache database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Path to the SQLite file. `None` means the embedding app decides
    /// (or runs without a cache, falling back to direct remote fetches).
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

// =============================================================================
// Search Settings
// =============================================================================

/// Settings for the debounced search layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Quiet window after the last keystroke before a search is issued.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            debounce_ms: default_debounce_ms(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration for the sync and search layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote menu feed settings.
    #[serde(default)]
    pub menu: MenuSettings,

    /// Local cache settings.
    #[serde(default)]
    pub cache: CacheSettings,

    /// Search debounce settings.
    #[serde(default)]
    pub search: SearchSettings,
}

impl AppConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (lemon.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves the configuration to the given path.
    pub fn save(&self, path: &PathBuf) -> SyncResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| SyncError::ConfigSaveFailed(e.to_string()))?;
        info!(?path, "Saved config");
        Ok(())
    }

    /// Returns the platform default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lemon", "lemon")
            .map(|dirs| dirs.config_dir().join("lemon.toml"))
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(endpoint) = std::env::var("LEMON_MENU_ENDPOINT") {
            debug!("Overriding menu endpoint from environment");
            self.menu.endpoint = endpoint;
        }
        if let Ok(path) = std::env::var("LEMON_DATABASE_PATH") {
            self.cache.database_path = Some(PathBuf::from(path));
        }
        if let Ok(ms) = std::env::var("LEMON_DEBOUNCE_MS") {
            if let Ok(ms) = ms.parse() {
                self.search.debounce_ms = ms;
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        Url::parse(&self.menu.endpoint)?;

        if self.menu.request_timeout_secs == 0 {
            return Err(SyncError::InvalidConfig(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.search.debounce_ms > 10_000 {
            return Err(SyncError::InvalidConfig(format!(
                "debounce_ms of {} is unreasonably long",
                self.search.debounce_ms
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        config.validate().unwrap();

        assert_eq!(config.menu.request_timeout_secs, 10);
        assert_eq!(config.search.debounce_ms, 500);
        assert!(config.cache.database_path.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [menu]
            endpoint = "https://menu.example.com/v2/menu.json"

            [search]
            debounce_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.menu.endpoint, "https://menu.example.com/v2/menu.json");
        assert_eq!(config.menu.request_timeout_secs, 10);
        assert_eq!(config.search.debounce_ms, 250);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut config = AppConfig::default();
        config.menu.endpoint = "not a url".to_string();

        assert!(matches!(
            config.validate().unwrap_err(),
            SyncError::InvalidUrl(_)
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = AppConfig::default();
        config.menu.request_timeout_secs = 0;

        assert!(matches!(
            config.validate().unwrap_err(),
            SyncError::InvalidConfig(_)
        ));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemon.toml");

        let mut config = AppConfig::default();
        config.search.debounce_ms = 300;
        config.cache.database_path = Some(PathBuf::from("/data/lemon.db"));
        config.save(&path).unwrap();

        let loaded = AppConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.search.debounce_ms, 300);
        assert_eq!(
            loaded.cache.database_path.as_deref(),
            Some(std::path::Path::new("/data/lemon.db"))
        );
    }
}
