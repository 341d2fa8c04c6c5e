//! Configuration loading and management.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Origin serving `/api/live-events` and `/api/events/today`.
    pub api_base_url: String,

    /// `limit` query parameter sent to the feed.
    pub fetch_limit: u32,

    /// Quiet period before a typed search query is applied.
    pub search_debounce_ms: u64,

    /// Fixture file used when no source flag is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixture_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            fetch_limit: 12,
            search_debounce_ms: 180,
            fixture_path: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (LE_*)
        figment = figment.merge(Env::prefixed("LE_"));

        figment.extract()
    }

    pub const fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Returns the platform-specific config directory.
///
/// On Linux: `~/.config/live-events`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("live-events"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_feed_settings() {
        let config = Config::default();
        assert_eq!(config.fetch_limit, 12);
        assert_eq!(config.search_delay(), Duration::from_millis(180));
        assert!(config.fixture_path.is_none());
    }

    #[test]
    fn test_dirs_config_path_ends_with_app_name() {
        let path = dirs_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "live-events");
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "api_base_url = \"https://fixtures.example\"\nsearch_debounce_ms = 250\nfixture_path = \"/tmp/events.json\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.api_base_url, "https://fixtures.example");
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.fetch_limit, 12);
        assert_eq!(config.fixture_path, Some(PathBuf::from("/tmp/events.json")));
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(&temp.path().join("absent.toml"))).unwrap();
        assert_eq!(config.fetch_limit, Config::default().fetch_limit);
    }

    #[test]
    fn test_invalid_value_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "fetch_limit = \"lots\"\n").unwrap();
        assert!(Config::load_from(Some(&path)).is_err());
    }
}
