//! Persistent client configuration model and file-backed manager.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use klukka_api::ClientConfig;

use crate::window::Preset;

/// Backend origin baked in at build time, see `build.rs`.
pub const BUILD_BASE_URL: &str = match option_env!("KLUKKA_BASE_URL") {
    Some(url) => url,
    None => klukka_api::config::DEFAULT_BASE_URL,
};

pub const BASE_URL_ENV: &str = "KLUKKA_BASE_URL";

fn default_base_url() -> String {
    BUILD_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    klukka_api::config::DEFAULT_TIMEOUT_SECS
}

/// Represents the client configuration persisted on disk.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub default_preset: Preset,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_preset: Preset::Today,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Applies runtime overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_base_url_override(env::var(BASE_URL_ENV).ok())
    }

    fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|url| !url.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

/// Loads and saves [`Config`] as JSON in the platform-specific config directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager bound to the platform config path, if the platform has one.
    pub fn new() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("de", "OneManProjects", "klukka")?;
        Some(Self::with_path(dirs.config_dir().join("config.json")))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads config from disk, falling back to defaults on read/parse errors.
    pub fn load(&self) -> Config {
        if self.path.exists() {
            let content = fs::read_to_string(&self.path).unwrap_or_default();
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            Config::default()
        }
    }

    /// Persists config to disk, creating parent directories when needed.
    pub fn save(&self, config: &Config) -> Result<(), std::io::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigManager, BUILD_BASE_URL};
    use crate::window::Preset;
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn unique_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        env::temp_dir().join(format!("klukka-tests-{name}-{nanos}/config.json"))
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.base_url, BUILD_BASE_URL);
        assert_eq!(config.default_preset, Preset::Today);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn load_missing_file_returns_default() {
        let manager = ConfigManager::with_path(unique_path("missing"));
        assert_eq!(manager.load(), Config::default());
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = unique_path("roundtrip");
        let parent = path.parent().map(ToOwned::to_owned);

        let manager = ConfigManager::with_path(path.clone());
        let config = Config {
            base_url: "https://klukka.example.org/api/".to_string(),
            default_preset: Preset::Week,
            timeout_secs: 5,
        };

        manager.save(&config).expect("save should succeed");
        assert_eq!(manager.load(), config);

        if let Some(parent) = parent {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn partial_file_fills_missing_fields() {
        let path = unique_path("partial");
        let parent = path.parent().expect("parent must exist");
        fs::create_dir_all(parent).expect("create temp directory");
        fs::write(&path, r#"{"default_preset":"month"}"#).expect("write partial config");

        let loaded = ConfigManager::with_path(path.clone()).load();
        assert_eq!(loaded.default_preset, Preset::Month);
        assert_eq!(loaded.base_url, BUILD_BASE_URL);
        assert_eq!(loaded.timeout_secs, 30);

        let _ = fs::remove_dir_all(parent);
    }

    #[test]
    fn load_invalid_json_falls_back_to_default() {
        let path = unique_path("invalid");
        let parent = path.parent().expect("parent must exist");
        fs::create_dir_all(parent).expect("create temp directory");
        fs::write(&path, "not-valid-json").expect("write invalid config");

        let loaded = ConfigManager::with_path(path.clone()).load();
        assert_eq!(loaded, Config::default());

        let _ = fs::remove_dir_all(parent);
    }

    #[test]
    fn base_url_override_ignores_blank_values() {
        let config = Config::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(config.base_url, BUILD_BASE_URL);

        let config = config.with_base_url_override(Some("http://10.0.0.2/api".to_string()));
        assert_eq!(config.base_url, "http://10.0.0.2/api");
        assert_eq!(config.client_config().timeout, Duration::from_secs(30));
    }
}
