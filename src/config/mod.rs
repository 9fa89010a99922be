//! Settings management
//!
//! Loads and saves settings from XDG-compliant paths.
//! Settings location: ~/.config/placeseek/config.toml
//!
//! This is the persistence collaborator for the provider registry: the
//! `goto_provider` key holds the label of the preferred provider.

use crate::constants::api::GEOPLUGIN_URL;
use crate::constants::search::{DEFAULT_CANDIDATE_LIMIT, DEFAULT_LOOKUP_WORKERS};
use crate::constants::settings::GOTO_PROVIDER_KEY;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "placeseek";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Main settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Provider selection settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Where-am-i settings
    #[serde(default)]
    pub locate: LocateConfig,

    /// Background job settings
    #[serde(default)]
    pub jobs: JobsConfig,

    /// Path this settings instance was loaded from; None means the
    /// default XDG path. Not serialized.
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Provider selection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Label of the preferred goto provider; empty means "first registered"
    #[serde(default)]
    pub current: String,

    /// How many candidates to request per search
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: usize,
}

/// Where-am-i settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocateConfig {
    /// Endpoint of the IP geolocation service
    #[serde(default = "default_service_url")]
    pub service_url: String,
}

/// Background job settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsConfig {
    /// Number of worker threads dedicated to remote-lookup jobs
    #[serde(default = "default_workers")]
    pub workers: usize,
}

// Default value functions for serde
fn default_candidate_limit() -> usize {
    DEFAULT_CANDIDATE_LIMIT
}
fn default_service_url() -> String {
    GEOPLUGIN_URL.to_string()
}
fn default_workers() -> usize {
    DEFAULT_LOOKUP_WORKERS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            locate: LocateConfig::default(),
            jobs: JobsConfig::default(),
            path: None,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            current: String::new(),
            candidate_limit: default_candidate_limit(),
        }
    }
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
        }
    }
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

impl Settings {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load settings from the default path
    ///
    /// Creates default settings if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(path)
        } else {
            let settings = Settings::default();
            settings.save()?;
            Ok(settings)
        }
    }

    /// Load settings from a specific path (missing file yields defaults)
    ///
    /// Subsequent saves go back to the same path.
    pub fn load_from(path: PathBuf) -> Result<Self> {
        let mut settings = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?
        } else {
            Settings::default()
        };
        settings.path = Some(path);
        Ok(settings)
    }

    /// Save settings back to the path they were loaded from
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::config_path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a settings value by key
    ///
    /// Key format: "section.key", or one of the legacy flat keys such as
    /// "goto_provider". Returns the value as a string, or None if the key is
    /// unknown or the value is unset.
    pub fn get_string(&self, key: &str) -> Option<String> {
        if key == GOTO_PROVIDER_KEY {
            return if self.provider.current.is_empty() {
                None
            } else {
                Some(self.provider.current.clone())
            };
        }

        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["provider", "current"] => Some(self.provider.current.clone()),
            ["provider", "candidate_limit"] => Some(self.provider.candidate_limit.to_string()),
            ["locate", "service_url"] => Some(self.locate.service_url.clone()),
            ["jobs", "workers"] => Some(self.jobs.workers.to_string()),
            _ => None,
        }
    }

    /// Set a settings value by key
    ///
    /// Returns an error if the key is invalid or the value has the wrong type
    pub fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        if key == GOTO_PROVIDER_KEY {
            self.provider.current = value.to_string();
            return Ok(());
        }

        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["provider", "current"] => {
                self.provider.current = value.to_string();
            }
            ["provider", "candidate_limit"] => {
                self.provider.candidate_limit = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid candidate limit: {}", value)))?;
            }
            ["locate", "service_url"] => {
                self.locate.service_url = value.to_string();
            }
            ["jobs", "workers"] => {
                self.jobs.workers = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid worker count: {}", value)))?;
            }
            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "provider.current",
            "provider.candidate_limit",
            "locate.service_url",
            "jobs.workers",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.provider.current, "");
        assert_eq!(settings.provider.candidate_limit, 10);
        assert_eq!(settings.locate.service_url, GEOPLUGIN_URL);
        assert_eq!(settings.jobs.workers, 2);
    }

    #[test]
    fn test_get_set() {
        let mut settings = Settings::default();

        settings.set_string("provider.current", "photon").unwrap();
        assert_eq!(
            settings.get_string("provider.current"),
            Some("photon".to_string())
        );

        settings.set_string("jobs.workers", "4").unwrap();
        assert_eq!(settings.jobs.workers, 4);
    }

    #[test]
    fn test_goto_provider_key_alias() {
        let mut settings = Settings::default();

        // Unset preference reads as None
        assert_eq!(settings.get_string(GOTO_PROVIDER_KEY), None);

        settings.set_string(GOTO_PROVIDER_KEY, "nominatim").unwrap();
        assert_eq!(
            settings.get_string(GOTO_PROVIDER_KEY),
            Some("nominatim".to_string())
        );
        assert_eq!(settings.provider.current, "nominatim");
    }

    #[test]
    fn test_set_invalid_key() {
        let mut settings = Settings::default();
        assert!(settings.set_string("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut settings = Settings::default();
        assert!(settings.set_string("jobs.workers", "lots").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut settings = Settings::load_from(path.clone()).unwrap();
        settings.set_string(GOTO_PROVIDER_KEY, "photon").unwrap();
        settings.jobs.workers = 3;
        settings.save().unwrap();

        let loaded = Settings::load_from(path).unwrap();
        assert_eq!(loaded.provider.current, "photon");
        assert_eq!(loaded.jobs.workers, 3);
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let loaded: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.provider.candidate_limit, 10);
        assert_eq!(loaded.locate.service_url, GEOPLUGIN_URL);
    }

    #[test]
    fn test_serialization_format() {
        let settings = Settings::default();
        let toml = toml::to_string_pretty(&settings).unwrap();

        assert!(toml.contains("[provider]"));
        assert!(toml.contains("[locate]"));
        assert!(toml.contains("[jobs]"));
    }

    #[test]
    fn test_available_keys() {
        let keys = Settings::available_keys();
        assert!(keys.contains(&"provider.current"));
        assert!(keys.contains(&"jobs.workers"));
    }
}
