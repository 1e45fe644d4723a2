//! Optional RON configuration for the terminal client.
//!
//! Every field has a default, so a config file only needs the values it overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use catalog_core::QueryOptions;
use catalog_engine::{EngineSettings, FetchSettings};
use catalog_logging::{catalog_info, catalog_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILENAME: &str = "catalog.ron";

/// Upstream rejects larger pages.
const MAX_LIMIT: u32 = 200;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub debounce_ms: u64,
    pub language: String,
    pub limit: u32,
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_image_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = EngineSettings::default();
        Self {
            debounce_ms: settings.debounce.as_millis() as u64,
            language: settings.query.language,
            limit: settings.query.limit,
            base_url: settings.fetch.base_url,
            connect_timeout_secs: settings.fetch.connect_timeout.as_secs(),
            request_timeout_secs: settings.fetch.request_timeout.as_secs(),
            max_image_bytes: settings.fetch.max_image_bytes,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        catalog_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Loads `explicit` if given; otherwise `./catalog.ron` when it exists, else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILENAME);
        match Self::load(&fallback) {
            Ok(config) => Ok(config),
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(Self::default())
            }
            Err(err) => {
                catalog_warn!("Ignoring {:?}: {}", fallback, err);
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "limit must be between 1 and {MAX_LIMIT}, got {}",
                self.limit
            )));
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::Invalid("language must not be empty".into()));
        }
        Ok(())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        let defaults = FetchSettings::default();
        EngineSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            query: QueryOptions {
                language: self.language.clone(),
                limit: self.limit,
            },
            fetch: FetchSettings {
                base_url: self.base_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_image_bytes: self.max_image_bytes,
                ..defaults
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError};

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(&path, "(language: \"de_de\", limit: 50)").unwrap();

        let config = AppConfig::load(&path).unwrap();

        assert_eq!(config.language, "de_de");
        assert_eq!(config.limit, 50);
        assert_eq!(config.debounce_ms, AppConfig::default().debounce_ms);
    }

    #[test]
    fn settings_carry_config_values() {
        let config = AppConfig {
            debounce_ms: 120,
            request_timeout_secs: 3,
            ..AppConfig::default()
        };

        let settings = config.engine_settings();

        assert_eq!(settings.debounce, Duration::from_millis(120));
        assert_eq!(settings.fetch.request_timeout, Duration::from_secs(3));
        assert_eq!(settings.query.language, "en_us");
        assert_eq!(settings.query.limit, 20);
    }

    #[test]
    fn defaults_match_engine_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.base_url, "https://itunes.apple.com/search");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = AppConfig::load_or_default(Some(&temp.path().join("nope.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(&path, "(limit: \"many\")").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn out_of_range_limit_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("catalog.ron");
        fs::write(&path, "(limit: 500)").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
