//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ids: IdConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoggingConfig {
    pub level: String,
    pub with_target: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct IdConfig {
    pub first_id: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_target: false,
        }
    }
}

impl Default for IdConfig {
    fn default() -> Self {
        Self { first_id: 1 }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            ids: IdConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ids.first_id == 0 {
            return Err(ConfigError::InvalidValue("ids.first-id must be at least 1".to_string()));
        }
        // u64::MAX is never allocated, so starting there would yield no ids.
        if self.ids.first_id == u64::MAX {
            return Err(ConfigError::InvalidValue(format!(
                "ids.first-id must be below {}",
                u64::MAX
            )));
        }
        // Same parser `logging::init` hands the level to.
        tracing_subscriber::EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::InvalidValue(format!("invalid log filter '{}': {}", self.logging.level, e))
        })?;
        Ok(())
    }

    /// Defaults overridden by `MESSAGEAPI_LOG_LEVEL` and `MESSAGEAPI_FIRST_ID`
    pub fn load_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(level) = std::env::var("MESSAGEAPI_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(first) = std::env::var("MESSAGEAPI_FIRST_ID") {
            config.ids.first_id = first.parse().map_err(|_| {
                ConfigError::InvalidValue(format!("MESSAGEAPI_FIRST_ID is not a number: {}", first))
            })?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("first-id: 1"));
        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml("ids:\n  first-id: 10\n").unwrap();
        assert_eq!(config.ids.first_id, 10);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_yaml("ids:\n  first-id: 0\n"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            Config::from_yaml("logging:\n  level: messageapi=loud\n"),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(Config::from_yaml("ids: [1, 2"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_first_id_at_top_of_range_is_rejected() {
        let err = Config::from_yaml("ids:\n  first-id: 18446744073709551615\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let config = Config::from_yaml("ids:\n  first-id: 18446744073709551614\n").unwrap();
        assert_eq!(config.ids.first_id, u64::MAX - 1);
    }

    #[test]
    fn test_accepts_any_filter_the_subscriber_accepts() {
        for level in ["off", "debug", "messageapi=debug", "warn,messageapi=trace"] {
            let yaml = format!("logging:\n  level: \"{}\"\n", level);
            let config = Config::from_yaml(&yaml).unwrap();
            assert_eq!(config.logging.level, level);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("messageapi-does-not-exist.yaml");
        assert!(matches!(Config::load(path), Err(ConfigError::Io(_))));
    }
}
