use super::client::ClientConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub resolvers: Option<Vec<String>>,
    pub max_retries: Option<usize>,
    pub query_timeout: Option<u64>,
    pub log_level: Option<String>,
}

impl Config {
    /// Loads `config_path` if given, otherwise starts from defaults, then
    /// applies the overrides.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: display.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(resolvers) = overrides.resolvers {
            if !resolvers.is_empty() {
                self.client.resolvers = resolvers;
            }
        }
        if let Some(max_retries) = overrides.max_retries {
            self.client.max_retries = max_retries;
        }
        if let Some(query_timeout) = overrides.query_timeout {
            self.client.query_timeout = query_timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.resolvers.is_empty() {
            return Err(ConfigError::Validation(
                "at least one resolver must be configured".into(),
            ));
        }
        self.client
            .resolver_addresses()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.client.max_retries == 0 {
            return Err(ConfigError::Validation(
                "client.max_retries must be at least 1".into(),
            ));
        }
        if self.client.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "client.query_timeout must be greater than 0".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}
