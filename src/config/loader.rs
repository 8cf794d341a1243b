//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file, the environment, or both.

use std::fs;
use std::path::Path;

use crate::error::{ServiceError, ServiceResult};

use super::types::AppConfig;

/// Environment variable naming an optional YAML configuration file.
pub const ENV_CONFIG_PATH: &str = "EXPENSE_ENGINE_CONFIG";
/// Environment variable overriding the bind host.
pub const ENV_HOST: &str = "EXPENSE_ENGINE_HOST";
/// Environment variable overriding the listen port.
pub const ENV_PORT: &str = "EXPENSE_ENGINE_PORT";
/// Environment variable holding the token signing secret.
pub const ENV_TOKEN_SECRET: &str = "EXPENSE_ENGINE_TOKEN_SECRET";
/// Environment variable overriding the token lifetime in minutes.
pub const ENV_TOKEN_TTL_MINUTES: &str = "EXPENSE_ENGINE_TOKEN_TTL_MINUTES";
/// Environment variable overriding the tracing filter.
pub const ENV_LOG_FILTER: &str = "EXPENSE_ENGINE_LOG";

/// Loads and validates the service configuration.
///
/// Values come from an optional YAML file; environment variables take
/// precedence over the file. The token secret has no default and must be
/// provided by one of the two.
///
/// # File Format
///
/// ```yaml
/// server:
///   host: 0.0.0.0
///   port: 8000
/// auth:
///   token_secret: change-me
///   token_ttl_minutes: 60
/// log_filter: info
/// ```
///
/// # Example
///
/// ```
/// use expense_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::from_lookup(|key| match key {
///     "EXPENSE_ENGINE_TOKEN_SECRET" => Some("change-me".to_string()),
///     "EXPENSE_ENGINE_PORT" => Some("9000".to_string()),
///     _ => None,
/// })?;
/// assert_eq!(loader.config().server.port, 9000);
/// # Ok::<(), expense_engine::error::ServiceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file, applying environment overrides.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is invalid or the secret is absent (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> ServiceResult<Self> {
        Self::load_with_lookup(path, |key| std::env::var(key).ok())
    }

    /// Loads configuration from the environment only.
    pub fn from_env() -> ServiceResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from the file named by `EXPENSE_ENGINE_CONFIG`
    /// if it is set, otherwise from the environment only.
    pub fn discover() -> ServiceResult<Self> {
        match std::env::var(ENV_CONFIG_PATH) {
            Ok(path) => Self::load(path),
            Err(_) => Self::from_env(),
        }
    }

    /// Builds configuration from defaults and a variable lookup function.
    pub fn from_lookup<F>(lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::finish(AppConfig::default(), lookup)
    }

    /// Loads a YAML file and applies overrides from a variable lookup function.
    pub fn load_with_lookup<P, F>(path: P, lookup: F) -> ServiceResult<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::load_yaml(path.as_ref())?;
        Self::finish(config, lookup)
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads and parses the YAML file.
    fn load_yaml(path: &Path) -> ServiceResult<AppConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| ServiceError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ServiceError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn finish<F>(mut config: AppConfig, lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::apply_overrides(&mut config, &lookup)?;
        Self::validate(&config)?;
        Ok(Self { config })
    }

    fn apply_overrides<F>(config: &mut AppConfig, lookup: &F) -> ServiceResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            config.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.server.port = parse_value(ENV_PORT, &port)?;
        }
        if let Some(secret) = lookup(ENV_TOKEN_SECRET) {
            config.auth.token_secret = secret;
        }
        if let Some(ttl) = lookup(ENV_TOKEN_TTL_MINUTES) {
            config.auth.token_ttl_minutes = parse_value(ENV_TOKEN_TTL_MINUTES, &ttl)?;
        }
        if let Some(filter) = lookup(ENV_LOG_FILTER) {
            config.log_filter = filter;
        }
        Ok(())
    }

    fn validate(config: &AppConfig) -> ServiceResult<()> {
        if config.auth.token_secret.trim().is_empty() {
            return Err(ServiceError::InvalidConfig {
                key: "auth.token_secret".to_string(),
                message: format!("must be set in the config file or {}", ENV_TOKEN_SECRET),
            });
        }
        if config.auth.token_ttl_minutes <= 0 {
            return Err(ServiceError::InvalidConfig {
                key: "auth.token_ttl_minutes".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> ServiceResult<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ServiceError::InvalidConfig {
            key: key.to_string(),
            message: format!("'{}': {}", value, e),
        })
}
