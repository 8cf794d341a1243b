//! Configuration types for the expense service.
//!
//! These structures are deserialized from the YAML configuration file and
//! may be overridden from the environment.

use std::fmt;

use serde::Deserialize;

/// Default address the server binds to.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default port the server listens on.
pub const DEFAULT_PORT: u16 = 8000;

/// Default lifetime of an access token, in minutes.
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Complete service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Token signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Tracing filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host or IP address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Returns the `host:port` address to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Token signing settings.
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret key used to sign access tokens.
    #[serde(default)]
    pub token_secret: String,
    /// How long an issued token stays valid, in minutes.
    #[serde(default = "default_token_ttl_minutes")]
    pub token_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            token_ttl_minutes: default_token_ttl_minutes(),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_token_ttl_minutes() -> i64 {
    DEFAULT_TOKEN_TTL_MINUTES
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}
