//! Configuration loading for the expense service.
//!
//! Settings such as the token signing secret are injected at process start
//! from a YAML file and/or `EXPENSE_ENGINE_*` environment variables.
//!
//! # Example
//!
//! ```no_run
//! use expense_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::from_env().unwrap().into_config();
//! println!("Listening on {}", config.server.bind_address());
//! ```

mod loader;
mod types;

pub use loader::{
    ConfigLoader, ENV_CONFIG_PATH, ENV_HOST, ENV_LOG_FILTER, ENV_PORT, ENV_TOKEN_SECRET,
    ENV_TOKEN_TTL_MINUTES,
};
pub use types::{
    AppConfig, AuthConfig, DEFAULT_HOST, DEFAULT_LOG_FILTER, DEFAULT_PORT,
    DEFAULT_TOKEN_TTL_MINUTES, ServerConfig,
};
