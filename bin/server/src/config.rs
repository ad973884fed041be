//! Centralized server configuration.
//!
//! Loaded via the `config` crate from an optional `flowbit` file (any format
//! the crate understands) overlaid with environment variables. The
//! Next.js-era variable names `NEXT_PUBLIC_BASE_URL` and
//! `NEXT_PUBLIC_API_URL` are accepted as aliases.
//!
//! See [`CatalogConfig`] for the folder and workflow table.

use flowbit_catalog::CatalogConfig;
use serde::Deserialize;
use std::time::Duration;

/// Base name of the optional configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "flowbit";

/// Server configuration composed from library configs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Public origin of this console, used for webhook URLs.
    #[serde(default = "default_public_base_url", alias = "next_public_base_url")]
    pub public_base_url: String,

    /// Flows backend that inbound webhooks are relayed to.
    #[serde(default = "default_langflow_base_url")]
    pub langflow_base_url: String,

    /// Flows backend used by the dashboard.
    #[serde(default = "default_api_url", alias = "next_public_api_url")]
    pub api_url: String,

    /// Timeout of every outbound request, in seconds.
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,

    /// Delay between run log stream events, in milliseconds.
    #[serde(default = "default_stream_interval_millis")]
    pub stream_interval_millis: u64,

    /// Folder list and folder-to-source bindings.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_langflow_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_http_timeout_seconds() -> u64 {
    10
}

fn default_stream_interval_millis() -> u64 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            langflow_base_url: default_langflow_base_url(),
            api_url: default_api_url(),
            http_timeout_seconds: default_http_timeout_seconds(),
            stream_interval_millis: default_stream_interval_millis(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from the default file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// Loads configuration from `file` (optional) and environment variables,
    /// the latter taking precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is present but invalid.
    pub fn load(file: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(file, None)
    }

    /// Like [`Self::load`], reading variables from `env` instead of the
    /// process environment when given.
    fn load_with_env(
        file: &str,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    #[must_use]
    pub fn stream_interval(&self) -> Duration {
        Duration::from_millis(self.stream_interval_millis)
    }
}
