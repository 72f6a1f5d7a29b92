//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Reconciliation engine configuration.
    #[serde(default)]
    pub reconciliation: ReconciliationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Reconciliation engine configuration.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReconciliationConfig {
    /// Run the goods-receipt and AP-invoice fetches concurrently.
    #[serde(default = "default_concurrent_branches")]
    pub concurrent_branches: bool,
    /// Upper bound for the `per_page` request parameter.
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
}

fn default_concurrent_branches() -> bool {
    true
}

fn default_max_per_page() -> u32 {
    100
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            concurrent_branches: default_concurrent_branches(),
            max_per_page: default_max_per_page(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PROCURA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
