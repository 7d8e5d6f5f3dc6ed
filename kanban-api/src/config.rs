//! Configuration management for the API server
//!
//! Configuration is read from environment variables (a `.env` file is
//! honored) on top of built-in defaults.
//!
//! # Environment Variables
//!
//! - `KANBAN_API__HOST`: Host to bind to (default: 0.0.0.0)
//! - `KANBAN_API__PORT`: Port to bind to (default: 8080)
//! - `KANBAN_API__CORS_ORIGINS`: Comma separated origins, or `*` (default: *)
//! - `KANBAN_DATABASE__URL`: SQLite URL (default: sqlite://kanban.db)
//! - `KANBAN_DATABASE__MAX_CONNECTIONS`: Pool size (default: 5)
//! - `RUST_LOG`: Log filter
//!
//! # Example
//!
//! ```no_run
//! use kanban_api::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Server will listen on {}", config.bind_address());
//! # Ok(())
//! # }
//! ```

use anyhow::Context;
use config::{Environment, File};
use serde::{Deserialize, Serialize};

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins, `*` for any
    pub cors_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// An optional `kanban.toml` in the working directory is read first;
    /// environment variables override it.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed into its field type.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let settings = config::Config::builder()
            .set_default("api.host", defaults.api.host)?
            .set_default("api.port", i64::from(defaults.api.port))?
            .set_default("api.cors_origins", defaults.api.cors_origins)?
            .set_default("database.url", defaults.database.url)?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .add_source(File::with_name("kanban").required(false))
            .add_source(
                Environment::with_prefix("KANBAN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Parsed CORS origins, `None` when any origin is allowed
    pub fn cors_origin_list(&self) -> Option<Vec<String>> {
        let origins = self.api.cors_origins.trim();
        if origins == "*" {
            return None;
        }

        Some(
            origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                cors_origins: "*".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://kanban.db".to_string(),
                max_connections: 5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let mut config = Config::default();
        config.api.host = "127.0.0.1".to_string();
        config.api.port = 3000;

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_cors_origin_list() {
        let mut config = Config::default();
        assert!(config.cors_origin_list().is_none());

        config.api.cors_origins = "http://a.test, http://b.test,".to_string();
        assert_eq!(
            config.cors_origin_list().unwrap(),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }
}
