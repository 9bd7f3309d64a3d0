//! HTTP server configuration loaded from the environment.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors raised while reading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {field}: {value:?} (expected {expected})")]
    InvalidValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("validation failed for {field}: {reason}")]
    ValidationFailed {
        field: &'static str,
        reason: &'static str,
    },
}

/// HTTP server configuration. The store has its own configuration in
/// `doable_core::DatabaseConfig`; the two are loaded side by side at
/// startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// Load configuration from `HTTP_HOST` / `HTTP_PORT`, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("HTTP_HOST").unwrap_or(defaults.host);

        let port = match env::var("HTTP_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                field: "port",
                value: raw,
                expected: "a TCP port number",
            })?,
            Err(_) => defaults.port,
        };

        let config = Self { host, port };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "host",
                reason: "host must not be empty",
            });
        }
        if self.port == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "port",
                reason: "port must be greater than 0",
            });
        }
        Ok(())
    }

    /// The socket address to bind.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::ValidationFailed {
                field: "host",
                reason: "host and port do not form a valid socket address",
            })
    }
}
