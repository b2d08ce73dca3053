//! Server configuration from the environment

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the server configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("PORT must be a valid number, got '{0}'")]
    InvalidPort(String),

    #[error("Invalid HOST:PORT configuration: '{0}'")]
    InvalidAddress(String),
}

/// Runtime settings of the HTTP server
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `<collection>.jsonl` files
    pub data_dir: PathBuf,
    /// Value field used when a request does not name one
    pub value_field: String,
    /// Timestamp field used when a request does not name one; empty disables ordering
    pub timestamp_field: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./data"),
            value_field: "sales".to_string(),
            timestamp_field: Some("timestamp".to_string()),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `SALESCAST_DATA_DIR`, `SALESCAST_VALUE_FIELD` and
    /// `SALESCAST_TIMESTAMP_FIELD` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        let timestamp_field = match lookup("SALESCAST_TIMESTAMP_FIELD") {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(raw),
            None => defaults.timestamp_field,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            data_dir: lookup("SALESCAST_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            value_field: lookup("SALESCAST_VALUE_FIELD").unwrap_or(defaults.value_field),
            timestamp_field,
        })
    }

    /// Address to bind
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidAddress(raw))
    }
}
