//! Service configuration from the environment
//!
//! | Variable                     | Default   |
//! |------------------------------|-----------|
//! | `DIRECT_CONFIG_BIND`         | `0.0.0.0` |
//! | `DIRECT_CONFIG_PORT`         | `8080`    |
//! | `DIRECT_CONFIG_LOG_LEVEL`    | `info`    |
//! | `DIRECT_CONFIG_DATABASE_URL` | unset     |

use std::collections::HashMap;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;
use tracing::Level;

pub const ENV_BIND: &str = "DIRECT_CONFIG_BIND";
pub const ENV_PORT: &str = "DIRECT_CONFIG_PORT";
pub const ENV_LOG_LEVEL: &str = "DIRECT_CONFIG_LOG_LEVEL";
pub const ENV_DATABASE_URL: &str = "DIRECT_CONFIG_DATABASE_URL";

/// Invalid configuration value
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Runtime configuration of the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind: IpAddr,
    pub port: u16,
    pub log_level: Level,
    /// Selects the PostgreSQL backend when set
    pub database_url: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            log_level: Level::INFO,
            database_url: None,
        }
    }
}

impl ServiceConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build the configuration from an explicit variable map
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = vars.get(ENV_BIND) {
            config.bind = value.parse().map_err(|_| ConfigError::Invalid {
                var: ENV_BIND,
                expected: "an IP address",
                value: value.clone(),
            })?;
        }

        if let Some(value) = vars.get(ENV_PORT) {
            config.port = value.parse().map_err(|_| ConfigError::Invalid {
                var: ENV_PORT,
                expected: "a valid port number",
                value: value.clone(),
            })?;
        }

        if let Some(value) = vars.get(ENV_LOG_LEVEL) {
            config.log_level = value.parse().map_err(|_| ConfigError::Invalid {
                var: ENV_LOG_LEVEL,
                expected: "one of trace, debug, info, warn, error",
                value: value.clone(),
            })?;
        }

        config.database_url = vars
            .get(ENV_DATABASE_URL)
            .filter(|url| !url.trim().is_empty())
            .cloned();

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_vars(&vars(&[
            (ENV_BIND, "127.0.0.1"),
            (ENV_PORT, "9090"),
            (ENV_LOG_LEVEL, "debug"),
            (ENV_DATABASE_URL, "postgres://localhost/direct_config"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9090");
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/direct_config")
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = ServiceConfig::from_vars(&vars(&[(ENV_PORT, "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: ENV_PORT, .. }));
    }

    #[test]
    fn test_blank_database_url_is_unset() {
        let config = ServiceConfig::from_vars(&vars(&[(ENV_DATABASE_URL, "  ")])).unwrap();
        assert!(config.database_url.is_none());
    }
}
