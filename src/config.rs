//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

use crate::error::{Result, ServerError};

/// Environment variable prefix for server settings.
pub const ENV_PREFIX: &str = "SCAN_MOCK_";

/// Application configuration loaded from environment variables.
///
/// Only the listener and logging are configurable; scan behavior is fixed.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Interface to listen on (`SCAN_MOCK_HOST`).
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (`SCAN_MOCK_PORT`).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5001
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config: Self = envy::prefixed(ENV_PREFIX).from_env()?;
        Ok(config)
    }

    /// Load from explicit `SCAN_MOCK_*` key/value pairs instead of the process
    /// environment.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Self = envy::prefixed(ENV_PREFIX).from_iter(vars)?;
        Ok(config)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(ServerError::InvalidConfig(
                "SCAN_MOCK_PORT must not be 0".to_string(),
            ));
        }

        self.host.parse::<IpAddr>().map_err(|_| {
            ServerError::InvalidConfig(format!(
                "SCAN_MOCK_HOST must be an IP address, got {:?}",
                self.host
            ))
        })?;

        Ok(())
    }

    /// Address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            ServerError::InvalidConfig(format!("invalid host {:?}", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
