//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0:?}")]
    InvalidPort(String),
    #[error("invalid BIND_ADDR: {0:?}")]
    InvalidBindAddr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl HostConfig {
    /// Build host config from environment variables.
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("BIND_ADDR").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )
    }

    /// Blank values count as unset.
    pub fn from_vars(bind_addr: Option<&str>, port: Option<&str>) -> Result<Self, ConfigError> {
        let bind_addr = match bind_addr.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidBindAddr(raw.to_owned()))?,
            None => DEFAULT_BIND_ADDR,
        };
        let port = match port.map(str::trim).filter(|v| !v.is_empty()) {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw.to_owned()))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { bind_addr, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
