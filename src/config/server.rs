//! Server configuration loaded from environment variables.
//!
//! Reads `SERVER_HOST` and `SERVER_PORT` (after `.env` has been loaded by `main`).
//! Missing or unparsable values fall back to the defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Port used when `SERVER_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

/// Listening address for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: IpAddr,
    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Builds the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("SERVER_HOST").ok().as_deref(),
            std::env::var("SERVER_PORT").ok().as_deref(),
        )
    }

    fn from_values(host: Option<&str>, port: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            host: host
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(defaults.host),
            port: port
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(defaults.port),
        }
    }

    /// Socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset_or_invalid() {
        assert_eq!(ServerConfig::from_values(None, None), ServerConfig::default());
        assert_eq!(
            ServerConfig::from_values(Some("not-an-ip"), Some("http")),
            ServerConfig::default()
        );
    }

    #[test]
    fn test_explicit_values() {
        let config = ServerConfig::from_values(Some("127.0.0.1"), Some(" 9090 "));
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9090");
    }
}
