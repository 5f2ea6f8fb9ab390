//! Server configuration.
//!
//! Values come from CLI flags, which fall back to environment variables
//! (`MATURITY_HOST`, `PORT`, `MATURITY_RATE_LIMIT`). `PORT` is the variable
//! hosting platforms inject.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;

/// Default bind address.
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default port.
pub const DEFAULT_PORT: u16 = 8050;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Global request budget per second. `None` disables limiting.
    pub rate_limit: Option<NonZeroU32>,
    /// Allow cross-origin requests to the JSON API.
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            rate_limit: None,
            cors: true,
        }
    }
}

impl ServerConfig {
    /// Build from raw CLI values. A rate limit of zero disables limiting.
    #[must_use]
    pub fn new(host: IpAddr, port: u16, rate_limit: u32, cors: bool) -> Self {
        Self {
            host,
            port,
            rate_limit: NonZeroU32::new(rate_limit),
            cors,
        }
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8050");
        assert!(config.rate_limit.is_none());
    }

    #[test]
    fn zero_rate_limit_disables_limiting() {
        let config = ServerConfig::new(DEFAULT_HOST, 9000, 0, false);
        assert!(config.rate_limit.is_none());
        let limited = ServerConfig::new(DEFAULT_HOST, 9000, 25, false);
        assert_eq!(limited.rate_limit.map(NonZeroU32::get), Some(25));
    }
}
