//! Receive loop configuration.
//!
//! Defaults match the game's out-of-the-box UDP settings. Values can come
//! from YAML, from the environment, or be built in code:
//!
//! ```rust
//! use pitlane::ReceiverConfig;
//!
//! let config = ReceiverConfig::from_yaml_str("port: 20778\nchannel_capacity: 64\n").unwrap();
//! assert_eq!(config.port, 20778);
//! assert_eq!(config.max_datagram_size, 2048);
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::packets::{MAX_PACKET_SIZE, MIN_HEADER_SIZE};
use crate::types::UpdateRate;
use crate::{Result, TelemetryError};

/// Environment variable naming the address to bind.
pub const ENV_BIND_ADDRESS: &str = "F1_UDP_SERVER_ADDRESS";
/// Environment variable naming the port to bind.
pub const ENV_PORT: &str = "F1_UDP_SERVER_PORT";

pub const DEFAULT_PORT: u16 = 20777;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Loopback by default; use `0.0.0.0` when the game runs on another machine
    pub bind_address: IpAddr,
    /// 0 lets the OS pick a port
    pub port: u16,
    /// Receive buffer size; longer datagrams are cut by the socket
    pub max_datagram_size: usize,
    /// Packets a subscriber may fall behind before it starts losing the oldest
    pub channel_capacity: usize,
    pub update_rate: UpdateRate,
    /// Send rate configured in the game, used to normalize `update_rate`
    pub source_hz: f64,
    /// Consecutive socket errors before the receive loop gives up
    pub max_provider_errors: u32,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            max_datagram_size: MAX_PACKET_SIZE,
            channel_capacity: 256,
            update_rate: UpdateRate::Native,
            source_hz: 60.0,
            max_provider_errors: 10,
        }
    }
}

impl ReceiverConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| TelemetryError::config(format!("invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `F1_UDP_SERVER_ADDRESS` and `F1_UDP_SERVER_PORT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_BIND_ADDRESS) {
            config.bind_address = raw.trim().parse().map_err(|e| {
                TelemetryError::config(format!(
                    "{}={:?} is not an IP address: {}",
                    ENV_BIND_ADDRESS, raw, e
                ))
            })?;
        }
        if let Some(raw) = lookup(ENV_PORT) {
            config.port = raw.trim().parse().map_err(|e| {
                TelemetryError::config(format!("{}={:?} is not a port: {}", ENV_PORT, raw, e))
            })?;
        }

        debug!(bind = %config.socket_addr(), "Loaded receiver configuration from environment");
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_datagram_size < MIN_HEADER_SIZE || self.max_datagram_size > u16::MAX as usize {
            return Err(TelemetryError::config(format!(
                "max_datagram_size must be between {} and {}, got {}",
                MIN_HEADER_SIZE,
                u16::MAX,
                self.max_datagram_size
            )));
        }
        if self.channel_capacity == 0 {
            return Err(TelemetryError::config("channel_capacity must be at least 1"));
        }
        if !self.source_hz.is_finite() || self.source_hz <= 0.0 {
            return Err(TelemetryError::config(format!(
                "source_hz must be a positive rate, got {}",
                self.source_hz
            )));
        }
        if self.max_provider_errors == 0 {
            return Err(TelemetryError::config("max_provider_errors must be at least 1"));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_bind_address(mut self, address: IpAddr) -> Self {
        self.bind_address = address;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = ReceiverConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:20777");
        assert!(config.bind_address.is_loopback());
        assert_eq!(config.max_datagram_size, 2048);
        assert_eq!(config.channel_capacity, 256);
        assert_eq!(config.update_rate, UpdateRate::Native);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ReceiverConfig::from_lookup(lookup(&[
            (ENV_BIND_ADDRESS, "0.0.0.0"),
            (ENV_PORT, " 20999 "),
        ]))
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:20999");
        assert_eq!(config.channel_capacity, 256);

        let config = ReceiverConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ReceiverConfig::default());
    }

    #[test]
    fn bad_environment_values() {
        let err = ReceiverConfig::from_lookup(lookup(&[(ENV_PORT, "seventy")])).unwrap_err();
        assert!(matches!(err, TelemetryError::Config { .. }));
        assert!(err.to_string().contains(ENV_PORT));

        let err =
            ReceiverConfig::from_lookup(lookup(&[(ENV_BIND_ADDRESS, "localhost:1")])).unwrap_err();
        assert!(err.to_string().contains(ENV_BIND_ADDRESS));
    }

    #[test]
    fn yaml_with_partial_fields() {
        let yaml = "bind_address: 10.0.0.5\nupdate_rate: !Max 10\nsource_hz: 20.0\n";
        let config = ReceiverConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.bind_address, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)));
        assert_eq!(config.update_rate, UpdateRate::Max(10));
        assert_eq!(config.source_hz, 20.0);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn validation_rejects_unusable_values() {
        for yaml in [
            "channel_capacity: 0",
            "max_datagram_size: 10",
            "max_datagram_size: 70000",
            "source_hz: 0.0",
            "max_provider_errors: 0",
        ] {
            let err = ReceiverConfig::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, TelemetryError::Config { .. }), "{yaml}");
        }
        assert!(ReceiverConfig::from_yaml_str("port: [1, 2]").is_err());
    }
}
