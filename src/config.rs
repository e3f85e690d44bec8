//! # Configuration Management
//!
//! Centralized configuration for the handshake probe.
//!
//! This module holds the protocol-wide constants (signature, protocol version,
//! MTU bounds) and structured configuration for the client-side MTU ladder,
//! the server-side admission policy and logging.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment-specific overrides via `from_env()`

use crate::error::{constants, ProtocolError, Result};
use crate::protocol::admission::ProbePolicy;
use crate::protocol::discovery::MtuDiscovery;
use crate::protocol::probe::HEADER_LEN;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing::Level;

/// Current supported network protocol version
pub const PROTOCOL_VERSION: u8 = 11;

/// Fixed signature that fingerprints protocol-conformant offline datagrams.
/// It is a recognition pattern only, not an authenticity check.
pub const MAGIC: [u8; 16] = [
    0x00, 0xFF, 0xFF, 0x00, 0xFE, 0xFE, 0xFE, 0xFE, 0xFD, 0xFD, 0xFD, 0xFD, 0x12, 0x34, 0x56, 0x78,
];

/// Largest MTU a client will probe with or a server will grant
pub const MAXIMUM_MTU_SIZE: u32 = 1492;

/// Smallest MTU a server will accept a probe at
pub const MINIMUM_MTU_SIZE: u32 = 400;

/// MTU sizes probed by a client, largest first
pub const DEFAULT_MTU_SIZES: [u32; 3] = [MAXIMUM_MTU_SIZE, 1200, 576];

/// Probes sent at each MTU size before falling back to the next one
pub const DEFAULT_ATTEMPTS_PER_SIZE: u32 = 4;

/// Largest UDP payload over IPv4
const MAX_UDP_PAYLOAD: u32 = 65_507;

/// Main configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProbeConfig {
    /// Client-side MTU discovery settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Server-side probe admission settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProbeConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_OPEN))
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_READ))
        })?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_PARSE))
        })
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(version) = std::env::var("HANDSHAKE_PROBE_PROTOCOL_VERSION") {
            if let Ok(val) = version.parse::<u8>() {
                config.client.protocol_version = val;
                config.server.protocol_version = val;
            }
        }

        if let Ok(sizes) = std::env::var("HANDSHAKE_PROBE_MTU_SIZES") {
            let parsed: std::result::Result<Vec<u32>, _> =
                sizes.split(',').map(|s| s.trim().parse::<u32>()).collect();
            if let Ok(val) = parsed {
                config.client.mtu_sizes = val;
            }
        }

        if let Ok(attempts) = std::env::var("HANDSHAKE_PROBE_ATTEMPTS_PER_SIZE") {
            if let Ok(val) = attempts.parse::<u32>() {
                config.client.attempts_per_size = val;
            }
        }

        if let Ok(min) = std::env::var("HANDSHAKE_PROBE_MINIMUM_MTU") {
            if let Ok(val) = min.parse::<u32>() {
                config.server.minimum_mtu = val;
            }
        }

        if let Ok(max) = std::env::var("HANDSHAKE_PROBE_MAXIMUM_MTU") {
            if let Ok(val) = max.parse::<u32>() {
                config.server.maximum_mtu = val;
            }
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_SERIALIZE))
        })?;

        std::fs::write(path, content).map_err(|e| {
            ProtocolError::ConfigError(format!("{}: {e}", constants::ERR_CONFIG_WRITE))
        })?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        errors.extend(self.client.validate());
        errors.extend(self.server.validate());
        errors.extend(self.logging.validate());

        if self.client.protocol_version != self.server.protocol_version {
            errors.push(format!(
                "WARNING: client protocol version {} differs from server protocol version {}",
                self.client.protocol_version, self.server.protocol_version
            ));
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

/// Client-side MTU discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Network protocol version announced in every probe
    pub protocol_version: u8,

    /// MTU sizes to probe with, largest first
    pub mtu_sizes: Vec<u32>,

    /// Probes sent at each size before falling back
    pub attempts_per_size: u32,

    /// Delay between consecutive probes
    #[serde(with = "duration_serde")]
    pub attempt_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            mtu_sizes: DEFAULT_MTU_SIZES.to_vec(),
            attempts_per_size: DEFAULT_ATTEMPTS_PER_SIZE,
            attempt_interval: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Validate client configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.mtu_sizes.is_empty() {
            errors.push("MTU size list cannot be empty".to_string());
        }

        for &size in &self.mtu_sizes {
            if (size as usize) < HEADER_LEN {
                errors.push(format!(
                    "MTU size {size} is smaller than the probe header ({HEADER_LEN} bytes)"
                ));
            } else if size > MAX_UDP_PAYLOAD {
                errors.push(format!(
                    "MTU size {size} exceeds the largest UDP payload ({MAX_UDP_PAYLOAD} bytes)"
                ));
            }
        }

        if self.attempts_per_size == 0 {
            errors.push("Attempts per MTU size must be greater than 0".to_string());
        } else if self.attempts_per_size > 64 {
            errors.push(format!(
                "Attempts per MTU size too large: {} (maximum: 64)",
                self.attempts_per_size
            ));
        }

        if self.attempt_interval.as_millis() < 10 {
            errors.push("Attempt interval too short (minimum: 10ms)".to_string());
        } else if self.attempt_interval.as_secs() > 30 {
            errors.push("Attempt interval too long (maximum: 30s)".to_string());
        }

        errors
    }

    /// Build the MTU discovery ladder described by this configuration
    pub fn discovery(&self) -> Result<MtuDiscovery> {
        MtuDiscovery::new(
            self.protocol_version,
            self.mtu_sizes.clone(),
            self.attempts_per_size,
        )
    }
}

/// Server-side probe admission configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Network protocol version the server speaks
    pub protocol_version: u8,

    /// Probes announcing a smaller MTU are ignored
    pub minimum_mtu: u32,

    /// Accepted probes are clamped to this MTU
    pub maximum_mtu: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            minimum_mtu: MINIMUM_MTU_SIZE,
            maximum_mtu: MAXIMUM_MTU_SIZE,
        }
    }
}

impl ServerConfig {
    /// Validate server configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if (self.minimum_mtu as usize) < HEADER_LEN {
            errors.push(format!(
                "Minimum MTU {} is smaller than the probe header ({HEADER_LEN} bytes)",
                self.minimum_mtu
            ));
        }

        if self.maximum_mtu < self.minimum_mtu {
            errors.push(format!(
                "Maximum MTU {} is smaller than minimum MTU {}",
                self.maximum_mtu, self.minimum_mtu
            ));
        } else if self.maximum_mtu > MAX_UDP_PAYLOAD {
            errors.push(format!(
                "Maximum MTU {} exceeds the largest UDP payload ({MAX_UDP_PAYLOAD} bytes)",
                self.maximum_mtu
            ));
        }

        errors
    }

    /// Build the admission policy described by this configuration
    pub fn policy(&self) -> Result<ProbePolicy> {
        ProbePolicy::new(self.protocol_version, self.minimum_mtu, self.maximum_mtu)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("handshake-probe"),
            log_level: Level::INFO,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        errors
    }
}

/// Helper module for Duration serialization/deserialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = duration.as_millis() as u64;
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
