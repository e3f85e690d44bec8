//! # Error Types
//!
//! Error handling for the handshake-probe codec.
//!
//! Only structural problems are errors here. A probe whose signature does not
//! match is still decoded and reported through
//! [`HandshakeProbe::signature_valid`](crate::protocol::probe::HandshakeProbe),
//! so the caller can drop background noise without paying for an error path.
//!
//! ## Error Categories
//! - **Encode Errors**: a caller-supplied field that cannot be written (e.g. an MTU below the fixed header)
//! - **Decode Errors**: truncated datagrams, unexpected packet identifiers, sizes that overflow the MTU field
//! - **I/O Errors**: surfaced by the datagram codec when used with `UdpFramed`
//! - **Configuration Errors**: unreadable or invalid configuration
//!
//! ## Example Usage
//! ```rust
//! use handshake_probe::error::ProtocolError;
//! use handshake_probe::HandshakeProbe;
//!
//! match HandshakeProbe::decode(&[0x00, 0xFF]) {
//!     Err(ProtocolError::TruncatedPacket { needed, available }) => {
//!         assert_eq!((needed, available), (17, 2));
//!     }
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Encode-side field validation
    pub const ERR_MTU_BELOW_HEADER: &str = "maximum transfer unit is smaller than the fixed probe header";
    pub const ERR_EMPTY_MTU_LADDER: &str = "at least one MTU size is required";
    pub const ERR_ZERO_ATTEMPTS: &str = "attempts per MTU size must be greater than 0";
    pub const ERR_MTU_BOUNDS_INVERTED: &str = "maximum MTU is smaller than minimum MTU";

    /// Configuration
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
}

// ProtocolError is the primary error type for all probe operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Truncated packet: needed {needed} bytes, {available} available")]
    TruncatedPacket { needed: usize, available: usize },

    #[error("Packet too large: {0} bytes")]
    OversizedPacket(usize),

    #[error("Unexpected packet identifier: {0:#04x}")]
    UnexpectedPacketId(u8),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
