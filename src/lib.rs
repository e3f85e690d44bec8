//! # Handshake Probe
//!
//! Encode/decode contract for the first handshake datagram of a
//! connectionless, UDP-based reliable transport.
//!
//! Before any session exists, a client sends a probe made of a fixed
//! signature, its protocol version, and filler. The datagram's total size is
//! the client's path MTU; no length field carries it.
//!
//! ## Layout
//! - [`protocol::probe`]: the probe record and the `encode_probe` / `decode_probe` pair
//! - [`protocol::admission`]: server-side verdict (ignore, incompatible, accept at MTU)
//! - [`protocol::discovery`]: client-side descending MTU ladder
//! - [`core`]: cursor buffers, identifier framing, `tokio_util` datagram codec
//! - [`config`]: constants and TOML/env configuration
//! - [`utils`]: logging setup and metrics
//!
//! ## Example
//! ```rust
//! use handshake_probe::HandshakeProbe;
//!
//! let probe = HandshakeProbe::new(11, 1464);
//! let wire = probe.to_datagram()?.to_bytes();
//! assert_eq!(wire.len(), 1464);
//!
//! let decoded = HandshakeProbe::from_datagram(&wire)?;
//! assert!(decoded.signature_valid);
//! assert_eq!(decoded.maximum_transfer_unit, 1464);
//! # Ok::<(), handshake_probe::ProtocolError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::codec::ProbeCodec;
pub use crate::core::packet::Datagram;
pub use error::{ProtocolError, Result};
pub use protocol::admission::{IgnoreReason, ProbePolicy, ProbeVerdict};
pub use protocol::discovery::MtuDiscovery;
pub use protocol::probe::{decode_probe, encode_probe, HandshakeProbe, HEADER_LEN};
