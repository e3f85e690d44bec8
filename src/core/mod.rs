//! # Core Packet Components
//!
//! Low-level datagram handling shared by every offline packet.
//!
//! ## Components
//! - **Buffer**: bounds-checked cursor reader and writer over `bytes`
//! - **Packet**: one-byte identifier framing of a UDP datagram
//! - **Codec**: `tokio_util` codec for use with `UdpFramed`
//!
//! ## Wire Format
//! ```text
//! [Id(1)] [Body(N)]
//! ```
//!
//! ## Security
//! - Reads never go past the end of the datagram
//! - A failed decode still consumes the datagram

pub mod buffer;
pub mod codec;
pub mod packet;
