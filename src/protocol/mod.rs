//! # Handshake Protocol
//!
//! The handshake probe and the logic on either side of it.
//!
//! - **Probe**: wire format and the encode/decode pair
//! - **Admission**: server-side verdict for a decoded probe
//! - **Discovery**: client-side descending MTU ladder

pub mod admission;
pub mod discovery;
pub mod probe;
