//! Client-side MTU discovery ladder.
//!
//! A client does not know its path MTU up front, so it sends probes at the
//! largest configured size first and falls back to smaller sizes when no
//! reply arrives. This module only produces the probe sequence; sending,
//! waiting and stopping on the first reply belong to the transport.

use crate::error::{constants, ProtocolError, Result};
use crate::protocol::probe::{HandshakeProbe, HEADER_LEN};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MtuDiscovery {
    protocol_version: u8,
    sizes: Vec<u32>,
    attempts_per_size: u32,
    index: usize,
    attempt: u32,
}

impl MtuDiscovery {
    /// Build a ladder. Sizes are sorted largest first and deduplicated.
    pub fn new(protocol_version: u8, mut sizes: Vec<u32>, attempts_per_size: u32) -> Result<Self> {
        if sizes.is_empty() {
            return Err(ProtocolError::InvalidField {
                field: "mtu_sizes",
                reason: constants::ERR_EMPTY_MTU_LADDER,
            });
        }
        if sizes.iter().any(|&size| (size as usize) < HEADER_LEN) {
            return Err(ProtocolError::InvalidField {
                field: "mtu_sizes",
                reason: constants::ERR_MTU_BELOW_HEADER,
            });
        }
        if attempts_per_size == 0 {
            return Err(ProtocolError::InvalidField {
                field: "attempts_per_size",
                reason: constants::ERR_ZERO_ATTEMPTS,
            });
        }

        sizes.sort_unstable_by(|a, b| b.cmp(a));
        sizes.dedup();

        Ok(Self {
            protocol_version,
            sizes,
            attempts_per_size,
            index: 0,
            attempt: 0,
        })
    }

    /// MTU the next probe will carry, if any remain
    pub fn current_mtu(&self) -> Option<u32> {
        self.sizes.get(self.index).copied()
    }

    /// Total number of probes this ladder yields
    pub fn total_probes(&self) -> usize {
        self.sizes.len() * self.attempts_per_size as usize
    }
}

impl Iterator for MtuDiscovery {
    type Item = HandshakeProbe;

    fn next(&mut self) -> Option<Self::Item> {
        let mtu = self.current_mtu()?;

        self.attempt += 1;
        if self.attempt >= self.attempts_per_size {
            self.attempt = 0;
            self.index += 1;
            if let Some(next) = self.current_mtu() {
                debug!(from = mtu, to = next, "Falling back to smaller MTU");
            }
        }

        Some(HandshakeProbe::new(self.protocol_version, mtu))
    }
}
