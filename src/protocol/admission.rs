//! Server-side policy for incoming handshake probes.
//!
//! Decoding never rejects a probe for its content. This is where a server
//! decides whether to ignore it, answer with an incompatible-version notice,
//! or continue the handshake at a (possibly clamped) MTU.

use crate::config::{MAXIMUM_MTU_SIZE, MINIMUM_MTU_SIZE, PROTOCOL_VERSION};
use crate::error::{constants, ProtocolError, Result};
use crate::protocol::probe::HandshakeProbe;
use tracing::{debug, trace};

/// Why a probe was dropped without reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Signature bytes did not match; most likely unrelated traffic
    SignatureMismatch,
    /// Announced MTU is below the server minimum
    MtuTooSmall(u32),
}

/// Outcome of evaluating a probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeVerdict {
    Ignore(IgnoreReason),
    /// The client should be told which version the server speaks
    IncompatibleVersion { server_version: u8 },
    /// Continue the handshake at `mtu`
    Accept { mtu: u32 },
}

/// Admission bounds. Always `minimum_mtu <= maximum_mtu`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePolicy {
    protocol_version: u8,
    minimum_mtu: u32,
    maximum_mtu: u32,
}

impl Default for ProbePolicy {
    fn default() -> Self {
        Self {
            protocol_version: PROTOCOL_VERSION,
            minimum_mtu: MINIMUM_MTU_SIZE,
            maximum_mtu: MAXIMUM_MTU_SIZE,
        }
    }
}

impl ProbePolicy {
    /// Build a policy, rejecting a maximum MTU below the minimum
    pub fn new(protocol_version: u8, minimum_mtu: u32, maximum_mtu: u32) -> Result<Self> {
        if maximum_mtu < minimum_mtu {
            return Err(ProtocolError::InvalidField {
                field: "maximum_mtu",
                reason: constants::ERR_MTU_BOUNDS_INVERTED,
            });
        }

        Ok(Self {
            protocol_version,
            minimum_mtu,
            maximum_mtu,
        })
    }

    pub fn protocol_version(&self) -> u8 {
        self.protocol_version
    }

    pub fn minimum_mtu(&self) -> u32 {
        self.minimum_mtu
    }

    pub fn maximum_mtu(&self) -> u32 {
        self.maximum_mtu
    }

    /// Decide what to do with a decoded probe
    pub fn evaluate(&self, probe: &HandshakeProbe) -> ProbeVerdict {
        if !probe.signature_valid {
            trace!("Ignoring probe with bad signature");
            return ProbeVerdict::Ignore(IgnoreReason::SignatureMismatch);
        }

        if probe.protocol_version != self.protocol_version {
            debug!(
                client_version = probe.protocol_version,
                server_version = self.protocol_version,
                "Incompatible protocol version in handshake probe"
            );
            return ProbeVerdict::IncompatibleVersion {
                server_version: self.protocol_version,
            };
        }

        let mtu = probe.maximum_transfer_unit;
        if mtu < self.minimum_mtu {
            debug!(mtu, minimum = self.minimum_mtu, "Probe MTU below minimum");
            return ProbeVerdict::Ignore(IgnoreReason::MtuTooSmall(mtu));
        }

        ProbeVerdict::Accept {
            mtu: mtu.min(self.maximum_mtu),
        }
    }
}
