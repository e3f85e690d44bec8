//! # Handshake Probe
//!
//! The first datagram a client sends before any session exists. Its body is
//! the fixed signature, one protocol-version byte, and filler:
//!
//! ```text
//! [Id(1)] [Magic(16)] [ProtocolVersion(1)] [Padding(MTU - 18)]
//! ```
//!
//! There is no length field. The datagram size *is* the client's MTU: the
//! encoder pads the body until `1 + body.len() == maximum_transfer_unit`, and
//! the decoder recomputes the MTU from how many bytes actually arrived. This
//! only holds while nothing below the codec fragments or reassembles the
//! datagram.
//!
//! The codec is pure and stateless; both directions can run concurrently
//! from any number of threads.

use crate::config::MAGIC;
use crate::core::buffer::{PacketReader, PacketWriter};
use crate::core::packet::{Datagram, ID_LEN, ID_OPEN_CONNECTION_REQUEST_1};
use crate::error::{constants, ProtocolError, Result};
use bytes::Bytes;
use tracing::trace;

/// Identifier + signature + protocol version
pub const HEADER_LEN: usize = ID_LEN + MAGIC.len() + 1;

/// Smallest body (identifier excluded) the decoder accepts
pub const MIN_BODY_LEN: usize = HEADER_LEN - ID_LEN;

/// A decoded or to-be-encoded handshake probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakeProbe {
    /// Whether the signature bytes matched. Always `true` for a probe built to be encoded.
    pub signature_valid: bool,

    /// The client's network protocol version
    pub protocol_version: u8,

    /// Total datagram size, identifier included. Requested on encode, inferred on decode.
    pub maximum_transfer_unit: u32,
}

impl HandshakeProbe {
    /// Build a probe to be encoded
    pub fn new(protocol_version: u8, maximum_transfer_unit: u32) -> Self {
        Self {
            signature_valid: true,
            protocol_version,
            maximum_transfer_unit,
        }
    }

    /// Number of filler bytes this probe needs, or `None` if the MTU is below the header
    pub fn padding_len(&self) -> Option<usize> {
        (self.maximum_transfer_unit as usize).checked_sub(HEADER_LEN)
    }

    /// Encode the body (identifier excluded). Output is `maximum_transfer_unit - 1` bytes.
    ///
    /// The whole body is allocated up front, so callers should bound the MTU
    /// first; [`crate::config::ProbeConfig::validate`] caps it at 65 507.
    pub fn encode(&self) -> Result<Bytes> {
        let mut writer = PacketWriter::with_capacity(self.body_capacity());
        encode_probe(self, &mut writer)?;
        Ok(writer.finish())
    }

    /// Decode a body positioned just past the identifier
    pub fn decode(body: &[u8]) -> Result<Self> {
        decode_probe(&mut PacketReader::from_slice(body))
    }

    /// Encode the whole datagram, identifier included
    pub fn to_datagram(&self) -> Result<Datagram> {
        Ok(Datagram::new(ID_OPEN_CONNECTION_REQUEST_1, self.encode()?))
    }

    /// Decode a whole datagram, identifier included
    pub fn from_datagram(data: &[u8]) -> Result<Self> {
        let datagram = Datagram::from_bytes(data)?;
        Self::from_parts(datagram)
    }

    /// Decode an already split datagram
    pub fn from_parts(datagram: Datagram) -> Result<Self> {
        datagram.expect_id(ID_OPEN_CONNECTION_REQUEST_1)?;
        decode_probe(&mut PacketReader::new(datagram.body))
    }

    fn body_capacity(&self) -> usize {
        (self.maximum_transfer_unit as usize).saturating_sub(ID_LEN)
    }
}

/// Write signature, version and filler for `probe` into `writer`.
///
/// Fails with [`ProtocolError::InvalidField`] when the requested MTU cannot
/// hold the fixed header; nothing is written in that case.
pub fn encode_probe(probe: &HandshakeProbe, writer: &mut PacketWriter) -> Result<()> {
    let padding = probe
        .padding_len()
        .ok_or(ProtocolError::InvalidField {
            field: "maximum_transfer_unit",
            reason: constants::ERR_MTU_BELOW_HEADER,
        })?;

    writer.write_magic();
    writer.write_u8(probe.protocol_version);
    writer.pad(padding);
    Ok(())
}

/// Read a probe body from `reader`, consuming all of it.
pub fn decode_probe(reader: &mut PacketReader) -> Result<HandshakeProbe> {
    let available = reader.remaining();
    if available < MIN_BODY_LEN {
        trace!(available, "Dropping truncated handshake probe");
        return Err(ProtocolError::TruncatedPacket {
            needed: MIN_BODY_LEN,
            available,
        });
    }

    let signature_valid = reader.read_magic()?;
    let protocol_version = reader.read_u8()?;

    let padding = reader.remaining();
    let total = HEADER_LEN + padding;
    let maximum_transfer_unit =
        u32::try_from(total).map_err(|_| ProtocolError::OversizedPacket(total))?;
    reader.skip(padding)?;

    if !signature_valid {
        trace!(protocol_version, "Handshake probe signature mismatch");
    }

    Ok(HandshakeProbe {
        signature_valid,
        protocol_version,
        maximum_transfer_unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_len_is_locked() {
        assert_eq!(HEADER_LEN, 18);
        assert_eq!(MIN_BODY_LEN, 17);
    }

    #[test]
    fn test_reference_probe() {
        let probe = HandshakeProbe::new(11, 1464);
        let body = probe.encode().unwrap();

        assert_eq!(body.len(), 1463);
        assert_eq!(&body[..16], &MAGIC);
        assert_eq!(body[16], 0x0B);
        assert_eq!(body.len() - MIN_BODY_LEN, 1446);

        let decoded = HandshakeProbe::decode(&body).unwrap();
        assert!(decoded.signature_valid);
        assert_eq!(decoded.protocol_version, 11);
        assert_eq!(decoded.maximum_transfer_unit, 1464);
    }

    #[test]
    fn test_header_only_probe() {
        let probe = HandshakeProbe::new(0, HEADER_LEN as u32);
        let body = probe.encode().unwrap();
        assert_eq!(body.len(), MIN_BODY_LEN);

        let decoded = HandshakeProbe::decode(&body).unwrap();
        assert_eq!(decoded.maximum_transfer_unit, 18);
    }

    #[test]
    fn test_encode_rejects_small_mtu() {
        let probe = HandshakeProbe::new(11, 17);
        assert!(matches!(
            probe.encode(),
            Err(ProtocolError::InvalidField {
                field: "maximum_transfer_unit",
                ..
            })
        ));

        let mut writer = PacketWriter::new();
        assert!(encode_probe(&HandshakeProbe::new(11, 0), &mut writer).is_err());
        assert!(writer.is_empty());
    }

    #[test]
    fn test_decode_rejects_truncated() {
        let body = HandshakeProbe::new(11, 100).encode().unwrap();
        assert!(matches!(
            HandshakeProbe::decode(&body[..16]),
            Err(ProtocolError::TruncatedPacket {
                needed: 17,
                available: 16
            })
        ));
    }

    #[test]
    fn test_decode_filler_content_ignored() {
        let mut body = HandshakeProbe::new(7, 64).encode().unwrap().to_vec();
        for b in &mut body[MIN_BODY_LEN..] {
            *b = 0xEE;
        }
        let decoded = HandshakeProbe::decode(&body).unwrap();
        assert_eq!(decoded, HandshakeProbe::new(7, 64));
    }

    #[test]
    fn test_datagram_roundtrip() {
        let probe = HandshakeProbe::new(10, 576);
        let wire = probe.to_datagram().unwrap().to_bytes();
        assert_eq!(wire.len(), 576);
        assert_eq!(wire[0], ID_OPEN_CONNECTION_REQUEST_1);

        assert_eq!(HandshakeProbe::from_datagram(&wire).unwrap(), probe);
    }

    #[test]
    fn test_datagram_wrong_id() {
        let mut wire = HandshakeProbe::new(10, 64).to_datagram().unwrap().to_bytes().to_vec();
        wire[0] = 0x07;
        assert!(matches!(
            HandshakeProbe::from_datagram(&wire),
            Err(ProtocolError::UnexpectedPacketId(0x07))
        ));
    }
}
