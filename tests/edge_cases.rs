#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
//! Edge-case tests for the handshake probe codec
//! Tests boundary sizes, malformed and oversized input, and error reporting

use handshake_probe::config::MAGIC;
use handshake_probe::core::buffer::{PacketReader, PacketWriter};
use handshake_probe::core::packet::ID_OPEN_CONNECTION_REQUEST_1;
use handshake_probe::error::ProtocolError;
use handshake_probe::{decode_probe, encode_probe, HandshakeProbe, HEADER_LEN};

// ============================================================================
// ENCODE EDGE CASES
// ============================================================================

#[test]
fn test_encode_reference_scenario() {
    let probe = HandshakeProbe::new(11, 1464);
    let body = probe.encode().expect("Should encode");

    let mut expected = MAGIC.to_vec();
    expected.push(0x0B);
    expected.extend(std::iter::repeat(0u8).take(1446));

    assert_eq!(body.len(), 1463);
    assert_eq!(&body[..], &expected[..]);
}

#[test]
fn test_encode_exact_header() {
    let body = HandshakeProbe::new(255, 18).encode().expect("Should encode");
    assert_eq!(body.len(), 17);
    assert_eq!(body[16], 255);
}

#[test]
fn test_encode_every_mtu_below_header_rejected() {
    for mtu in 0..HEADER_LEN as u32 {
        let result = HandshakeProbe::new(11, mtu).encode();
        assert!(
            matches!(result, Err(ProtocolError::InvalidField { .. })),
            "MTU {mtu} should be rejected"
        );
    }
}

#[test]
fn test_encode_probe_appends_to_existing_writer() {
    let mut writer = PacketWriter::new();
    writer.write_u8(0xAA);
    encode_probe(&HandshakeProbe::new(1, 20), &mut writer).expect("Should encode");
    assert_eq!(writer.len(), 1 + 19);
}

// ============================================================================
// DECODE EDGE CASES
// ============================================================================

#[test]
fn test_decode_empty_buffer() {
    let result = HandshakeProbe::decode(&[]);
    assert!(matches!(
        result,
        Err(ProtocolError::TruncatedPacket {
            needed: 17,
            available: 0
        })
    ));
}

#[test]
fn test_decode_every_short_length() {
    let body = HandshakeProbe::new(11, 100).encode().unwrap();
    for len in 0..17 {
        assert!(
            matches!(
                HandshakeProbe::decode(&body[..len]),
                Err(ProtocolError::TruncatedPacket { .. })
            ),
            "length {len} should be truncated"
        );
    }
    assert!(HandshakeProbe::decode(&body[..17]).is_ok());
}

#[test]
fn test_decode_signature_only_is_truncated() {
    // Signature intact but version byte missing
    let result = HandshakeProbe::decode(&MAGIC);
    assert!(matches!(
        result,
        Err(ProtocolError::TruncatedPacket {
            needed: 17,
            available: 16
        })
    ));
}

#[test]
fn test_decode_zeroed_signature() {
    let body = vec![0u8; 100];
    let probe = HandshakeProbe::decode(&body).expect("Structurally valid");
    assert!(!probe.signature_valid);
    assert_eq!(probe.protocol_version, 0);
    assert_eq!(probe.maximum_transfer_unit, 101);
}

#[test]
fn test_decode_consumes_reader() {
    let body = HandshakeProbe::new(11, 1200).encode().unwrap();
    let mut reader = PacketReader::new(body);
    decode_probe(&mut reader).expect("Should decode");
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_decode_max_udp_datagram() {
    let probe = HandshakeProbe::new(11, 65_507);
    let wire = probe.to_datagram().unwrap().to_bytes();
    assert_eq!(wire.len(), 65_507);
    assert_eq!(HandshakeProbe::from_datagram(&wire).unwrap(), probe);
}

#[test]
fn test_decode_datagram_identifier_only() {
    let result = HandshakeProbe::from_datagram(&[ID_OPEN_CONNECTION_REQUEST_1]);
    assert!(matches!(
        result,
        Err(ProtocolError::TruncatedPacket {
            needed: 17,
            available: 0
        })
    ));
}

#[test]
fn test_decode_datagram_empty() {
    assert!(matches!(
        HandshakeProbe::from_datagram(&[]),
        Err(ProtocolError::TruncatedPacket {
            needed: 1,
            available: 0
        })
    ));
}

#[test]
fn test_decode_datagram_other_identifier() {
    let mut wire = HandshakeProbe::new(11, 600)
        .to_datagram()
        .unwrap()
        .to_bytes()
        .to_vec();
    wire[0] = 0x07;
    assert!(matches!(
        HandshakeProbe::from_datagram(&wire),
        Err(ProtocolError::UnexpectedPacketId(0x07))
    ));
}

#[test]
fn test_signature_mismatch_is_not_an_error() {
    let mut wire = HandshakeProbe::new(11, 600)
        .to_datagram()
        .unwrap()
        .to_bytes()
        .to_vec();
    wire[1 + 15] ^= 0x80;

    let probe = HandshakeProbe::from_datagram(&wire).expect("Mismatch is reported, not raised");
    assert!(!probe.signature_valid);
    assert_eq!(probe.protocol_version, 11);
    assert_eq!(probe.maximum_transfer_unit, 600);
}
