//! # Probe Datagram Codec
//!
//! `tokio_util` codec for handshake probes, meant for `UdpFramed`.
//!
//! UDP delivers whole datagrams, so unlike a stream codec there is no partial
//! frame to wait for: every `decode` call treats the entire buffer as one
//! datagram and consumes it, whether or not decoding succeeds. Leaving a bad
//! datagram in the buffer would make `UdpFramed` retry it forever.

use crate::core::packet::Datagram;
use crate::error::{ProtocolError, Result};
use crate::protocol::probe::HandshakeProbe;
use crate::utils::metrics::{global_metrics, Timer};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

#[derive(Debug, Default, Clone, Copy)]
pub struct ProbeCodec;

impl Decoder for ProbeCodec {
    type Item = HandshakeProbe;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if src.is_empty() {
            return Ok(None);
        }

        let _timer = Timer::start("handshake_decode");
        let datagram_len = src.len();
        let frozen = src.split().freeze();
        let metrics = global_metrics();
        metrics.datagram_received(datagram_len as u64);

        let result = Datagram::from_frozen(frozen).and_then(HandshakeProbe::from_parts);
        match &result {
            Ok(probe) => {
                metrics.probe_decoded();
                if !probe.signature_valid {
                    metrics.signature_mismatch();
                }
            }
            Err(e) => {
                trace!(error = %e, datagram_len, "Failed to decode handshake probe");
                metrics.decode_error(e);
            }
        }

        result.map(Some)
    }
}

impl Encoder<HandshakeProbe> for ProbeCodec {
    type Error = ProtocolError;

    fn encode(&mut self, item: HandshakeProbe, dst: &mut BytesMut) -> Result<()> {
        let metrics = global_metrics();
        let datagram = match item.to_datagram() {
            Ok(datagram) => datagram,
            Err(e) => {
                metrics.encode_error();
                return Err(e);
            }
        };

        debug_assert_eq!(
            datagram.wire_len(),
            item.maximum_transfer_unit as usize,
            "probe datagram must be exactly MTU bytes"
        );
        datagram.write_into(dst);
        metrics.probe_encoded(datagram.wire_len() as u64);
        Ok(())
    }
}
