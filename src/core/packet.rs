//! Datagram framing: a one-byte packet identifier followed by the packet body.

use crate::error::{ProtocolError, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// Identifier of the first client handshake probe
pub const ID_OPEN_CONNECTION_REQUEST_1: u8 = 0x05;

/// Length of the identifier prefix
pub const ID_LEN: usize = 1;

/// A single UDP datagram split into identifier and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram {
    pub id: u8,
    pub body: Bytes,
}

impl Datagram {
    pub fn new(id: u8, body: Bytes) -> Self {
        Self { id, body }
    }

    /// Total wire size including the identifier
    pub fn wire_len(&self) -> usize {
        ID_LEN + self.body.len()
    }

    /// Serialize into `[id][body]`
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.wire_len());
        self.write_into(&mut buf);
        buf.freeze()
    }

    /// Append `[id][body]` to `dst`
    pub fn write_into(&self, dst: &mut BytesMut) {
        dst.reserve(self.wire_len());
        dst.put_u8(self.id);
        dst.put_slice(&self.body);
    }

    /// Split a received datagram into identifier and body
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match data.split_first() {
            Some((&id, body)) => Ok(Self {
                id,
                body: Bytes::copy_from_slice(body),
            }),
            None => Err(ProtocolError::TruncatedPacket {
                needed: ID_LEN,
                available: 0,
            }),
        }
    }

    /// Zero-copy variant of [`Datagram::from_bytes`] for an owned buffer
    pub fn from_frozen(mut data: Bytes) -> Result<Self> {
        if data.is_empty() {
            return Err(ProtocolError::TruncatedPacket {
                needed: ID_LEN,
                available: 0,
            });
        }
        let body = data.split_off(ID_LEN);
        Ok(Self { id: data[0], body })
    }

    /// Fail unless this datagram carries `expected`
    pub fn expect_id(&self, expected: u8) -> Result<()> {
        if self.id != expected {
            return Err(ProtocolError::UnexpectedPacketId(self.id));
        }
        Ok(())
    }
}
