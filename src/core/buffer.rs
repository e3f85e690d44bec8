//! # Packet Buffers
//!
//! Cursor-style reader and writer used by every offline packet body.
//!
//! Both types are thin wrappers over the `bytes` crate. The reader never
//! panics on short input: each read checks `remaining()` first and reports
//! [`ProtocolError::TruncatedPacket`] instead.

use crate::config::MAGIC;
use crate::error::{ProtocolError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Append-only writer for a packet body
#[derive(Debug, Default)]
pub struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer whose buffer will not reallocate below `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Write the protocol signature verbatim
    pub fn write_magic(&mut self) {
        self.buf.put_slice(&MAGIC);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Append `count` zero filler bytes
    pub fn pad(&mut self, count: usize) {
        self.buf.put_bytes(0, count);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Freeze the written bytes without copying
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Bounds-checked reader over a packet body
#[derive(Debug, Clone)]
pub struct PacketReader {
    buf: Bytes,
}

impl PacketReader {
    pub fn new(buf: Bytes) -> Self {
        Self { buf }
    }

    /// Copy `data` into a new reader
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Bytes left unread
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let available = self.remaining();
        if available < needed {
            return Err(ProtocolError::TruncatedPacket { needed, available });
        }
        Ok(())
    }

    /// Read `MAGIC.len()` bytes and report whether they match the signature.
    ///
    /// A mismatch is not an error; only running out of bytes is.
    pub fn read_magic(&mut self) -> Result<bool> {
        self.ensure(MAGIC.len())?;
        let matches = self.buf[..MAGIC.len()] == MAGIC;
        self.buf.advance(MAGIC.len());
        Ok(matches)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    /// Discard `count` bytes without inspecting them
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.ensure(count)?;
        self.buf.advance(count);
        Ok(())
    }
}
