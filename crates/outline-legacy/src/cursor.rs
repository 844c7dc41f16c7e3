//! Forward-only reader over an in-memory record stream.

use crate::error::DecodeError;
use crate::tag::{HEADER_LEN, RecordHeader};
use crate::text::decode_ansi;

/// Sequential reader over a byte buffer.
///
/// Every read either consumes exactly the requested bytes or fails with
/// [`DecodeError::TruncatedStream`] without moving. The position never
/// moves backward.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.data.len()
    }

    /// Read `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let bytes = self.peek(len)?;
        self.position += len;
        Ok(bytes)
    }

    fn peek(&self, len: usize) -> Result<&'a [u8], DecodeError> {
        self.position
            .checked_add(len)
            .and_then(|end| self.data.get(self.position..end))
            .ok_or_else(|| DecodeError::truncated(self.position, len, self.remaining()))
    }

    /// Read the 4-byte record header.
    pub fn read_header(&mut self) -> Result<RecordHeader, DecodeError> {
        let bytes = self.read_bytes(HEADER_LEN)?;
        Ok(RecordHeader::parse([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a packed fixed-width record payload.
    pub fn read_fixed(&mut self, width: usize) -> Result<&'a [u8], DecodeError> {
        self.read_bytes(width)
    }

    /// Read `len` bytes as single-byte text.
    pub fn read_text(&mut self, len: usize) -> Result<String, DecodeError> {
        self.read_bytes(len).map(decode_ansi)
    }

    /// Read a text blob preceded by its own little-endian u16 length.
    pub fn read_prefixed_text(&mut self) -> Result<String, DecodeError> {
        let prefix = self.peek(2)?;
        let len = usize::from(u16::from_le_bytes([prefix[0], prefix[1]]));
        let bytes = self.read_bytes(2 + len)?;
        Ok(decode_ansi(&bytes[2..]))
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_bytes(len).map(|_| ())
    }
}
