//! Record tags and headers.

use std::fmt;

use serde::{Serialize, Serializer};

/// Size of a record header: 2-byte tag plus 2-byte little-endian length.
pub const HEADER_LEN: usize = 4;

/// Two-byte record type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordTag([u8; 2]);

impl RecordTag {
    pub const VERSION: Self = Self(*b"VR");

    pub const fn new(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(self) -> [u8; 2] {
        self.0
    }

    fn is_printable(self) -> bool {
        self.0.iter().all(|b| b.is_ascii_graphic())
    }
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_printable() {
            write!(f, "{}{}", self.0[0] as char, self.0[1] as char)
        } else {
            write!(f, "0x{}", hex::encode(self.0))
        }
    }
}

impl Serialize for RecordTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A decoded record header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub tag: RecordTag,
    /// Declared payload length. Only free-text and unknown records rely on
    /// it; fixed-layout records consume their layout width instead.
    pub length: u16,
}

impl RecordHeader {
    pub fn parse(bytes: [u8; HEADER_LEN]) -> Self {
        Self {
            tag: RecordTag([bytes[0], bytes[1]]),
            length: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_header_little_endian() {
        let header = RecordHeader::parse([b'C', b'N', 0x34, 0x12]);
        assert_eq!(header.tag, RecordTag::new(*b"CN"));
        assert_eq!(header.length, 0x1234);
    }

    #[test]
    fn display_printable_and_binary_tags() {
        assert_eq!(RecordTag::new(*b"C$").to_string(), "C$");
        assert_eq!(RecordTag::new([0x00, 0xff]).to_string(), "0x00ff");
    }
}
