//! Test-only writer for legacy outline record streams.

#![allow(dead_code)]

use outline_legacy::{FieldEncoding, FormatVersion, RecordTag, lookup};

/// Space-pad (or cut) `text` to `width` bytes.
pub fn padded(text: &str, width: usize) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.resize(width, b' ');
    bytes
}

/// Builds a record stream the way legacy writers laid it out.
#[derive(Debug, Default)]
pub struct OutlineWriter {
    bytes: Vec<u8>,
    version: Option<FormatVersion>,
}

impl OutlineWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current length of the stream, i.e. the offset of the next header.
    pub fn offset(&self) -> usize {
        self.bytes.len()
    }

    /// A header with an arbitrary declared length and no payload.
    pub fn header(mut self, tag: &[u8; 2], length: u16) -> Self {
        self.bytes.extend_from_slice(tag);
        self.bytes.extend_from_slice(&length.to_le_bytes());
        self
    }

    /// Raw bytes with no header.
    pub fn bytes(mut self, payload: &[u8]) -> Self {
        self.bytes.extend_from_slice(payload);
        self
    }

    /// A record whose declared length matches its payload.
    pub fn record(self, tag: &[u8; 2], payload: &[u8]) -> Self {
        let length = u16::try_from(payload.len()).expect("payload fits in u16");
        self.header(tag, length).bytes(payload)
    }

    /// A `VR` record. Later fixed records are laid out for this version
    /// when it is registered, else with the newest layouts.
    pub fn version(mut self, text: &str) -> Self {
        self.version = text
            .parse::<FormatVersion>()
            .ok()
            .filter(|version| version.is_known());
        self.record(b"VR", &padded(text, 7))
    }

    /// Lay out a fixed record for the active version. Fields not named in
    /// `values` are left blank.
    pub fn fixed(self, tag: &[u8; 2], values: &[(&str, &str)]) -> Self {
        let payload = fixed_payload(tag, self.version, values);
        self.record(tag, &payload)
    }

    /// A free-text record.
    pub fn text(self, tag: &[u8; 2], text: &str) -> Self {
        self.record(tag, text.as_bytes())
    }

    /// A record of four length-prefixed text blobs.
    pub fn multi(self, tag: &[u8; 2], texts: [&str; 4]) -> Self {
        let payload = multi_payload(texts);
        self.record(tag, &payload)
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

pub fn fixed_payload(
    tag: &[u8; 2],
    version: Option<FormatVersion>,
    values: &[(&str, &str)],
) -> Vec<u8> {
    let layout = lookup(RecordTag::new(*tag), version).expect("tag has a fixed layout");
    for (name, _) in values {
        assert!(
            layout.field(name).is_some(),
            "{} has no field {name}",
            RecordTag::new(*tag)
        );
    }
    let mut payload = Vec::with_capacity(layout.width());
    for field in layout.fields {
        let value = values
            .iter()
            .find(|(name, _)| *name == field.name)
            .map_or("", |(_, value)| *value);
        match field.encoding {
            FieldEncoding::Text => payload.extend(padded(value, field.width)),
            FieldEncoding::Int16 => {
                let number: i16 = if value.is_empty() {
                    0
                } else {
                    value.parse().expect("numeric field value")
                };
                payload.extend_from_slice(&number.to_le_bytes());
            }
        }
    }
    payload
}

pub fn multi_payload(texts: [&str; 4]) -> Vec<u8> {
    let mut payload = Vec::new();
    for text in texts {
        let length = u16::try_from(text.len()).expect("blob fits in u16");
        payload.extend_from_slice(&length.to_le_bytes());
        payload.extend_from_slice(text.as_bytes());
    }
    payload
}
