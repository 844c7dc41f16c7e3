//! Declarative fixed-width record layouts.
//!
//! A [`RecordLayout`] is an ordered list of fields, each with a byte width
//! and an encoding. One generic reader ([`RecordLayout::decode`]) interprets
//! every layout; the per-version differences live entirely in the
//! [`registry`] table.

pub mod registry;

pub use registry::{LayoutEntry, layouts, lookup};

use crate::text::{decode_ansi, decode_int16};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEncoding {
    /// Space-padded single-byte text.
    Text,
    /// Little-endian signed 16-bit integer; zero decodes as empty.
    Int16,
}

/// One field of a fixed-width record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub width: usize,
    pub encoding: FieldEncoding,
}

impl FieldSpec {
    pub const fn text(name: &'static str, width: usize) -> Self {
        Self {
            name,
            width,
            encoding: FieldEncoding::Text,
        }
    }

    pub const fn int16(name: &'static str) -> Self {
        Self {
            name,
            width: 2,
            encoding: FieldEncoding::Int16,
        }
    }
}

/// Physical layout of a fixed-width record payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub fields: &'static [FieldSpec],
}

impl RecordLayout {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        Self { fields }
    }

    /// Total payload width in bytes.
    pub const fn width(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].width;
            i += 1;
        }
        total
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|field| field.name)
    }

    /// Decode a payload into `(field name, value)` pairs in layout order.
    ///
    /// Fields that do not fit in `payload` are omitted, so a short slice
    /// never panics; callers read exactly [`Self::width`] bytes.
    pub fn decode(&self, payload: &[u8]) -> Vec<DecodedField> {
        let mut out = Vec::with_capacity(self.fields.len());
        let mut offset = 0usize;
        for field in self.fields {
            let Some(bytes) = payload.get(offset..offset + field.width) else {
                break;
            };
            let value = match field.encoding {
                FieldEncoding::Text => decode_ansi(bytes),
                FieldEncoding::Int16 => decode_int16([bytes[0], bytes[1]]),
            };
            out.push(DecodedField {
                name: field.name,
                value,
            });
            offset += field.width;
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    pub name: &'static str,
    pub value: String,
}
