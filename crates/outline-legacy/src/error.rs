//! Error types for legacy outline decoding.

use std::path::PathBuf;

use outline_model::ElementKind;
use thiserror::Error;

use crate::decoder::Decoded;
use crate::tag::RecordTag;

/// Conditions raised while decoding a record stream.
///
/// Only [`TruncatedStream`](Self::TruncatedStream) and
/// [`Cancelled`](Self::Cancelled) stop a pass; every other variant is
/// collected as a [`Diagnostic`](crate::Diagnostic) and decoding continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A header or payload runs past the end of the buffer.
    #[error("truncated stream at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// A tag outside the record catalog. Its declared payload is skipped.
    #[error("unknown record tag {tag} ({length} payload bytes skipped)")]
    UnknownRecordTag { tag: RecordTag, length: u16 },

    /// A continuation record arrived before any record started an entity of
    /// its kind. The payload is consumed and discarded.
    #[error("{tag} record ignored: no current {kind}")]
    ContinuationWithoutCurrentEntity { tag: RecordTag, kind: ElementKind },

    /// The version record names a version the layout registry does not
    /// know. The newest layouts are used from here on.
    #[error("unsupported format version '{version}', using newest layouts")]
    UnsupportedFormatVersion { version: String },

    /// A personality trait record names none of the twelve traits.
    #[error("unknown personality trait '{name}'")]
    UnknownTrait { name: String },

    /// The caller's cancel flag was raised between two records.
    #[error("decoding cancelled")]
    Cancelled,
}

impl DecodeError {
    pub fn truncated(offset: usize, needed: usize, remaining: usize) -> Self {
        Self::TruncatedStream {
            offset,
            needed,
            remaining,
        }
    }

    /// Whether this condition stops the pass.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::TruncatedStream { .. } | Self::Cancelled)
    }
}

/// A pass that stopped early, with everything assembled before the stop.
#[derive(Debug, Error)]
#[error("decoding stopped at offset {offset}: {error}")]
pub struct PartialDecode {
    /// Offset of the record header being processed when the pass stopped.
    pub offset: usize,
    #[source]
    pub error: DecodeError,
    /// Best-effort result: entities and trees built from the records before
    /// `offset`, plus the diagnostics collected so far.
    pub partial: Box<Decoded>,
}

/// Errors from reading a legacy outline file.
#[derive(Debug, Error)]
pub enum LegacyError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record stream could not be decoded to the end.
    #[error(transparent)]
    Decode(Box<PartialDecode>),
}

impl From<PartialDecode> for LegacyError {
    fn from(partial: PartialDecode) -> Self {
        Self::Decode(Box::new(partial))
    }
}

/// Result type alias for legacy outline reading.
pub type Result<T> = std::result::Result<T, LegacyError>;
