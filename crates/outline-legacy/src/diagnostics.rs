//! Diagnostics and record traces collected during a pass.

use outline_model::ElementKind;
use serde::Serialize;

use crate::error::DecodeError;
use crate::tag::RecordTag;
use crate::version::FormatVersion;

/// A recoverable condition, located at the header that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte offset of the record header.
    pub offset: usize,
    /// Tag of the offending record, when a header was read.
    pub tag: Option<RecordTag>,
    pub error: DecodeError,
}

impl Diagnostic {
    pub fn new(offset: usize, tag: Option<RecordTag>, error: DecodeError) -> Self {
        Self { offset, tag, error }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "offset {}: {}", self.offset, self.error)
    }
}

/// What a record did to the parse state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// A version record; `None` when the text was not a known version.
    Version(Option<FormatVersion>),
    Created(ElementKind),
    Updated(ElementKind),
    /// Consumed without effect (unknown tag, no current entity, bad trait).
    Skipped,
}

impl std::fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Version(Some(version)) => write!(f, "version {version}"),
            Self::Version(None) => f.write_str("version (unsupported)"),
            Self::Created(kind) => write!(f, "created {kind}"),
            Self::Updated(kind) => write!(f, "updated {kind}"),
            Self::Skipped => f.write_str("skipped"),
        }
    }
}

/// One dispatched record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordTrace {
    pub offset: usize,
    pub tag: RecordTag,
    pub declared_length: u16,
    /// Payload bytes consumed after the header.
    pub consumed: usize,
    pub outcome: RecordOutcome,
}

/// Diagnostics list with an optional cap.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    limit: Option<usize>,
    kept: Vec<Diagnostic>,
    dropped: usize,
}

impl DiagnosticSink {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            kept: Vec::new(),
            dropped: 0,
        }
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            offset = diagnostic.offset,
            tag = diagnostic.tag.map(|tag| tag.to_string()),
            "{}",
            diagnostic.error
        );
        if self.limit.is_some_and(|limit| self.kept.len() >= limit) {
            self.dropped += 1;
        } else {
            self.kept.push(diagnostic);
        }
    }

    /// Total diagnostics seen, kept or not.
    pub(crate) fn total(&self) -> usize {
        self.kept.len() + self.dropped
    }

    pub(crate) fn into_parts(self) -> (Vec<Diagnostic>, usize) {
        (self.kept, self.dropped)
    }
}
