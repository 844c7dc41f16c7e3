//! Decoder for legacy binary story outline files.
//!
//! Legacy outlines are a flat stream of tagged records. Each record starts
//! with a 4-byte header (2-byte tag, little-endian `u16` length). Fixed-layout
//! records take their width from the active format version; free-text
//! records take it from the header. Continuation records attach to the most
//! recently started entity of their kind.
//!
//! # Features
//!
//! - Format versions `00.03` through `00.13`, with newest-layout fallback
//! - Declarative, version-keyed layout registry ([`layouts`], [`lookup`])
//! - Best-effort decoding: unknown tags and orphaned continuation records
//!   become [`Diagnostic`]s instead of aborting
//! - Truncated streams return the partial outline ([`PartialDecode`])
//! - Outline and narrative forests built over one element arena
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use outline_legacy::read_outline;
//! use outline_model::ElementKind;
//!
//! let decoded = read_outline(Path::new("novel.otl")).unwrap();
//! println!(
//!     "{} characters, {} diagnostics",
//!     decoded.outline.count(ElementKind::Character),
//!     decoded.diagnostic_count()
//! );
//! ```
//!
//! # Partial results
//!
//! ```
//! use outline_legacy::{DecodeError, decode};
//!
//! // A header cut short after the tag.
//! let err = decode(b"VR").unwrap_err();
//! assert!(matches!(err.error, DecodeError::TruncatedStream { .. }));
//! assert_eq!(err.partial.outline.outline.roots().len(), 2);
//! ```

mod assembler;
pub mod catalog;
mod context;
mod cursor;
mod decoder;
mod diagnostics;
mod error;
pub mod layout;
mod options;
mod reader;
mod tag;
mod text;
mod tree_builder;
mod version;

pub use error::{DecodeError, LegacyError, PartialDecode, Result};

pub use catalog::{CATALOG, RecordRole, classify};
pub use decoder::{Decoded, Decoder, decode, decode_with_options};
pub use diagnostics::{Diagnostic, RecordOutcome, RecordTrace};
pub use layout::{FieldEncoding, FieldSpec, LayoutEntry, RecordLayout, layouts, lookup};
pub use options::DecodeOptions;
pub use reader::{LegacyReader, read_outline, read_outline_with_options};
pub use tag::{HEADER_LEN, RecordHeader, RecordTag};
pub use text::decode_ansi;
pub use tree_builder::{NARRATIVE_NAME, OVERVIEW_NAME, TRASH_NAME};
pub use version::{FormatVersion, VersionRange};
