//! The record dispatcher: one forward pass over a legacy outline buffer.

use outline_model::StoryOutline;
use tracing::{debug, info, info_span, warn};

use crate::assembler::{self, Applied};
use crate::catalog::{RecordRole, classify};
use crate::context::ParseContext;
use crate::cursor::ByteCursor;
use crate::diagnostics::{Diagnostic, DiagnosticSink, RecordOutcome, RecordTrace};
use crate::error::{DecodeError, PartialDecode};
use crate::layout::{DecodedField, lookup};
use crate::options::DecodeOptions;
use crate::tag::{RecordHeader, RecordTag};
use crate::text::decode_ansi;
use crate::version::FormatVersion;

/// Result of a completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Format version active at the end of the stream.
    pub version: Option<FormatVersion>,
    pub outline: StoryOutline,
    /// Recoverable conditions, in stream order.
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics not stored because of [`DecodeOptions::max_diagnostics`].
    pub dropped_diagnostics: usize,
    /// Per-record trace; empty unless [`DecodeOptions::trace_records`] is set.
    pub trace: Vec<RecordTrace>,
}

impl Decoded {
    /// Total number of recoverable conditions seen.
    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len() + self.dropped_diagnostics
    }
}

/// One dispatched record.
struct Step {
    header: RecordHeader,
    consumed: usize,
    applied: Applied,
}

/// Legacy outline decoder.
///
/// Holds only options; every call to [`Decoder::decode`] starts from a
/// fresh parse state, so one decoder can be reused for many files.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decode a complete legacy outline buffer.
    ///
    /// Recoverable conditions are collected in [`Decoded::diagnostics`]. A
    /// truncated stream, cancellation, or (in strict mode) any diagnostic
    /// stops the pass; the error then carries everything assembled up to
    /// that record.
    pub fn decode(&self, bytes: &[u8]) -> Result<Decoded, PartialDecode> {
        let span = info_span!("decode_outline", bytes = bytes.len());
        let _guard = span.enter();

        let mut cursor = ByteCursor::new(bytes);
        let mut ctx = ParseContext::new();
        let mut sink = DiagnosticSink::new(self.options.max_diagnostics);
        let mut trace = Vec::new();
        let mut stop = None;

        while !cursor.is_at_end() {
            let offset = cursor.position();
            if self.options.is_cancelled() {
                stop = Some((offset, DecodeError::Cancelled));
                break;
            }
            let step = match dispatch(&mut cursor, &mut ctx) {
                Ok(step) => step,
                Err(error) => {
                    stop = Some((offset, error));
                    break;
                }
            };
            let Step {
                header,
                consumed,
                applied,
            } = step;
            let outcome = match applied {
                Ok(outcome) => outcome,
                Err(error) if self.options.strict => {
                    stop = Some((offset, error));
                    break;
                }
                Err(error) => {
                    sink.push(Diagnostic::new(offset, Some(header.tag), error));
                    if header.tag == RecordTag::VERSION {
                        RecordOutcome::Version(None)
                    } else {
                        RecordOutcome::Skipped
                    }
                }
            };
            debug!(
                offset,
                tag = %header.tag,
                length = header.length,
                consumed,
                %outcome,
                "record"
            );
            if self.options.trace_records {
                trace.push(RecordTrace {
                    offset,
                    tag: header.tag,
                    declared_length: header.length,
                    consumed,
                    outcome,
                });
            }
        }

        let seen = sink.total();
        let (diagnostics, dropped_diagnostics) = sink.into_parts();
        let version = ctx.version();
        let outline = ctx.finish().unwrap_or_else(|error| {
            warn!(%error, "outline trees could not be assembled");
            StoryOutline::default()
        });
        info!(
            version = version.map(|v| v.to_string()),
            elements = outline.elements.len(),
            relationships = outline.relationships.len(),
            diagnostics = seen,
            "decoded outline"
        );
        let decoded = Decoded {
            version,
            outline,
            diagnostics,
            dropped_diagnostics,
            trace,
        };

        match stop {
            None => Ok(decoded),
            Some((offset, error)) => {
                warn!(offset, %error, "decoding stopped");
                Err(PartialDecode {
                    offset,
                    error,
                    partial: Box::new(decoded),
                })
            }
        }
    }
}

/// Decode with default options.
pub fn decode(bytes: &[u8]) -> Result<Decoded, PartialDecode> {
    Decoder::default().decode(bytes)
}

/// Decode with the given options.
pub fn decode_with_options(
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<Decoded, PartialDecode> {
    Decoder::new(options.clone()).decode(bytes)
}

/// Read one header and its payload, then apply it.
///
/// `Err` is a fatal condition; recoverable ones are returned inside the
/// step so the caller can record them against the header offset.
fn dispatch(cursor: &mut ByteCursor<'_>, ctx: &mut ParseContext) -> Result<Step, DecodeError> {
    let header = cursor.read_header()?;
    let start = cursor.position();
    let tag = header.tag;
    let applied = match classify(tag) {
        None => {
            cursor.skip(usize::from(header.length))?;
            Err(DecodeError::UnknownRecordTag {
                tag,
                length: header.length,
            })
        }
        Some(RecordRole::Version) => {
            fixed_record(cursor, ctx, header, |ctx, payload, _| apply_version(ctx, payload))?
        }
        Some(RecordRole::Start(kind)) => fixed_record(cursor, ctx, header, |ctx, _, fields| {
            assembler::start(ctx, tag, kind, fields)
        })?,
        Some(RecordRole::Fixed(kind)) => fixed_record(cursor, ctx, header, |ctx, _, fields| {
            assembler::update(ctx, tag, kind, fields)
        })?,
        Some(RecordRole::Trait) => fixed_record(cursor, ctx, header, |ctx, _, fields| {
            assembler::personality_trait(ctx, tag, fields)
        })?,
        Some(RecordRole::MultiText { kind, attributes }) => {
            let texts = [
                cursor.read_prefixed_text()?,
                cursor.read_prefixed_text()?,
                cursor.read_prefixed_text()?,
                cursor.read_prefixed_text()?,
            ];
            assembler::multi_text(ctx, tag, kind, attributes, texts)
        }
        Some(RecordRole::FreeText { kind, attribute }) => {
            let text = cursor.read_text(usize::from(header.length))?;
            assembler::free_text(ctx, tag, kind, attribute, &text)
        }
    };
    Ok(Step {
        header,
        consumed: cursor.position() - start,
        applied,
    })
}

/// Read a fixed-layout payload at the width the active version implies,
/// then hand the raw payload and its decoded fields to `apply`.
fn fixed_record<F>(
    cursor: &mut ByteCursor<'_>,
    ctx: &mut ParseContext,
    header: RecordHeader,
    apply: F,
) -> Result<Applied, DecodeError>
where
    F: FnOnce(&mut ParseContext, &[u8], Vec<DecodedField>) -> Applied,
{
    let Some(layout) = lookup(header.tag, ctx.version()) else {
        cursor.skip(usize::from(header.length))?;
        return Ok(Err(DecodeError::UnsupportedFormatVersion {
            version: ctx
                .version()
                .map_or_else(|| "current".to_string(), |v| v.to_string()),
        }));
    };
    let payload = cursor.read_fixed(layout.width())?;
    let fields = layout.decode(payload);
    Ok(apply(ctx, payload, fields))
}

/// Switch the active version. Text that is not a registered version
/// selects the newest layouts and is reported.
fn apply_version(ctx: &mut ParseContext, payload: &[u8]) -> Applied {
    let parsed = parse_version(payload);
    let version = parsed.as_ref().ok().copied();
    ctx.set_version(version);
    parsed.map(|version| RecordOutcome::Version(Some(version)))
}

/// Parse a `VR` payload into a registered version.
fn parse_version(payload: &[u8]) -> Result<FormatVersion, DecodeError> {
    let text = decode_ansi(payload);
    let text = text.trim();
    let version: FormatVersion = text.parse()?;
    if version.is_known() {
        Ok(version)
    } else {
        Err(DecodeError::UnsupportedFormatVersion {
            version: text.to_string(),
        })
    }
}
