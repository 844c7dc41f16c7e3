//! Applies decoded record payloads to the parse state.
//!
//! Payloads are fully read before anything here runs, so a rejected record
//! has already been consumed and the cursor sits on the next header.

use outline_model::{ElementKind, ModelError, PERSONALITY_TRAITS};

use crate::context::{ParseContext, Target};
use crate::diagnostics::RecordOutcome;
use crate::error::DecodeError;
use crate::layout::DecodedField;
use crate::layout::registry::{TRAIT_NAME, TRAIT_VALUE};
use crate::tag::RecordTag;

/// Outcome of one record, or the recoverable reason it had no effect.
pub type Applied = Result<RecordOutcome, DecodeError>;

fn report(tag: RecordTag, error: &ModelError) {
    tracing::warn!(%tag, %error, "record field not applied");
}

fn copy_fields(target: &mut Target<'_>, tag: RecordTag, fields: Vec<DecodedField>) {
    for field in fields {
        if let Err(error) = target.set(field.name, field.value) {
            report(tag, &error);
        }
    }
}

fn current<'a>(
    ctx: &'a mut ParseContext,
    tag: RecordTag,
    kind: ElementKind,
) -> Result<Target<'a>, DecodeError> {
    ctx.target(kind)
        .ok_or(DecodeError::ContinuationWithoutCurrentEntity { tag, kind })
}

/// Create a new entity from a start record.
pub fn start(
    ctx: &mut ParseContext,
    tag: RecordTag,
    kind: ElementKind,
    fields: Vec<DecodedField>,
) -> Applied {
    if let Err(error) = ctx.start(kind, |target| copy_fields(target, tag, fields)) {
        report(tag, &error);
    }
    Ok(RecordOutcome::Created(kind))
}

/// Overwrite fields of the current entity from a fixed-layout record.
pub fn update(
    ctx: &mut ParseContext,
    tag: RecordTag,
    kind: ElementKind,
    fields: Vec<DecodedField>,
) -> Applied {
    let mut target = current(ctx, tag, kind)?;
    copy_fields(&mut target, tag, fields);
    Ok(RecordOutcome::Updated(kind))
}

/// Resolve a trait name to one of the character trait attributes.
///
/// Matching ignores case and surrounding whitespace. The misspelling
/// written by older versions is accepted for adventurousness.
pub fn trait_attribute(name: &str) -> Option<&'static str> {
    let lowered = name.trim().to_ascii_lowercase();
    let wanted = match lowered.as_str() {
        "adventureousness" => "adventurousness",
        other => other,
    };
    PERSONALITY_TRAITS
        .iter()
        .copied()
        .find(|&candidate| candidate == wanted)
}

/// Set one personality trait on the current character.
pub fn personality_trait(
    ctx: &mut ParseContext,
    tag: RecordTag,
    fields: Vec<DecodedField>,
) -> Applied {
    let mut target = current(ctx, tag, ElementKind::Character)?;
    let mut name = String::new();
    let mut value = String::new();
    for field in fields {
        match field.name {
            TRAIT_NAME => name = field.value,
            TRAIT_VALUE => value = field.value,
            _ => {}
        }
    }
    let attribute = trait_attribute(&name).ok_or(DecodeError::UnknownTrait { name })?;
    if let Err(error) = target.set(attribute, value) {
        report(tag, &error);
    }
    Ok(RecordOutcome::Updated(ElementKind::Character))
}

/// Append four text blobs to four attributes of the current entity.
pub fn multi_text(
    ctx: &mut ParseContext,
    tag: RecordTag,
    kind: ElementKind,
    attributes: [&'static str; 4],
    texts: [String; 4],
) -> Applied {
    let mut target = current(ctx, tag, kind)?;
    for (attribute, text) in attributes.into_iter().zip(texts) {
        if let Err(error) = target.append(attribute, &text) {
            report(tag, &error);
        }
    }
    Ok(RecordOutcome::Updated(kind))
}

/// Append a free-text payload to one attribute of the current entity.
pub fn free_text(
    ctx: &mut ParseContext,
    tag: RecordTag,
    kind: ElementKind,
    attribute: &'static str,
    text: &str,
) -> Applied {
    let mut target = current(ctx, tag, kind)?;
    if let Err(error) = target.append(attribute, text) {
        report(tag, &error);
    }
    Ok(RecordOutcome::Updated(kind))
}
