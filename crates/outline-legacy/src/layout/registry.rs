//! Version table of fixed-width record layouts.
//!
//! Each entry maps a record tag and an inclusive version range to a
//! layout. Versions whose byte shapes are identical share one entry. Every
//! fixed-layout tag has exactly one open-ended entry, which is also used
//! when no version is active or the active version is newer than the table.
//!
//! Widths are in bytes; `I2` marks a little-endian signed 16-bit field.
//!
//! | Tag | Versions      | Width | Notes                                     |
//! |-----|---------------|-------|-------------------------------------------|
//! | VR  | all           | 7     | `MM.mm` version text                      |
//! | S0  | 00.03-00.07   | 178   | story overview, no device/tense           |
//! | S0  | 00.08+        | 250   | wider title/author, device and tense      |
//! | D0  | 00.03-00.10   | 90    | problem without conflict type             |
//! | D0  | 00.11+        | 130   |                                           |
//! | D3  | 00.03-00.09   | 120   | outcome, method, theme                    |
//! | D3  | 00.10+        | 120   | outcome, method, resolution               |
//! | C2  | 00.03-00.10   | 146   | physical description, age/weight `I2`     |
//! | C2  | 00.11+        | 204   |                                           |
//! | P4  | 00.11+        | 140   | adds the new goal                         |
//! | RR  | 00.09+        | 150   | adds the trait pair                       |

use outline_model::ElementKind;

use super::{FieldSpec, RecordLayout};
use crate::catalog::{RecordRole, classify};
use crate::tag::RecordTag;
use crate::version::{FormatVersion, VersionRange};

/// A registry row.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEntry {
    pub tag: RecordTag,
    pub versions: VersionRange,
    pub layout: RecordLayout,
}

impl LayoutEntry {
    /// Entity kind the tag belongs to.
    pub fn kind(&self) -> Option<ElementKind> {
        classify(self.tag).and_then(RecordRole::kind)
    }
}

const V03: FormatVersion = FormatVersion::new(0, 3);
const V07: FormatVersion = FormatVersion::new(0, 7);
const V08: FormatVersion = FormatVersion::new(0, 8);
const V09: FormatVersion = FormatVersion::new(0, 9);
const V10: FormatVersion = FormatVersion::new(0, 10);
const V11: FormatVersion = FormatVersion::new(0, 11);

const fn closed(first: FormatVersion, last: FormatVersion) -> VersionRange {
    VersionRange::between(first, last)
}

const fn open(first: FormatVersion) -> VersionRange {
    VersionRange::starting(first)
}

const fn entry(tag: &[u8; 2], versions: VersionRange, fields: &'static [FieldSpec]) -> LayoutEntry {
    LayoutEntry {
        tag: RecordTag::new(*tag),
        versions,
        layout: RecordLayout::new(fields),
    }
}

const fn t(name: &'static str, width: usize) -> FieldSpec {
    FieldSpec::text(name, width)
}

const fn i2(name: &'static str) -> FieldSpec {
    FieldSpec::int16(name)
}

// Version
const VERSION: &[FieldSpec] = &[t("version", 7)];

// Story overview
const STORY_OLD: &[FieldSpec] = &[
    t("title", 40),
    t("author", 30),
    t("date_created", 8),
    t("story_type", 20),
    t("genre", 20),
    t("viewpoint", 20),
    t("style", 20),
    t("tone", 20),
];
const STORY: &[FieldSpec] = &[
    t("title", 60),
    t("author", 40),
    t("date_created", 10),
    t("story_type", 20),
    t("genre", 20),
    t("viewpoint", 20),
    t("literary_device", 20),
    t("style", 20),
    t("tense", 20),
    t("tone", 20),
];

// Problem
const PROBLEM_OLD: &[FieldSpec] = &[t("name", 40), t("problem_type", 20), t("subject", 30)];
const PROBLEM: &[FieldSpec] = &[
    t("name", 60),
    t("problem_type", 20),
    t("conflict_type", 20),
    t("subject", 30),
];
const PROTAGONIST_OLD: &[FieldSpec] = &[
    t("protagonist", 30),
    t("protag_goal", 30),
    t("protag_motivation", 30),
    t("protag_conflict", 30),
];
const PROTAGONIST: &[FieldSpec] = &[
    t("protagonist", 40),
    t("protag_goal", 40),
    t("protag_motivation", 40),
    t("protag_conflict", 40),
];
const ANTAGONIST_OLD: &[FieldSpec] = &[
    t("antagonist", 30),
    t("antag_goal", 30),
    t("antag_motivation", 30),
    t("antag_conflict", 30),
];
const ANTAGONIST: &[FieldSpec] = &[
    t("antagonist", 40),
    t("antag_goal", 40),
    t("antag_motivation", 40),
    t("antag_conflict", 40),
];
// Same byte shape in both ranges; the third slot changed meaning in 00.10.
const RESOLUTION_OLD: &[FieldSpec] = &[t("outcome", 40), t("method", 40), t("theme", 40)];
const RESOLUTION: &[FieldSpec] = &[t("outcome", 40), t("method", 40), t("resolution", 40)];
const STRUCTURE: &[FieldSpec] = &[t("story_structure", 30), t("structure_description", 60)];
const CLIMAX_OLD: &[FieldSpec] = &[t("climax", 60)];
const CLIMAX: &[FieldSpec] = &[t("theme", 60), t("climax", 60)];

// Character
const CHARACTER_OLD: &[FieldSpec] = &[t("name", 30)];
const CHARACTER: &[FieldSpec] = &[t("name", 40)];
const ROLE_OLD: &[FieldSpec] = &[t("role", 20), t("archetype", 20)];
const ROLE: &[FieldSpec] = &[t("role", 20), t("story_role", 20), t("archetype", 30)];
const PHYSICAL_OLD: &[FieldSpec] = &[
    i2("age"),
    t("sex", 10),
    t("eyes", 15),
    t("hair", 15),
    i2("weight"),
    t("height", 8),
    t("build", 15),
    t("complexion", 15),
    t("race", 20),
    t("nationality", 24),
    t("health", 20),
];
const PHYSICAL: &[FieldSpec] = &[
    i2("age"),
    t("sex", 10),
    t("eyes", 20),
    t("hair", 20),
    i2("weight"),
    t("height", 10),
    t("build", 20),
    t("complexion", 20),
    t("race", 30),
    t("nationality", 30),
    t("health", 40),
];
const PSYCHE_OLD: &[FieldSpec] = &[
    t("intelligence", 20),
    t("values", 30),
    t("abnormality", 30),
    t("focus", 30),
];
const PSYCHE: &[FieldSpec] = &[
    t("enneagram", 30),
    t("intelligence", 20),
    t("values", 40),
    t("abnormality", 40),
    t("focus", 40),
];
/// Trait records are not copied field-for-field; see the assembler.
pub const TRAIT_NAME: &str = "trait_name";
pub const TRAIT_VALUE: &str = "trait_value";
const TRAIT: &[FieldSpec] = &[t(TRAIT_NAME, 20), t(TRAIT_VALUE, 40)];
const FLAW_OLD: &[FieldSpec] = &[t("flaw", 30)];
const FLAW: &[FieldSpec] = &[t("flaw", 40)];
const IDENTITY: &[FieldSpec] = &[t("nickname", 30), t("motto", 60)];

// Setting
const SETTING_OLD: &[FieldSpec] = &[t("name", 30), t("locale", 30), t("season", 15)];
const SETTING: &[FieldSpec] = &[t("name", 40), t("locale", 40), t("season", 20)];
const ATMOSPHERE: &[FieldSpec] = &[
    t("period", 30),
    t("lighting", 20),
    t("weather", 20),
    t("temperature", 20),
];
const PROPS: &[FieldSpec] = &[t("props", 80)];

// Plot point
const PLOT_POINT_OLD: &[FieldSpec] = &[t("name", 40), t("date", 8), t("time", 8)];
const PLOT_POINT: &[FieldSpec] = &[t("name", 60), t("date", 10), t("time", 10)];
const SCENE: &[FieldSpec] = &[t("viewpoint", 40), t("setting", 40)];
const SCENE_PROTAGONIST: &[FieldSpec] = &[
    t("protagonist", 40),
    t("protag_emotion", 20),
    t("protag_goal", 40),
];
const SCENE_ANTAGONIST: &[FieldSpec] = &[
    t("antagonist", 40),
    t("antag_emotion", 20),
    t("antag_goal", 40),
];
const SCENE_OUTCOME_OLD: &[FieldSpec] = &[t("opposition", 40), t("outcome", 40), t("emotion", 20)];
const SCENE_OUTCOME: &[FieldSpec] = &[
    t("opposition", 40),
    t("outcome", 40),
    t("emotion", 20),
    t("new_goal", 40),
];

// Relationship
const RELATIONSHIP_OLD: &[FieldSpec] = &[t("first", 40), t("second", 40), t("relation_type", 30)];
const RELATIONSHIP: &[FieldSpec] = &[
    t("first", 40),
    t("second", 40),
    t("first_trait", 20),
    t("second_trait", 20),
    t("relation_type", 30),
];

static REGISTRY: &[LayoutEntry] = &[
    entry(b"VR", VersionRange::ALL, VERSION),
    entry(b"S0", closed(V03, V07), STORY_OLD),
    entry(b"S0", open(V08), STORY),
    entry(b"D0", closed(V03, V10), PROBLEM_OLD),
    entry(b"D0", open(V11), PROBLEM),
    entry(b"D1", closed(V03, V07), PROTAGONIST_OLD),
    entry(b"D1", open(V08), PROTAGONIST),
    entry(b"D2", closed(V03, V07), ANTAGONIST_OLD),
    entry(b"D2", open(V08), ANTAGONIST),
    entry(b"D3", closed(V03, V09), RESOLUTION_OLD),
    entry(b"D3", open(V10), RESOLUTION),
    entry(b"D4", VersionRange::ALL, STRUCTURE),
    entry(b"D5", closed(V03, V09), CLIMAX_OLD),
    entry(b"D5", open(V10), CLIMAX),
    entry(b"C0", closed(V03, V10), CHARACTER_OLD),
    entry(b"C0", open(V11), CHARACTER),
    entry(b"C1", closed(V03, V07), ROLE_OLD),
    entry(b"C1", open(V08), ROLE),
    entry(b"C2", closed(V03, V10), PHYSICAL_OLD),
    entry(b"C2", open(V11), PHYSICAL),
    entry(b"C3", closed(V03, V08), PSYCHE_OLD),
    entry(b"C3", open(V09), PSYCHE),
    entry(b"C4", VersionRange::ALL, TRAIT),
    entry(b"C5", closed(V03, V09), FLAW_OLD),
    entry(b"C5", open(V10), FLAW),
    entry(b"C6", VersionRange::ALL, IDENTITY),
    entry(b"L0", closed(V03, V08), SETTING_OLD),
    entry(b"L0", open(V09), SETTING),
    entry(b"L1", VersionRange::ALL, ATMOSPHERE),
    entry(b"L2", VersionRange::ALL, PROPS),
    entry(b"P0", closed(V03, V09), PLOT_POINT_OLD),
    entry(b"P0", open(V10), PLOT_POINT),
    entry(b"P1", VersionRange::ALL, SCENE),
    entry(b"P2", VersionRange::ALL, SCENE_PROTAGONIST),
    entry(b"P3", VersionRange::ALL, SCENE_ANTAGONIST),
    entry(b"P4", closed(V03, V10), SCENE_OUTCOME_OLD),
    entry(b"P4", open(V11), SCENE_OUTCOME),
    entry(b"RR", closed(V03, V08), RELATIONSHIP_OLD),
    entry(b"RR", open(V09), RELATIONSHIP),
];

/// Every registry entry, in table order.
pub fn layouts() -> &'static [LayoutEntry] {
    REGISTRY
}

/// Resolve the layout for `tag` under the active `version`.
///
/// An exact range match wins. Otherwise (no active version, or a version
/// outside every range) the tag's open-ended default layout is used.
/// Returns `None` only for tags with no registered layout.
pub fn lookup(tag: RecordTag, version: Option<FormatVersion>) -> Option<&'static RecordLayout> {
    let mut default = None;
    for entry in REGISTRY.iter().filter(|entry| entry.tag == tag) {
        if let Some(version) = version
            && entry.versions.contains(version)
        {
            return Some(&entry.layout);
        }
        if entry.versions.is_open_ended() {
            default = Some(&entry.layout);
        }
    }
    default
}
