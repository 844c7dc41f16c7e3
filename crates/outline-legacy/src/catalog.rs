//! The closed catalog of record tags and the role each tag plays.

use outline_model::ElementKind;

use crate::tag::RecordTag;

/// How a record's payload is read and what it does to the parse state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRole {
    /// Sets the active format version.
    Version,
    /// Fixed-layout record that creates a new entity of its kind.
    Start(ElementKind),
    /// Fixed-layout record whose fields are copied onto the current entity.
    Fixed(ElementKind),
    /// Character personality trait, addressed by a trait name in the record.
    Trait,
    /// Four consecutive length-prefixed text blobs, one per attribute.
    MultiText {
        kind: ElementKind,
        attributes: [&'static str; 4],
    },
    /// `header.length` bytes of text appended to one attribute.
    FreeText {
        kind: ElementKind,
        attribute: &'static str,
    },
}

impl RecordRole {
    /// The entity kind the record belongs to (`None` for the version record).
    pub fn kind(self) -> Option<ElementKind> {
        match self {
            Self::Version => None,
            Self::Trait => Some(ElementKind::Character),
            Self::Start(kind)
            | Self::Fixed(kind)
            | Self::MultiText { kind, .. }
            | Self::FreeText { kind, .. } => Some(kind),
        }
    }

    /// Whether the payload width comes from the layout registry.
    pub fn is_fixed_layout(self) -> bool {
        matches!(
            self,
            Self::Version | Self::Start(_) | Self::Fixed(_) | Self::Trait
        )
    }
}

const fn free(kind: ElementKind, attribute: &'static str) -> RecordRole {
    RecordRole::FreeText { kind, attribute }
}

/// Every tag in the catalog, in catalog order.
pub const CATALOG: &[RecordTag] = &[
    RecordTag::new(*b"VR"),
    RecordTag::new(*b"S0"),
    RecordTag::new(*b"SN"),
    RecordTag::new(*b"D0"),
    RecordTag::new(*b"D1"),
    RecordTag::new(*b"D2"),
    RecordTag::new(*b"D3"),
    RecordTag::new(*b"D4"),
    RecordTag::new(*b"D5"),
    RecordTag::new(*b"DP"),
    RecordTag::new(*b"DQ"),
    RecordTag::new(*b"DR"),
    RecordTag::new(*b"C0"),
    RecordTag::new(*b"C1"),
    RecordTag::new(*b"C2"),
    RecordTag::new(*b"C3"),
    RecordTag::new(*b"C4"),
    RecordTag::new(*b"C5"),
    RecordTag::new(*b"C6"),
    RecordTag::new(*b"CR"),
    RecordTag::new(*b"CP"),
    RecordTag::new(*b"CU"),
    RecordTag::new(*b"CS"),
    RecordTag::new(*b"CW"),
    RecordTag::new(*b"CL"),
    RecordTag::new(*b"CH"),
    RecordTag::new(*b"CA"),
    RecordTag::new(*b"C$"),
    RecordTag::new(*b"CE"),
    RecordTag::new(*b"CN"),
    RecordTag::new(*b"CG"),
    RecordTag::new(*b"L0"),
    RecordTag::new(*b"L1"),
    RecordTag::new(*b"L2"),
    RecordTag::new(*b"L3"),
    RecordTag::new(*b"LS"),
    RecordTag::new(*b"LH"),
    RecordTag::new(*b"LT"),
    RecordTag::new(*b"LN"),
    RecordTag::new(*b"P0"),
    RecordTag::new(*b"P1"),
    RecordTag::new(*b"P2"),
    RecordTag::new(*b"P3"),
    RecordTag::new(*b"P4"),
    RecordTag::new(*b"PD"),
    RecordTag::new(*b"PR"),
    RecordTag::new(*b"RR"),
    RecordTag::new(*b"RN"),
];

/// Look up the role of a tag; `None` for tags outside the catalog.
pub fn classify(tag: RecordTag) -> Option<RecordRole> {
    use ElementKind::{Character, Overview, PlotPoint, Problem, Relationship, Setting};

    let role = match &tag.bytes() {
        b"VR" => RecordRole::Version,

        b"S0" => RecordRole::Start(Overview),
        b"SN" => free(Overview, "notes"),

        b"D0" => RecordRole::Start(Problem),
        b"D1" | b"D2" | b"D3" | b"D4" | b"D5" => RecordRole::Fixed(Problem),
        b"DP" => free(Problem, "premise"),
        b"DQ" => free(Problem, "story_question"),
        b"DR" => free(Problem, "review"),

        b"C0" => RecordRole::Start(Character),
        b"C1" | b"C2" | b"C3" | b"C5" | b"C6" => RecordRole::Fixed(Character),
        b"C4" => RecordRole::Trait,
        b"CR" => free(Character, "role_notes"),
        b"CP" => free(Character, "physical_notes"),
        b"CU" => free(Character, "psych_notes"),
        b"CS" => RecordRole::MultiText {
            kind: Character,
            attributes: ["ethnic", "education", "religion", "politics"],
        },
        b"CW" => free(Character, "work"),
        b"CL" => free(Character, "likes"),
        b"CH" => free(Character, "habits"),
        b"CA" => free(Character, "abilities"),
        b"C$" => free(Character, "economic"),
        b"CE" => free(Character, "backstory"),
        b"CN" => free(Character, "notes"),
        b"CG" => free(Character, "growth"),

        b"L0" => RecordRole::Start(Setting),
        b"L1" | b"L2" => RecordRole::Fixed(Setting),
        b"L3" => RecordRole::MultiText {
            kind: Setting,
            attributes: ["sights", "sounds", "touch", "smell_taste"],
        },
        b"LS" => free(Setting, "summary"),
        b"LH" => free(Setting, "history"),
        b"LT" => free(Setting, "tone"),
        b"LN" => free(Setting, "notes"),

        b"P0" => RecordRole::Start(PlotPoint),
        b"P1" | b"P2" | b"P3" | b"P4" => RecordRole::Fixed(PlotPoint),
        b"PD" => free(PlotPoint, "description"),
        b"PR" => free(PlotPoint, "remarks"),

        b"RR" => RecordRole::Start(Relationship),
        b"RN" => free(Relationship, "remarks"),

        _ => return None,
    };
    Some(role)
}
