//! End-to-end decoding of synthetic legacy record streams.

mod common;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use common::{OutlineWriter, multi_payload, padded};
use outline_legacy::{
    DecodeError, DecodeOptions, Decoded, FormatVersion, RecordOutcome, RecordTag, decode,
    decode_with_options,
};
use outline_model::{ElementId, ElementKind, NodeKind, OutlineNode, StoryElement, StoryOutline};

const VR_RECORD: usize = 4 + 7;

fn decoded(bytes: &[u8]) -> Decoded {
    decode(bytes).expect("stream decodes to the end")
}

fn traced(bytes: &[u8]) -> Decoded {
    decode_with_options(bytes, &DecodeOptions::new().with_trace()).expect("stream decodes")
}

fn only(outline: &StoryOutline, kind: ElementKind) -> &StoryElement {
    let mut matches = outline.elements_of(kind);
    let (_, element) = matches.next().expect("one element of the kind");
    assert!(matches.next().is_none(), "more than one {kind}");
    element
}

fn folder<'a>(outline: &'a StoryOutline, name: &str) -> Vec<&'a OutlineNode> {
    let forest = &outline.outline;
    let root = forest.roots()[0];
    let folder = forest
        .children(root)
        .find(|node| node.name == name)
        .expect("folder exists");
    forest.children(folder.id).collect()
}

#[test]
fn problem_start_under_versioned_layout() {
    let bytes = OutlineWriter::new()
        .version("00.12")
        .fixed(b"D0", &[("name", "Stolen Inheritance")])
        .finish();
    assert_eq!(bytes.len(), VR_RECORD + 4 + 130);

    let decoded = traced(&bytes);
    assert!(decoded.diagnostics.is_empty());
    assert_eq!(decoded.version, Some(FormatVersion::new(0, 12)));

    let problem = only(&decoded.outline, ElementKind::Problem);
    assert_eq!(problem.name(), "Stolen Inheritance");
    let problems = folder(&decoded.outline, "Problems");
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].name, "Stolen Inheritance");
    assert_eq!(problems[0].kind, NodeKind::Problem);

    let outcomes: Vec<_> = decoded.trace.iter().map(|t| t.outcome).collect();
    assert_eq!(
        outcomes,
        [
            RecordOutcome::Version(Some(FormatVersion::new(0, 12))),
            RecordOutcome::Created(ElementKind::Problem)
        ]
    );
    assert_eq!(decoded.trace[1].consumed, 130);
}

#[test]
fn continuation_before_start_is_reported_not_fatal() {
    let bytes = OutlineWriter::new()
        .version("00.12")
        .fixed(b"C1", &[("role", "Protagonist")])
        .text(b"CN", "orphaned note")
        .finish();

    let decoded = decoded(&bytes);
    assert_eq!(decoded.outline.count(ElementKind::Character), 0);
    assert_eq!(decoded.diagnostics.len(), 2);
    assert_eq!(
        decoded.diagnostics[0].error,
        DecodeError::ContinuationWithoutCurrentEntity {
            tag: RecordTag::new(*b"C1"),
            kind: ElementKind::Character,
        }
    );
    assert_eq!(decoded.diagnostics[0].offset, VR_RECORD);
    assert!(folder(&decoded.outline, "Characters").is_empty());
}

#[test]
fn orphaned_payload_is_consumed() {
    let bytes = OutlineWriter::new()
        .fixed(b"C2", &[("age", "30"), ("sex", "Male")])
        .fixed(b"C0", &[("name", "Ada")])
        .fixed(b"C2", &[("age", "41")])
        .finish();

    let decoded = decoded(&bytes);
    assert_eq!(decoded.diagnostics.len(), 1);
    let ada = only(&decoded.outline, ElementKind::Character);
    assert_eq!(ada.name(), "Ada");
    assert_eq!(ada.attribute("age"), Some("41"));
    assert_eq!(ada.attribute("sex"), Some(""));
}

#[test]
fn unknown_tag_skips_declared_length() {
    let writer = OutlineWriter::new()
        .version("00.12")
        .fixed(b"D0", &[("name", "Debt")]);
    let zz_offset = writer.offset();
    let bytes = writer
        .record(b"ZZ", &[0xAB; 12])
        .fixed(b"C0", &[("name", "Ada")])
        .finish();

    let decoded = traced(&bytes);
    assert_eq!(decoded.diagnostics.len(), 1);
    let diagnostic = &decoded.diagnostics[0];
    assert_eq!(diagnostic.offset, zz_offset);
    assert_eq!(diagnostic.tag, Some(RecordTag::new(*b"ZZ")));
    assert_eq!(
        diagnostic.error,
        DecodeError::UnknownRecordTag {
            tag: RecordTag::new(*b"ZZ"),
            length: 12,
        }
    );

    let skipped = &decoded.trace[2];
    assert_eq!(skipped.offset, zz_offset);
    assert_eq!(skipped.consumed, 12);
    assert_eq!(skipped.outcome, RecordOutcome::Skipped);
    assert_eq!(decoded.trace[3].offset, zz_offset + 4 + 12);
    assert_eq!(only(&decoded.outline, ElementKind::Character).name(), "Ada");
}

#[test]
fn physical_description_fields_survive_every_version() {
    let values = [
        ("age", "42"),
        ("sex", "Female"),
        ("eyes", "Green"),
        ("hair", "Red"),
        ("weight", "130"),
        ("height", "5'6"),
        ("build", "Slim"),
        ("complexion", "Pale"),
        ("race", "Celtic"),
        ("nationality", "Irish"),
        ("health", "Good"),
    ];
    for version in FormatVersion::known() {
        let bytes = OutlineWriter::new()
            .version(&version.to_string())
            .fixed(b"C0", &[("name", "Maeve")])
            .fixed(b"C2", &values)
            .finish();
        let decoded = decoded(&bytes);
        assert!(decoded.diagnostics.is_empty(), "{version}");
        let maeve = only(&decoded.outline, ElementKind::Character);
        for (name, value) in values {
            assert_eq!(maeve.attribute(name), Some(value), "{name} at {version}");
        }
    }
}

#[test]
fn hand_laid_physical_description_at_version_six() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&42i16.to_le_bytes());
    payload.extend(padded("Female", 10));
    payload.extend(padded("Green", 15));
    payload.extend(padded("Red", 15));
    payload.extend_from_slice(&0i16.to_le_bytes());
    payload.extend(padded("5'6", 8));
    payload.extend(padded("Slim", 15));
    payload.extend(padded("Pale", 15));
    payload.extend(padded("Celtic", 20));
    payload.extend(padded("Irish", 24));
    payload.extend(padded("Good", 20));
    assert_eq!(payload.len(), 146);

    let bytes = OutlineWriter::new()
        .version("00.06")
        .record(b"C0", &padded("Maeve", 30))
        .record(b"C2", &payload)
        .finish();
    let decoded = decoded(&bytes);
    let maeve = only(&decoded.outline, ElementKind::Character);
    assert_eq!(maeve.attribute("age"), Some("42"));
    assert_eq!(maeve.attribute("weight"), Some(""));
    assert_eq!(maeve.attribute("nationality"), Some("Irish"));
    assert_eq!(maeve.attribute("health"), Some("Good"));
}

#[test]
fn blank_fields_decode_empty() {
    let bytes = OutlineWriter::new()
        .record(b"C0", &[0; 40])
        .fixed(b"C2", &[("age", "0"), ("eyes", "")])
        .finish();
    let decoded = decoded(&bytes);
    let character = only(&decoded.outline, ElementKind::Character);
    assert_eq!(character.name(), "");
    assert_eq!(character.attribute("age"), Some(""));
    assert_eq!(character.attribute("eyes"), Some(""));
    assert_eq!(folder(&decoded.outline, "Characters")[0].name, "New Character");
}

#[test]
fn version_record_applies_to_later_records_only() {
    let bytes = OutlineWriter::new()
        .fixed(b"D0", &[("name", "Before"), ("conflict_type", "Internal")])
        .version("00.06")
        .fixed(b"D0", &[("name", "After")])
        .finish();

    let decoded = traced(&bytes);
    assert!(decoded.diagnostics.is_empty());
    assert_eq!(decoded.version, Some(FormatVersion::new(0, 6)));
    let consumed: Vec<_> = decoded.trace.iter().map(|t| t.consumed).collect();
    assert_eq!(consumed, [130, 7, 90]);

    let problems: Vec<_> = decoded
        .outline
        .elements_of(ElementKind::Problem)
        .map(|(_, p)| (p.name(), p.attribute("conflict_type")))
        .collect();
    assert_eq!(
        problems,
        [("Before", Some("Internal")), ("After", Some(""))]
    );
}

#[test]
fn unsupported_version_falls_back_to_newest_layouts() {
    for text in ["07.99", "00.01", "v12"] {
        let bytes = OutlineWriter::new()
            .version(text)
            .fixed(b"D0", &[("name", "Debt")])
            .finish();
        let decoded = traced(&bytes);
        assert_eq!(decoded.version, None, "{text}");
        assert_eq!(
            decoded.diagnostics[0].error,
            DecodeError::UnsupportedFormatVersion {
                version: text.to_string()
            }
        );
        assert_eq!(decoded.trace[0].outcome, RecordOutcome::Version(None));
        assert_eq!(decoded.trace[1].consumed, 130);
        assert_eq!(only(&decoded.outline, ElementKind::Problem).name(), "Debt");
    }
}

#[test]
fn free_text_appends_and_decodes_ansi() {
    let bytes = OutlineWriter::new()
        .fixed(b"P0", &[("name", "Opening")])
        .record(b"PD", b"Caf\xe9 at dawn  ")
        .text(b"PD", "Rain starts")
        .finish();
    let decoded = decoded(&bytes);
    let scene = only(&decoded.outline, ElementKind::PlotPoint);
    assert_eq!(
        scene.attribute("description"),
        Some("Caf\u{e9} at dawn\nRain starts")
    );
}

#[test]
fn multi_text_ignores_header_length() {
    let bytes = OutlineWriter::new()
        .fixed(b"C0", &[("name", "Ada")])
        .header(b"CS", 0)
        .bytes(&multi_payload(["Basque", "Doctorate", "", "Green"]))
        .fixed(b"L0", &[("name", "Harbor")])
        .multi(b"L3", ["Gulls", "Horns", "Wet rope", "Salt"])
        .finish();
    let decoded = decoded(&bytes);
    assert!(decoded.diagnostics.is_empty());

    let ada = only(&decoded.outline, ElementKind::Character);
    assert_eq!(ada.attribute("ethnic"), Some("Basque"));
    assert_eq!(ada.attribute("education"), Some("Doctorate"));
    assert_eq!(ada.attribute("religion"), Some(""));
    assert_eq!(ada.attribute("politics"), Some("Green"));
    let harbor = only(&decoded.outline, ElementKind::Setting);
    assert_eq!(harbor.attribute("smell_taste"), Some("Salt"));
}

#[test]
fn personality_traits_by_name() {
    let bytes = OutlineWriter::new()
        .fixed(b"C0", &[("name", "Ada")])
        .fixed(
            b"C4",
            &[("trait_name", "Adventureousness"), ("trait_value", "High")],
        )
        .fixed(
            b"C4",
            &[("trait_name", " SOCIABILITY"), ("trait_value", "Low")],
        )
        .fixed(b"C4", &[("trait_name", "Zeal"), ("trait_value", "Some")])
        .finish();
    let decoded = decoded(&bytes);
    let ada = only(&decoded.outline, ElementKind::Character);
    assert_eq!(ada.attribute("adventurousness"), Some("High"));
    assert_eq!(ada.attribute("sociability"), Some("Low"));
    assert_eq!(decoded.diagnostics.len(), 1);
    assert_eq!(
        decoded.diagnostics[0].error,
        DecodeError::UnknownTrait {
            name: "Zeal".to_string()
        }
    );
}

#[test]
fn relationships_link_characters_and_stay_out_of_trees() {
    let bytes = OutlineWriter::new()
        .version("00.10")
        .fixed(b"C0", &[("name", "Ada")])
        .fixed(b"C0", &[("name", "Brim")])
        .fixed(
            b"RR",
            &[
                ("first", "Ada"),
                ("second", "Brim"),
                ("first_trait", "Trusting"),
                ("second_trait", "Jealous"),
                ("relation_type", "Siblings"),
            ],
        )
        .text(b"RN", "Estranged since the fire.")
        .finish();
    let decoded = decoded(&bytes);
    assert!(decoded.diagnostics.is_empty());

    let outline = &decoded.outline;
    assert_eq!(outline.relationships.len(), 1);
    let relationship = &outline.relationships[0];
    assert_eq!(relationship.first.element, Some(ElementId::new(0)));
    assert_eq!(relationship.second.element, Some(ElementId::new(1)));
    assert_eq!(relationship.traits(), Some(("Trusting", "Jealous")));
    assert_eq!(relationship.relation_type, "Siblings");
    assert_eq!(relationship.remarks, "Estranged since the fire.");
    assert_eq!(outline.elements.len(), 2);
    assert!(
        outline
            .outline
            .nodes()
            .iter()
            .chain(outline.narrative.nodes())
            .all(|node| node.element.is_none_or(|id| id.index() < 2))
    );
}

#[test]
fn narrative_view_references_outline_plot_points() {
    let bytes = OutlineWriter::new()
        .fixed(b"S0", &[("title", "The Long Tide")])
        .fixed(b"P0", &[("name", "Arrival")])
        .fixed(b"C0", &[("name", "Ada")])
        .fixed(b"P0", &[("name", "Storm")])
        .fixed(b"P1", &[("viewpoint", "Ada")])
        .finish();
    let decoded = decoded(&bytes);
    let outline = &decoded.outline;

    let leaves: Vec<_> = folder(outline, "Plot Points")
        .iter()
        .map(|node| node.element)
        .collect();
    let narrative_root = outline.narrative.roots()[0];
    let scenes: Vec<_> = outline
        .narrative
        .children(narrative_root)
        .map(|node| node.element)
        .collect();
    assert_eq!(scenes, leaves);
    assert_eq!(scenes, [Some(ElementId::new(1)), Some(ElementId::new(3))]);

    let storm = outline.element(ElementId::new(3)).unwrap();
    assert_eq!(storm.attribute("viewpoint"), Some("Ada"));

    let root = outline.outline.node(outline.outline.roots()[0]).unwrap();
    assert_eq!(root.name, "The Long Tide");
    assert_eq!(root.element, Some(ElementId::new(0)));
}

#[test]
fn both_forests_end_with_empty_trash() {
    let bytes = OutlineWriter::new()
        .version("00.13")
        .fixed(b"S0", &[("title", "Ledger")])
        .fixed(b"D0", &[("name", "Debt")])
        .fixed(b"C0", &[("name", "Ada")])
        .fixed(b"L0", &[("name", "Bank")])
        .fixed(b"P0", &[("name", "Audit")])
        .finish();
    let decoded = decoded(&bytes);
    for forest in [&decoded.outline.outline, &decoded.outline.narrative] {
        assert_eq!(forest.roots().len(), 2);
        let trash = forest.node(forest.roots()[1]).unwrap();
        assert_eq!(trash.kind, NodeKind::Trash);
        assert!(trash.children.is_empty());
    }
    for name in ["Problems", "Characters", "Settings", "Plot Points"] {
        assert_eq!(folder(&decoded.outline, name).len(), 1, "{name}");
    }
}

#[test]
fn truncated_payload_returns_partial_outline() {
    let writer = OutlineWriter::new().fixed(b"D0", &[("name", "Debt")]);
    let cut = writer.offset();
    let bytes = writer.header(b"C0", 40).bytes(&padded("Ad", 10)).finish();

    let err = decode(&bytes).unwrap_err();
    assert_eq!(err.offset, cut);
    assert_eq!(err.error, DecodeError::truncated(cut + 4, 40, 10));
    assert_eq!(err.partial.outline.count(ElementKind::Problem), 1);
    assert_eq!(err.partial.outline.count(ElementKind::Character), 0);
    assert_eq!(err.partial.outline.outline.roots().len(), 2);
}

#[test]
fn truncated_header_is_fatal() {
    let bytes = OutlineWriter::new()
        .fixed(b"D0", &[("name", "Debt")])
        .bytes(b"C0\x28")
        .finish();
    let err = decode(&bytes).unwrap_err();
    assert!(matches!(
        err.error,
        DecodeError::TruncatedStream {
            needed: 4,
            remaining: 3,
            ..
        }
    ));
}

#[test]
fn strict_mode_stops_at_first_diagnostic() {
    let writer = OutlineWriter::new().fixed(b"D0", &[("name", "Debt")]);
    let zz_offset = writer.offset();
    let bytes = writer
        .record(b"ZZ", &[])
        .fixed(b"C0", &[("name", "Ada")])
        .finish();

    assert!(decode(&bytes).is_ok());
    let err = decode_with_options(&bytes, &DecodeOptions::new().strict()).unwrap_err();
    assert_eq!(err.offset, zz_offset);
    assert!(matches!(err.error, DecodeError::UnknownRecordTag { length: 0, .. }));
    assert_eq!(err.partial.outline.count(ElementKind::Problem), 1);
    assert_eq!(err.partial.outline.count(ElementKind::Character), 0);
}

#[test]
fn diagnostics_cap_counts_the_rest() {
    let bytes = OutlineWriter::new()
        .record(b"Z1", &[])
        .record(b"Z2", &[1, 2])
        .record(b"Z3", &[3])
        .finish();
    let decoded = decode_with_options(&bytes, &DecodeOptions::new().with_max_diagnostics(1)).unwrap();
    assert_eq!(decoded.diagnostics.len(), 1);
    assert_eq!(decoded.dropped_diagnostics, 2);
    assert_eq!(decoded.diagnostic_count(), 3);
}

#[test]
fn raised_cancel_flag_stops_before_first_record() {
    let bytes = OutlineWriter::new()
        .fixed(b"D0", &[("name", "Debt")])
        .finish();
    let flag = Arc::new(AtomicBool::new(true));
    let err = decode_with_options(&bytes, &DecodeOptions::new().with_cancel_flag(flag))
        .unwrap_err();
    assert_eq!(err.error, DecodeError::Cancelled);
    assert_eq!(err.offset, 0);
    assert!(err.partial.outline.elements.is_empty());
}

#[test]
fn empty_buffer_is_an_empty_outline() {
    let decoded = decoded(&[]);
    assert_eq!(decoded.version, None);
    assert!(decoded.outline.elements.is_empty());
    assert_eq!(decoded.outline.outline.roots().len(), 2);
    assert_eq!(decoded.outline.narrative.roots().len(), 2);
}
