//! Rendering of decoded outlines for the command line.

use std::path::PathBuf;

use outline_cli::render::{render_json, render_trees};
use outline_cli::types::{DecodeReport, StopInfo};
use outline_legacy::{DecodeError, FieldEncoding, RecordTag, decode, lookup};

fn fixed(tag: &[u8; 2], values: &[(&str, &str)]) -> Vec<u8> {
    let layout = lookup(RecordTag::new(*tag), None).expect("fixed layout");
    let mut record = tag.to_vec();
    record.extend_from_slice(&u16::try_from(layout.width()).unwrap().to_le_bytes());
    for field in layout.fields {
        let value = values
            .iter()
            .find(|(name, _)| *name == field.name)
            .map_or("", |(_, value)| *value);
        match field.encoding {
            FieldEncoding::Text => {
                let mut text = value.as_bytes().to_vec();
                text.resize(field.width, b' ');
                record.extend(text);
            }
            FieldEncoding::Int16 => record.extend_from_slice(&0i16.to_le_bytes()),
        }
    }
    record
}

fn ledger() -> Vec<u8> {
    let mut bytes = fixed(b"S0", &[("title", "Ledger")]);
    bytes.extend(fixed(b"C0", &[("name", "Ada")]));
    bytes.extend(fixed(b"P0", &[("name", "Audit")]));
    bytes.extend_from_slice(b"ZZ\x00\x00");
    bytes
}

fn report(bytes: &[u8]) -> DecodeReport {
    DecodeReport {
        file: PathBuf::from("ledger.out"),
        decoded: decode(bytes).expect("stream decodes"),
        stopped: None,
    }
}

#[test]
fn outline_and_narrative_trees() {
    let report = report(&ledger());
    let trees = render_trees(&report.decoded.outline);
    insta::assert_snapshot!(trees);
}

#[test]
fn json_report_carries_model_and_diagnostics() {
    let report = report(&ledger());
    let json: serde_json::Value =
        serde_json::from_str(&render_json(&report).unwrap()).unwrap();

    assert_eq!(json["file"], "ledger.out");
    assert!(json["version"].is_null());
    assert!(json["stopped"].is_null());
    assert_eq!(json["dropped_diagnostics"], 0);
    let diagnostics = json["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0]["tag"], "ZZ");
    assert!(json["outline"]["elements"].is_array());
    assert_eq!(json["outline"]["elements"].as_array().unwrap().len(), 3);
}

#[test]
fn stopped_report_is_an_error() {
    let mut report = report(&ledger());
    assert!(!report.has_errors());
    report.stopped = Some(StopInfo {
        offset: 12,
        error: DecodeError::Cancelled,
    });
    assert!(report.has_errors());
    let json: serde_json::Value =
        serde_json::from_str(&render_json(&report).unwrap()).unwrap();
    assert_eq!(json["stopped"]["offset"], 12);
}
