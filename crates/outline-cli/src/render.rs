//! Plain-text and JSON renderings of a decoded outline.

use std::fmt::Write;

use outline_legacy::Diagnostic;
use outline_model::{Forest, NodeKind, StoryOutline};
use serde::Serialize;

use crate::types::DecodeReport;

/// Indented listing of one forest, two spaces per level.
///
/// Nodes that present an element carry its id so the two forests can be
/// compared by eye.
pub fn render_forest(forest: &Forest) -> String {
    let mut out = String::new();
    for (depth, node) in forest.walk() {
        let indent = "  ".repeat(depth);
        let marker = match node.kind {
            NodeKind::Trash => " [trash]",
            NodeKind::Folder => "/",
            _ => "",
        };
        let _ = match node.element {
            Some(element) => writeln!(out, "{indent}{}{marker} ({element})", node.name),
            None => writeln!(out, "{indent}{}{marker}", node.name),
        };
    }
    out
}

/// Both forests, outline first.
pub fn render_trees(outline: &StoryOutline) -> String {
    format!(
        "{}\n{}",
        render_forest(&outline.outline),
        render_forest(&outline.narrative)
    )
}

#[derive(Debug, Serialize)]
pub struct DiagnosticView {
    pub offset: usize,
    pub tag: Option<String>,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticView {
    fn from(diagnostic: &Diagnostic) -> Self {
        Self {
            offset: diagnostic.offset,
            tag: diagnostic.tag.map(|tag| tag.to_string()),
            message: diagnostic.error.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StopView {
    pub offset: usize,
    pub message: String,
}

/// JSON document for `decode --format json`.
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub file: String,
    pub version: Option<String>,
    pub outline: &'a StoryOutline,
    pub diagnostics: Vec<DiagnosticView>,
    pub dropped_diagnostics: usize,
    pub stopped: Option<StopView>,
}

impl<'a> From<&'a DecodeReport> for ReportView<'a> {
    fn from(report: &'a DecodeReport) -> Self {
        let decoded = &report.decoded;
        Self {
            file: report.file.display().to_string(),
            version: decoded.version.map(|version| version.to_string()),
            outline: &decoded.outline,
            diagnostics: decoded.diagnostics.iter().map(DiagnosticView::from).collect(),
            dropped_diagnostics: decoded.dropped_diagnostics,
            stopped: report.stopped.as_ref().map(|stop| StopView {
                offset: stop.offset,
                message: stop.error.to_string(),
            }),
        }
    }
}

/// Pretty-printed JSON for a decode report.
pub fn render_json(report: &DecodeReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ReportView::from(report))
}
