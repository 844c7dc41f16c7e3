use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use outline_legacy::{DecodeOptions, LegacyError, layouts, read_outline_with_options};

use crate::cli::{DecodeArgs, RecordsArgs};
use crate::summary::{apply_table_style, header_cell};
use outline_cli::types::{DecodeReport, StopInfo};

pub fn run_decode(args: &DecodeArgs) -> Result<DecodeReport> {
    let mut options = DecodeOptions::new();
    if args.strict {
        options = options.strict();
    }
    if let Some(max) = args.max_diagnostics {
        options = options.with_max_diagnostics(max);
    }
    read_report(&args.file, options)
}

pub fn run_records(args: &RecordsArgs) -> Result<DecodeReport> {
    read_report(&args.file, DecodeOptions::new().with_trace())
}

pub fn run_layouts() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Tag"),
        header_cell("Versions"),
        header_cell("Width"),
        header_cell("Fields"),
    ]);
    apply_table_style(&mut table);
    for entry in layouts() {
        let fields = entry
            .layout
            .fields
            .iter()
            .map(|field| format!("{} ({})", field.name, field.width))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            entry.tag.to_string(),
            entry.versions.to_string(),
            entry.layout.width().to_string(),
            fields,
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Decode a file, keeping partial results when the pass stops early.
fn read_report(file: &std::path::Path, options: DecodeOptions) -> Result<DecodeReport> {
    let span = info_span!("outline_file", file = %file.display());
    let _guard = span.enter();
    match read_outline_with_options(file, options) {
        Ok(decoded) => Ok(DecodeReport {
            file: file.to_path_buf(),
            decoded,
            stopped: None,
        }),
        Err(LegacyError::Decode(partial)) => {
            let partial = *partial;
            Ok(DecodeReport {
                file: file.to_path_buf(),
                decoded: *partial.partial,
                stopped: Some(StopInfo {
                    offset: partial.offset,
                    error: partial.error,
                }),
            })
        }
        Err(error) => Err(error).with_context(|| format!("read {}", file.display())),
    }
}
