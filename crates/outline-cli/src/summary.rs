use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use outline_legacy::{RecordOutcome, RecordTrace};
use outline_model::ElementKind;

use outline_cli::types::DecodeReport;

pub fn print_summary(report: &DecodeReport) {
    let decoded = &report.decoded;
    println!("File: {}", report.file.display());
    match decoded.version {
        Some(version) => println!("Format version: {version}"),
        None => println!("Format version: current (no supported version record)"),
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Element"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let mut total = 0usize;
    for kind in ElementKind::ALL {
        let count = decoded.outline.count(kind);
        total += count;
        table.add_row(vec![Cell::new(kind.label()), count_cell(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_diagnostics(report);
    print_stop(report);
}

fn print_diagnostics(report: &DecodeReport) {
    let decoded = &report.decoded;
    if decoded.diagnostics.is_empty() && decoded.dropped_diagnostics == 0 {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Offset"),
        header_cell("Tag"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for diagnostic in &decoded.diagnostics {
        let tag = diagnostic
            .tag
            .map_or_else(|| dim_cell("-"), |tag| Cell::new(tag).fg(Color::Blue));
        table.add_row(vec![
            Cell::new(diagnostic.offset),
            tag,
            Cell::new(&diagnostic.error).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
    if decoded.dropped_diagnostics > 0 {
        println!(
            "{} further diagnostics not shown",
            decoded.dropped_diagnostics
        );
    }
}

pub fn print_stop(report: &DecodeReport) {
    if let Some(stop) = &report.stopped {
        eprintln!("error: decoding stopped at offset {}: {}", stop.offset, stop.error);
        eprintln!("Results above are partial.");
    }
}

pub fn print_records(report: &DecodeReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Offset"),
        header_cell("Tag"),
        header_cell("Declared"),
        header_cell("Consumed"),
        header_cell("Outcome"),
    ]);
    apply_table_style(&mut table);
    for column in 0..4 {
        let alignment = if column == 1 {
            CellAlignment::Center
        } else {
            CellAlignment::Right
        };
        align_column(&mut table, column, alignment);
    }
    for record in &report.decoded.trace {
        table.add_row(record_row(record));
    }
    println!("{table}");
    print_diagnostics(report);
    print_stop(report);
}

fn record_row(record: &RecordTrace) -> Vec<Cell> {
    let outcome = match record.outcome {
        RecordOutcome::Skipped => Cell::new(record.outcome).fg(Color::Yellow),
        RecordOutcome::Version(_) => Cell::new(record.outcome).fg(Color::Cyan),
        RecordOutcome::Created(_) => Cell::new(record.outcome).fg(Color::Green),
        RecordOutcome::Updated(_) => Cell::new(record.outcome),
    };
    let consumed = if record.consumed == usize::from(record.declared_length) {
        Cell::new(record.consumed)
    } else {
        Cell::new(record.consumed).fg(Color::Magenta)
    };
    vec![
        Cell::new(record.offset),
        Cell::new(record.tag).fg(Color::Blue),
        Cell::new(record.declared_length),
        consumed,
        outcome,
    ]
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
