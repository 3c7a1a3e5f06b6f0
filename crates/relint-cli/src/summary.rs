//! Human-readable run summary rendered with `comfy-table`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use relint_model::{ErrorKind, ErrorReport, FileType};

/// Detail rows shown per file type before eliding the rest.
const MAX_DETAIL_ROWS: usize = 50;

const KIND_COLUMNS: [(ErrorKind, &str); 6] = [
    (ErrorKind::UniqueOriginal, "Unique (baseline)"),
    (ErrorKind::UniqueNew, "Unique (new)"),
    (ErrorKind::Relation, "Relation"),
    (ErrorKind::SecondaryRelation, "Matched sample"),
    (ErrorKind::Surjection, "Surjection"),
    (ErrorKind::WellFormedness, "Deletion list"),
];

pub fn print_summary(report: &ErrorReport) {
    let mut table = Table::new();
    let mut header = vec![header_cell("File")];
    header.extend(KIND_COLUMNS.iter().map(|(_, label)| header_cell(label)));
    header.push(header_cell("Total"));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 1..=KIND_COLUMNS.len() + 1 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for file_type in FileType::ALL {
        let counts = report.counts_by_kind(file_type);
        let total: usize = counts.values().sum();
        let mut row = vec![Cell::new(file_type.file_name())];
        for (kind, _) in KIND_COLUMNS {
            row.push(count_cell(counts.get(&kind).copied().unwrap_or(0)));
        }
        row.push(count_cell(total));
        table.add_row(row);
    }

    let mut totals = vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ];
    for (kind, _) in KIND_COLUMNS {
        let count: usize = FileType::ALL
            .iter()
            .map(|file_type| {
                report
                    .counts_by_kind(*file_type)
                    .get(&kind)
                    .copied()
                    .unwrap_or(0)
            })
            .sum();
        totals.push(count_cell(count).add_attribute(Attribute::Bold));
    }
    totals.push(count_cell(report.total()).add_attribute(Attribute::Bold));
    table.add_row(totals);

    println!("{table}");
    print_error_details(report);
    if report.is_valid() {
        println!("Submission is valid.");
    } else {
        println!("Submission has {} error(s).", report.total());
    }
}

fn print_error_details(report: &ErrorReport) {
    if report.is_valid() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Kind"),
        header_cell("Line"),
        header_cell("Key"),
    ]);
    apply_detail_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    for (file_type, errors) in report.iter() {
        for error in errors.iter().take(MAX_DETAIL_ROWS) {
            let line = error
                .line_number
                .map_or_else(|| "-".to_string(), |line| line.to_string());
            table.add_row(vec![
                Cell::new(file_type.file_name()),
                Cell::new(error.kind),
                Cell::new(line),
                Cell::new(&error.key),
            ]);
        }
        if errors.len() > MAX_DETAIL_ROWS {
            table.add_row(vec![
                Cell::new(file_type.file_name()),
                dim_cell(format!("… and {} more", errors.len() - MAX_DETAIL_ROWS)),
                dim_cell("-"),
                dim_cell("-"),
            ]);
        }
    }
    println!();
    println!("Errors:");
    println!("{table}");
}

fn header_cell(label: impl ToString) -> Cell {
    Cell::new(label.to_string()).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell(value: impl ToString) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_detail_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
