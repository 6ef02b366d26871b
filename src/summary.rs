use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use date_prefix::{DirectoryReport, FileOutcome, RunReport};

pub fn print_summary(report: &RunReport) {
    for directory in &report.directories {
        print_directory(directory);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Directory"),
        header_cell(if report.dry_run { "Would rename" } else { "Renamed" }),
        header_cell("Skipped"),
        header_cell("Errors"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for directory in &report.directories {
        table.add_row(vec![
            Cell::new(directory.path.display()),
            count_cell(directory.counts.renamed, Color::Green),
            dim_cell(directory.counts.skipped),
            count_cell(directory.counts.errors, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(report.totals.renamed, Color::Green).add_attribute(Attribute::Bold),
        dim_cell(report.totals.skipped).add_attribute(Attribute::Bold),
        count_cell(report.totals.errors, Color::Red).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if report.dry_run && report.totals.renamed > 0 {
        println!("Dry run: nothing was renamed. Pass --execute to apply.");
    }
}

fn print_directory(directory: &DirectoryReport) {
    println!("{}", directory.path.display());
    if let Some(error) = &directory.error {
        println!("  error: {error}");
    }
    for outcome in &directory.outcomes {
        match outcome {
            FileOutcome::Renamed { from, to, .. } => println!("  {from} -> {to}"),
            FileOutcome::WouldRename { from, to, .. } => println!("  {from} => {to}"),
            FileOutcome::Skipped { name, reason } => println!("  {name} ({reason})"),
            FileOutcome::Failed { error, .. } => println!("  error: {error}"),
        }
    }
    println!();
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
