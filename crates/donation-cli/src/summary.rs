use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use donation_cli::types::{EnrichResult, InspectResult};
use donation_ingest::DropReason;
use donation_output::{DatasetSummary, GroupTotal};

pub fn print_enrich_summary(result: &EnrichResult) {
    println!("Input: {}", result.input.display());
    if result.output.written {
        println!("Output: {}", result.output.path.display());
    } else {
        println!("Output: {} (dry run, not written)", result.output.path.display());
    }
    println!("SHA-256: {}", result.output.sha256);

    let load = &result.load;
    let calendar = &result.calendar;
    let translation = &result.translation;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Metric"), header_cell("Count")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let reasons = load.counts_by_reason();
    let reason_count = |reason: DropReason| reasons.get(&reason).copied().unwrap_or(0);
    let rows: Vec<(&str, &str, usize, Option<Color>)> = vec![
        ("Load", "rows read", load.total_rows, None),
        ("Load", "retained", load.retained, None),
        ("Load", "invalid amount", reason_count(DropReason::InvalidAmount), Some(Color::Yellow)),
        ("Load", "negative amount", reason_count(DropReason::NegativeAmount), Some(Color::Yellow)),
        (
            "Load",
            "invalid timestamp",
            reason_count(DropReason::InvalidTimestamp),
            Some(Color::Yellow),
        ),
        ("Years", "outside window", result.outside_years, None),
        ("Calendar", "converted", calendar.converted, None),
        ("Calendar", "out of range, flagged", calendar.flagged, Some(Color::Yellow)),
        ("Calendar", "out of range, dropped", calendar.dropped, Some(Color::Yellow)),
        ("Calendar", "conversion failed", calendar.failed, Some(Color::Yellow)),
        ("Calendar", "in Ramadan", calendar.ramadan, None),
        ("Calendar", "on an Islamic event", calendar.events, None),
        ("Translate", "distinct labels", translation.distinct_labels, None),
        ("Translate", "static table", translation.static_hits, None),
        ("Translate", "translated", translation.translated, None),
        ("Translate", "kept source label", translation.failed, Some(Color::Yellow)),
        ("Output", "rows", result.output.rows, None),
    ];
    for (stage, metric, count, highlight) in rows {
        let count = match highlight {
            Some(color) => count_cell(count, color),
            None => Cell::new(count),
        };
        table.add_row(vec![stage_cell(stage), Cell::new(metric), count]);
    }
    println!("{table}");
    print_dataset_tables(&result.dataset);
    println!("Completed in {} ms", result.duration_ms);
}

pub fn print_dataset_summary(result: &InspectResult) {
    println!("Dataset: {}", result.source.display());
    if !result.calendar_features {
        println!("Calendar features unavailable: showing raw data without Hijri dates.");
    }
    println!("Records: {} of {}", result.matched, result.total_records);
    print_dataset_tables(&result.summary);
}

fn print_dataset_tables(summary: &DatasetSummary) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let dates = match (summary.first_date, summary.last_date) {
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => "-".to_string(),
    };
    table.add_row(vec![Cell::new("Donations"), Cell::new(summary.donations)]);
    table.add_row(vec![Cell::new("Total amount"), Cell::new(money(summary.total_amount))]);
    table.add_row(vec![Cell::new("Average donation"), Cell::new(money(summary.average_amount))]);
    table.add_row(vec![Cell::new("Unique donors"), Cell::new(summary.unique_donors)]);
    table.add_row(vec![Cell::new("Categories"), Cell::new(summary.unique_categories)]);
    table.add_row(vec![Cell::new("Date range"), Cell::new(dates)]);
    table.add_row(vec![Cell::new("Ramadan donations"), Cell::new(summary.ramadan_donations)]);
    table.add_row(vec![Cell::new("Ramadan amount"), Cell::new(money(summary.ramadan_amount))]);
    table.add_row(vec![
        Cell::new("Ramadan share"),
        Cell::new(format!("{:.1}%", summary.ramadan_share)),
    ]);
    table.add_row(vec![
        Cell::new("Average in / outside Ramadan"),
        Cell::new(format!(
            "{} / {}",
            money(summary.ramadan_average),
            money(summary.other_average)
        )),
    ]);
    println!("{table}");

    print_group_table("Top categories", "Category", &summary.top_categories);
    print_group_table("Islamic events", "Event", &summary.events);
    print_group_table("Hijri months", "Month", &summary.hijri_months);
}

fn print_group_table(title: &str, label: &str, groups: &[GroupTotal]) {
    if groups.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(label),
        header_cell("Donations"),
        header_cell("Amount"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in groups {
        table.add_row(vec![
            Cell::new(&group.label),
            Cell::new(group.donations),
            Cell::new(money(group.amount)),
        ]);
    }
    println!();
    println!("{title}:");
    println!("{table}");
}

fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn stage_cell(stage: &str) -> Cell {
    Cell::new(stage)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
