use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use marine_cli::analysis::AnalysisResult;
use marine_common::format_numeric;
use marine_report::{ColumnInfo, ColumnStatistics, HeadRows, PivotTable};
use marine_transform::{CleaningReport, CoercionStats};

pub fn print_summary(result: &AnalysisResult) {
    let summary = &result.summary;
    println!("Input: {}", result.input.display());
    println!("Records: {}", summary.record_count);
    println!();
    print_head(&summary.head);
    print_schema(&summary.schema);
    print_statistics(&summary.statistics);
    print_cleaning(&summary.cleaning);
    print_pivot(&summary.pivot);
    print_outputs(result);
}

fn print_head(head: &HeadRows) {
    let mut table = Table::new();
    table.set_header(head.columns.iter().map(|c| header_cell(c)));
    apply_table_style(&mut table);
    for row in &head.rows {
        table.add_row(row.iter().map(|value| match value {
            Some(text) => Cell::new(text),
            None => dim_cell("-"),
        }));
    }
    println!("First {} records:", head.rows.len());
    println!("{table}");
}

fn print_schema(schema: &[ColumnInfo]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Non-null"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in schema {
        table.add_row(vec![
            Cell::new(&column.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&column.dtype),
            Cell::new(column.non_null),
        ]);
    }
    println!();
    println!("Schema:");
    println!("{table}");
}

fn print_statistics(statistics: &[ColumnStatistics]) {
    let mut table = Table::new();
    let mut header = vec![header_cell("Statistic")];
    header.extend(statistics.iter().map(|s| header_cell(&s.column)));
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 1..=statistics.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    let count_row =
        std::iter::once(Cell::new("count")).chain(statistics.iter().map(|s| Cell::new(s.count)));
    table.add_row(count_row);
    let rows: [(&str, fn(&ColumnStatistics) -> Option<f64>); 7] = [
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q25),
        ("50%", |s| s.median),
        ("75%", |s| s.q75),
        ("max", |s| s.max),
    ];
    for (label, value) in rows {
        let row = std::iter::once(Cell::new(label))
            .chain(statistics.iter().map(|s| number_cell(value(s))));
        table.add_row(row);
    }
    println!();
    println!("Descriptive statistics:");
    println!("{table}");
}

fn print_cleaning(report: &CleaningReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Loaded"), Cell::new(report.loaded)]);
    table.add_row(vec![
        Cell::new("Columns renamed"),
        dim_cell(report.columns_renamed),
    ]);
    table.add_row(vec![
        Cell::new("Unparseable year"),
        coercion_cell(&report.year_coercion),
    ]);
    table.add_row(vec![
        Cell::new("Unparseable data_value"),
        coercion_cell(&report.data_value_coercion),
    ]);
    table.add_row(vec![
        Cell::new("Dropped incomplete"),
        count_cell(report.dropped_incomplete, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Dropped duplicates"),
        count_cell(report.dropped_duplicates, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Text values normalized"),
        dim_cell(report.text_values_normalized),
    ]);
    table.add_row(vec![
        Cell::new("Dropped non-actual magnitude"),
        count_cell(report.dropped_magnitude, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Retained")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.retained).add_attribute(Attribute::Bold),
    ]);
    println!();
    println!("Cleaning:");
    println!("{table}");
}

fn print_pivot(pivot: &PivotTable) {
    if pivot.is_empty() {
        println!();
        println!("Average data value by category and year: no records");
        return;
    }
    let mut table = Table::new();
    let mut header = vec![header_cell("Category")];
    header.extend(pivot.years.iter().map(|year| header_cell(&year.to_string())));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for idx in 1..=pivot.years.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for (category, row) in pivot.categories.iter().zip(&pivot.cells) {
        let cells = std::iter::once(
            Cell::new(category)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
        )
        .chain(row.iter().map(|cell| number_cell(*cell)));
        table.add_row(cells);
    }
    println!();
    println!("Average data value by category and year:");
    println!("{table}");
}

fn print_outputs(result: &AnalysisResult) {
    let charts = [
        result.charts.trend.as_ref(),
        result.charts.distribution.as_ref(),
        result.charts.heatmap.as_ref(),
    ];
    let written: Vec<_> = charts.into_iter().flatten().collect();
    if !written.is_empty() || result.summary_json.is_some() {
        println!();
    }
    for path in written {
        println!("Chart: {}", path.display());
    }
    if let Some(path) = &result.summary_json {
        println!("Summary JSON: {}", path.display());
    }
    if let Some(error) = &result.chart_error {
        eprintln!("Charts not written: {error}");
    }
}

fn coercion_cell(stats: &CoercionStats) -> Cell {
    count_cell(stats.unparseable, Color::Yellow)
}

fn number_cell(value: Option<f64>) -> Cell {
    match value {
        Some(v) => Cell::new(format_numeric((v * 1e4).round() / 1e4)),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn apply_table_style(table: &mut Table) {
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
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
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
