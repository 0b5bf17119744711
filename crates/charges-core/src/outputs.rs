use std::io::Write;

use charges_parser::{ReportDate, Row};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, CellAlignment, Table};

use crate::error::Result;

pub const COLUMN_HEADERS: [&str; 4] = [
    "Head",
    "For the Month",
    "Upto Previous Month",
    "As On Total",
];

/// Placeholder for an amount the report left blank.
pub const MISSING_AMOUNT: &str = "-";

/// Two decimals with comma thousands grouping, e.g. `-12,345.60`.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

fn display_amount(value: Option<f64>) -> String {
    value
        .map(format_amount)
        .unwrap_or_else(|| MISSING_AMOUNT.to_string())
}

fn csv_amount(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| MISSING_AMOUNT.to_string())
}

/// Writes rows as CSV. Amounts are ungrouped so spreadsheets read them as
/// numbers; blank amounts become `-`.
pub fn write_csv<W: Write>(rows: &[Row], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(COLUMN_HEADERS)?;
    for row in rows {
        csv_writer.write_record([
            row.label.clone(),
            csv_amount(row.month_amount),
            csv_amount(row.prior_total),
            format!("{:.2}", row.as_on_total),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Print view: the report date on top, then a bordered table.
pub fn render_table(report_date: &ReportDate, rows: &[Row]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(COLUMN_HEADERS);

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.label),
            Cell::new(display_amount(row.month_amount)),
            Cell::new(display_amount(row.prior_total)),
            Cell::new(format_amount(row.as_on_total)),
        ]);
    }
    for idx in 1..COLUMN_HEADERS.len() {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    format!("Charges as at {report_date}\n{table}")
}
