use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::model::Row;

/// Running-total phrases, in the order summary rows are presented.
pub const SUMMARY_PHRASES: [&str; 3] = [
    "TOTAL CHARGES FOR THE MONTH",
    "TOTAL CHARGES UPTO PREVIOUS MONTH",
    "BALANCE AS PER GENERAL LEDGER",
];

const EXCLUDED_PREFIXES: [&str; 2] = ["TOTAL CHARGES", "BALANCE AS PER"];
const EXCLUDED_EXACT: &str = "MISCELLANEOUS";

fn summary_rank(label: &str) -> Option<usize> {
    let upper = label.to_uppercase();
    SUMMARY_PHRASES
        .iter()
        .position(|phrase| upper.contains(phrase))
}

pub fn is_summary_label(label: &str) -> bool {
    summary_rank(label).is_some()
}

fn is_excluded_head(label: &str) -> bool {
    let upper = label.to_uppercase();
    upper == EXCLUDED_EXACT
        || EXCLUDED_PREFIXES
            .iter()
            .any(|prefix| upper.starts_with(prefix))
}

fn by_month_amount_desc(a: &Row, b: &Row) -> Ordering {
    match (a.month_amount, b.month_amount) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filters, deduplicates and orders finalized rows for presentation.
///
/// With `include_summaries` off, rows headed `TOTAL CHARGES...`,
/// `BALANCE AS PER...` or exactly `MISCELLANEOUS` are dropped first. A label
/// seen more than once keeps its last row, sitting at the position where the
/// label first appeared. Data rows come first, largest month amount first
/// with missing amounts last; summary rows follow in [`SUMMARY_PHRASES`]
/// order. Both sorts are stable.
pub fn aggregate(rows: Vec<Row>, include_summaries: bool) -> Vec<Row> {
    let mut by_label: IndexMap<String, Row> = IndexMap::with_capacity(rows.len());
    for row in rows {
        if !include_summaries && is_excluded_head(&row.label) {
            continue;
        }
        by_label.insert(row.label.clone(), row);
    }

    let (mut summaries, mut data): (Vec<Row>, Vec<Row>) = by_label
        .into_values()
        .partition(|row| is_summary_label(&row.label));

    data.sort_by(by_month_amount_desc);
    // Every row here matched a phrase; an unmatched rank would sort last.
    summaries.sort_by_key(|row| summary_rank(&row.label).unwrap_or(SUMMARY_PHRASES.len()));

    data.extend(summaries);
    data
}
