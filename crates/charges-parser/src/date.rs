use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ReportDate;

static AS_AT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bAS\s+AT\s+([A-Z]{3})\s+([0-9]{1,2}),\s*([0-9]{4})\b")
        .expect("valid as-at regex")
});

const MONTHS: [(&str, &str, u32); 12] = [
    ("JAN", "Jan", 1),
    ("FEB", "Feb", 2),
    ("MAR", "Mar", 3),
    ("APR", "Apr", 4),
    ("MAY", "May", 5),
    ("JUN", "Jun", 6),
    ("JUL", "Jul", 7),
    ("AUG", "Aug", 8),
    ("SEP", "Sep", 9),
    ("OCT", "Oct", 10),
    ("NOV", "Nov", 11),
    ("DEC", "Dec", 12),
];

fn lookup_month(abbrev: &str) -> Option<(&'static str, u32)> {
    let upper = abbrev.to_ascii_uppercase();
    MONTHS
        .iter()
        .find(|(key, _, _)| *key == upper)
        .map(|(_, title, number)| (*title, *number))
}

/// Finds the first `AS AT <Mon> <d>, <yyyy>` stamp anywhere in the report.
pub fn extract_report_date(full_text: &str) -> Option<ReportDate> {
    let caps = AS_AT_RE.captures(full_text)?;
    let (title, month) = lookup_month(&caps[1])?;
    let day: u32 = caps[2].parse().ok()?;
    let year = &caps[3];

    Some(ReportDate::new(
        format!("{year}-{month:02}-{day:02}"),
        format!("{title} {day}, {year}"),
    ))
}
