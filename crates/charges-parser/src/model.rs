use std::fmt;

use serde::{Deserialize, Serialize};

/// Label shown when the report text carries no recognizable as-at stamp.
pub const MISSING_DATE_LABEL: &str = "Date not found";

/// A label with up to two trailing amounts, as pulled off a single line.
///
/// `label` is never empty and at least one amount is present; extractors
/// return `None` instead of building a pair that breaks either rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPair {
    pub label: String,
    pub primary_amount: Option<f64>,
    pub secondary_amount: Option<f64>,
}

impl ExtractedPair {
    pub fn new(
        label: impl Into<String>,
        primary_amount: Option<f64>,
        secondary_amount: Option<f64>,
    ) -> Self {
        Self {
            label: label.into(),
            primary_amount,
            secondary_amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub label: String,
    pub month_amount: Option<f64>,
    pub prior_total: Option<f64>,
    pub as_on_total: f64,
}

impl Row {
    pub fn new(
        label: impl Into<String>,
        month_amount: Option<f64>,
        prior_total: Option<f64>,
    ) -> Self {
        Self {
            label: label.into(),
            month_amount,
            prior_total,
            as_on_total: month_amount.unwrap_or(0.0) + prior_total.unwrap_or(0.0),
        }
    }
}

impl From<ExtractedPair> for Row {
    fn from(pair: ExtractedPair) -> Self {
        finalize(pair)
    }
}

/// Turns an extracted pair into a row, deriving the as-on total.
pub fn finalize(pair: ExtractedPair) -> Row {
    Row::new(pair.label, pair.primary_amount, pair.secondary_amount)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDate {
    /// `YYYY-MM-DD`, or empty when the text had no date stamp.
    pub iso: String,
    pub label: String,
}

impl ReportDate {
    pub fn new(iso: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            iso: iso.into(),
            label: label.into(),
        }
    }

    pub fn missing() -> Self {
        Self {
            iso: String::new(),
            label: MISSING_DATE_LABEL.to_string(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.iso.is_empty()
    }
}

impl Default for ReportDate {
    fn default() -> Self {
        Self::missing()
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub report_date: ReportDate,
    pub rows: Vec<Row>,
}

impl ParseResult {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
