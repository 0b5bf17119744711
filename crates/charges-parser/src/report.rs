use crate::aggregate::aggregate;
use crate::classifier::{classify_line, LineClass};
use crate::date::extract_report_date;
use crate::extract::extract_pair;
use crate::model::{finalize, ParseResult, ReportDate};

/// Per-stage line counts from a single parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub lines: usize,
    pub blank: usize,
    pub noise: usize,
    pub unparsed: usize,
    pub extracted: usize,
    /// Rows left after filtering and deduplication.
    pub rows: usize,
}

impl ParseStats {
    pub fn dropped(&self) -> usize {
        self.extracted - self.rows
    }
}

/// Parses a charges report into dated, ordered rows.
///
/// Never fails: lines that are noise or carry no usable amount are skipped,
/// and a missing date stamp leaves [`ReportDate::missing`] in the result.
pub fn parse(report_text: &str, include_summaries: bool) -> ParseResult {
    parse_with_stats(report_text, include_summaries).0
}

pub fn parse_with_stats(report_text: &str, include_summaries: bool) -> (ParseResult, ParseStats) {
    let mut stats = ParseStats::default();
    let report_date = extract_report_date(report_text).unwrap_or_else(ReportDate::missing);

    let mut rows = Vec::new();
    for line in report_text.lines() {
        stats.lines += 1;
        match classify_line(line) {
            LineClass::Blank => {
                stats.blank += 1;
                continue;
            }
            LineClass::Noise(_) => {
                stats.noise += 1;
                continue;
            }
            LineClass::PassThrough | LineClass::Content => {}
        }

        match extract_pair(line) {
            Some(pair) => rows.push(finalize(pair)),
            None => stats.unparsed += 1,
        }
    }

    stats.extracted = rows.len();
    let rows = aggregate(rows, include_summaries);
    stats.rows = rows.len();

    (ParseResult { report_date, rows }, stats)
}
