use blake3::Hasher;
use charges_parser::{parse_with_stats, ParseResult, ParseStats};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct IngestedReport {
    pub hash: String,
    pub result: ParseResult,
    pub stats: ParseStats,
}

impl IngestedReport {
    pub fn is_empty(&self) -> bool {
        self.result.is_empty()
    }
}

/// Parses raw report text and logs what each stage kept or dropped.
pub fn ingest_report(text: &str, include_summaries: bool) -> IngestedReport {
    let hash = compute_hash(text);
    let (result, stats) = parse_with_stats(text, include_summaries);

    debug!(
        hash = %hash,
        lines = stats.lines,
        blank = stats.blank,
        noise = stats.noise,
        unparsed = stats.unparsed,
        extracted = stats.extracted,
        rows = stats.rows,
        include_summaries,
        "Parsed charges report"
    );
    if result.report_date.is_missing() {
        warn!(hash = %hash, "Report has no as-at date stamp");
    }
    if result.is_empty() {
        warn!(hash = %hash, lines = stats.lines, "No rows parsed from report");
    }

    IngestedReport {
        hash,
        result,
        stats,
    }
}

pub fn compute_hash(text: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(text.as_bytes());
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
