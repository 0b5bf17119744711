pub mod aggregate;
pub mod classifier;
pub mod date;
pub mod extract;
pub mod model;
pub mod money;
mod report;

pub use aggregate::{aggregate, is_summary_label, SUMMARY_PHRASES};
pub use classifier::is_noise;
pub use date::extract_report_date;
pub use extract::{
    all_extractors, extract_pair, extract_pair_with, LineExtractor, OneAmountExtractor,
    TwoAmountExtractor,
};
pub use model::{finalize, ExtractedPair, ParseResult, ReportDate, Row};
pub use money::parse_money;
pub use report::{parse, parse_with_stats, ParseStats};
