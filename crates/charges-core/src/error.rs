// crates/charges-core/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChargesError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Config parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Report has no recognizable as-at date; it cannot be saved")]
    MissingReportDate,

    #[error("Nothing was parsed from the report; it cannot be saved")]
    NothingParsed,

    #[error("Invalid report key '{0}': expected YYYY-MM-DD")]
    InvalidReportKey(String),

    #[error("No saved report for {0}")]
    ReportNotFound(String),

    #[error("Unknown head code '{0}'")]
    UnknownHead(String),

    #[error("Head code '{0}' is listed more than once")]
    DuplicateHeadCode(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ChargesError>;
