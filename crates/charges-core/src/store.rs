use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use charges_parser::{aggregate, ParseResult, ReportDate, Row};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChargesError, Result};
use crate::ingestion::compute_hash;
use crate::ledger::LedgerEntry;

/// A parsed report as persisted under its ISO date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReport {
    pub report_date: ReportDate,
    pub rows: Vec<Row>,
    #[serde(default)]
    pub manual_entries: Vec<LedgerEntry>,
    pub source_hash: String,
    pub include_summaries: bool,
    pub saved_at: DateTime<Utc>,
}

impl StoredReport {
    /// Wraps a parse result for saving. Undated or empty results are refused
    /// here so that a preview can never be persisted without a key.
    pub fn from_parse(
        result: ParseResult,
        source_text: &str,
        include_summaries: bool,
    ) -> Result<Self> {
        if result.report_date.is_missing() {
            return Err(ChargesError::MissingReportDate);
        }
        if result.rows.is_empty() {
            return Err(ChargesError::NothingParsed);
        }
        validate_key(&result.report_date.iso)?;

        Ok(Self {
            report_date: result.report_date,
            rows: result.rows,
            manual_entries: Vec::new(),
            source_hash: compute_hash(source_text),
            include_summaries,
            saved_at: Utc::now(),
        })
    }

    pub fn key(&self) -> &str {
        &self.report_date.iso
    }

    pub fn add_entry(&mut self, entry: LedgerEntry) {
        self.manual_entries.push(entry);
    }

    /// Parsed rows followed by manual entries, re-aggregated so that an entry
    /// replaces a parsed row carrying the same label.
    pub fn combined_rows(&self, include_summaries: bool) -> Vec<Row> {
        let rows = self
            .rows
            .iter()
            .cloned()
            .chain(self.manual_entries.iter().map(LedgerEntry::to_row))
            .collect();
        aggregate(rows, include_summaries)
    }

    pub fn summary(&self) -> ReportSummary {
        ReportSummary {
            iso: self.report_date.iso.clone(),
            label: self.report_date.label.clone(),
            row_count: self.rows.len(),
            manual_entry_count: self.manual_entries.len(),
            saved_at: self.saved_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub iso: String,
    pub label: String,
    pub row_count: usize,
    pub manual_entry_count: usize,
    pub saved_at: DateTime<Utc>,
}

pub trait ReportStore {
    fn save(&mut self, report: &StoredReport) -> Result<()>;
    fn load(&self, iso: &str) -> Result<Option<StoredReport>>;
    /// Saved reports, newest report date first.
    fn list(&self) -> Result<Vec<ReportSummary>>;
    /// Returns whether a report was removed.
    fn delete(&mut self, iso: &str) -> Result<bool>;

    fn load_required(&self, iso: &str) -> Result<StoredReport> {
        self.load(iso)?
            .ok_or_else(|| ChargesError::ReportNotFound(iso.to_string()))
    }
}

/// Accepts `YYYY-MM-DD` shaped keys; calendar validity is not checked.
pub fn validate_key(iso: &str) -> Result<()> {
    let bytes = iso.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(idx, b)| match idx {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if well_formed {
        Ok(())
    } else {
        Err(ChargesError::InvalidReportKey(iso.to_string()))
    }
}

fn sort_newest_first(summaries: &mut [ReportSummary]) {
    summaries.sort_by(|a, b| b.iso.cmp(&a.iso));
}

/// One pretty-printed JSON document per report under a directory.
#[derive(Debug, Clone)]
pub struct FileReportStore {
    root: PathBuf,
}

impl FileReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn report_path(&self, iso: &str) -> PathBuf {
        self.root.join(format!("{iso}.json"))
    }
}

impl ReportStore for FileReportStore {
    fn save(&mut self, report: &StoredReport) -> Result<()> {
        validate_key(report.key())?;
        fs::create_dir_all(&self.root)?;

        let path = self.report_path(report.key());
        let tmp_path = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(report)?;
        fs::write(&tmp_path, bytes)?;
        if let Err(err) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        tracing::info!(iso = report.key(), path = %path.display(), "Saved report");
        Ok(())
    }

    fn load(&self, iso: &str) -> Result<Option<StoredReport>> {
        validate_key(iso)?;
        match fs::read(self.report_path(iso)) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self) -> Result<Vec<ReportSummary>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if validate_key(stem).is_err() {
                tracing::warn!(path = %path.display(), "Skipping file with unexpected name");
                continue;
            }
            if let Some(report) = self.load(stem)? {
                summaries.push(report.summary());
            }
        }

        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    fn delete(&mut self, iso: &str) -> Result<bool> {
        validate_key(iso)?;
        match fs::remove_file(self.report_path(iso)) {
            Ok(()) => {
                tracing::info!(iso, "Deleted report");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryReportStore {
    reports: BTreeMap<String, StoredReport>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportStore for MemoryReportStore {
    fn save(&mut self, report: &StoredReport) -> Result<()> {
        validate_key(report.key())?;
        self.reports.insert(report.key().to_string(), report.clone());
        Ok(())
    }

    fn load(&self, iso: &str) -> Result<Option<StoredReport>> {
        validate_key(iso)?;
        Ok(self.reports.get(iso).cloned())
    }

    fn list(&self) -> Result<Vec<ReportSummary>> {
        let mut summaries: Vec<ReportSummary> =
            self.reports.values().map(StoredReport::summary).collect();
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    fn delete(&mut self, iso: &str) -> Result<bool> {
        validate_key(iso)?;
        Ok(self.reports.remove(iso).is_some())
    }
}
