use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use charges_core::heads::HeadTable;
use charges_core::ingestion::ingest_report;
use charges_core::ledger::LedgerEntry;
use charges_core::outputs::{render_table, write_csv};
use charges_core::store::{ReportStore, StoredReport};
use charges_parser::{ParseResult, ReportDate, Row};

use crate::OutputFormat;

const NOTHING_PARSED: &str = "nothing parsed: no line carried a head and an amount";

pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read report from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn print_line<W: Write>(out: &mut W, line: &str) -> Result<()> {
    writeln!(out, "{line}")?;
    Ok(())
}

fn write_rows<W: Write>(
    report_date: &ReportDate,
    rows: &[Row],
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => print_line(out, &render_table(report_date, rows)),
        OutputFormat::Csv => Ok(write_csv(rows, out)?),
        OutputFormat::Json => {
            let result = ParseResult {
                report_date: report_date.clone(),
                rows: rows.to_vec(),
            };
            serde_json::to_writer_pretty(&mut *out, &result)?;
            print_line(out, "")
        }
    }
}

/// Parses without saving. An empty result is reported, not treated as failure.
pub fn preview<W: Write>(
    text: &str,
    include_summaries: bool,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let ingested = ingest_report(text, include_summaries);
    if ingested.is_empty() {
        return print_line(out, NOTHING_PARSED);
    }
    write_rows(
        &ingested.result.report_date,
        &ingested.result.rows,
        format,
        out,
    )
}

pub fn save<S: ReportStore>(store: &mut S, text: &str, include_summaries: bool) -> Result<String> {
    let ingested = ingest_report(text, include_summaries);
    let report = StoredReport::from_parse(ingested.result, text, include_summaries)
        .context("report cannot be saved")?;
    if store.load(report.key())?.is_some() {
        tracing::warn!(iso = report.key(), "Replacing previously saved report");
    }
    store.save(&report)?;
    Ok(report.key().to_string())
}

pub fn list<S: ReportStore, W: Write>(store: &S, out: &mut W) -> Result<()> {
    let summaries = store.list()?;
    if summaries.is_empty() {
        return print_line(out, "no saved reports");
    }
    for summary in summaries {
        writeln!(
            out,
            "{}\t{}\t{} rows\t{} manual\tsaved {}",
            summary.iso,
            summary.label,
            summary.row_count,
            summary.manual_entry_count,
            summary.saved_at.format("%Y-%m-%d %H:%M:%S UTC"),
        )?;
    }
    Ok(())
}

pub fn show<S: ReportStore, W: Write>(
    store: &S,
    iso: &str,
    include_summaries: bool,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let report = store.load_required(iso)?;
    let rows = report.combined_rows(include_summaries);
    write_rows(&report.report_date, &rows, format, out)
}

pub fn export<S: ReportStore, W: Write>(
    store: &S,
    iso: &str,
    include_summaries: bool,
    out: W,
) -> Result<()> {
    let report = store.load_required(iso)?;
    write_csv(&report.combined_rows(include_summaries), out)?;
    Ok(())
}

pub fn delete<S: ReportStore, W: Write>(store: &mut S, iso: &str, out: &mut W) -> Result<()> {
    if !store.delete(iso)? {
        bail!("no saved report for {iso}");
    }
    print_line(out, &format!("deleted report {iso}"))
}

pub fn add_entry<S: ReportStore, W: Write>(
    store: &mut S,
    heads: &HeadTable,
    iso: &str,
    code: &str,
    month_amount: Option<f64>,
    prior_total: Option<f64>,
    out: &mut W,
) -> Result<()> {
    let mut report = store.load_required(iso)?;
    let entry = LedgerEntry::from_head(heads, code, month_amount, prior_total)?;
    let label = entry.label.clone();
    report.add_entry(entry);
    store.save(&report)?;
    print_line(out, &format!("added {label} to report {iso}"))
}

pub fn heads<W: Write>(heads: &HeadTable, out: &mut W) -> Result<()> {
    for head in heads.iter() {
        writeln!(out, "{}\t{}", head.code, head.label)?;
    }
    Ok(())
}
