use std::fs;

use charges_core::heads::HeadTable;
use charges_core::ingestion::ingest_report;
use charges_core::ledger::LedgerEntry;
use charges_core::store::{FileReportStore, ReportStore, StoredReport};
use charges_core::ChargesError;

fn fixture(name: &str) -> String {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../charges-parser/tests/data")
        .join(name);
    std::fs::read_to_string(path).expect("read fixture")
}

fn stored_fixture(name: &str, include_summaries: bool) -> StoredReport {
    let content = fixture(name);
    let ingested = ingest_report(&content, include_summaries);
    StoredReport::from_parse(ingested.result, &content, include_summaries)
        .expect("storable report")
}

#[test]
fn saved_report_round_trips_exactly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileReportStore::new(dir.path().join("reports"));
    let report = stored_fixture("monthly_abstract.txt", true);

    store.save(&report).expect("save");
    assert!(store.report_path("2024-03-07").exists());

    let loaded = store
        .load("2024-03-07")
        .expect("load")
        .expect("report present");
    assert_eq!(loaded, report);

    let audit = loaded
        .rows
        .iter()
        .find(|row| row.label == "Audit fees")
        .expect("audit row");
    assert_eq!(audit.month_amount, None);
    assert_eq!(audit.prior_total, Some(600.0));
}

#[test]
fn list_and_delete() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileReportStore::new(dir.path());
    assert!(store.list().expect("list empty").is_empty());

    store
        .save(&stored_fixture("monthly_abstract.txt", false))
        .expect("save");
    fs::write(dir.path().join("notes.json"), "{}").expect("write stray file");
    fs::write(dir.path().join("readme.txt"), "hello").expect("write stray file");

    let listed = store.list().expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].iso, "2024-03-07");
    assert_eq!(listed[0].label, "Mar 7, 2024");
    assert_eq!(listed[0].row_count, 8);

    assert!(store.delete("2024-03-07").expect("delete"));
    assert!(!store.delete("2024-03-07").expect("second delete"));
    assert!(store.load("2024-03-07").expect("load").is_none());
}

#[test]
fn failed_save_leaves_no_temp_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileReportStore::new(dir.path());
    let target = store.report_path("2024-03-07");
    fs::create_dir_all(target.join("occupied")).expect("block target path");

    let result = store.save(&stored_fixture("monthly_abstract.txt", true));
    assert!(matches!(result, Err(ChargesError::Io(_))));
    assert!(!dir.path().join("2024-03-07.json.tmp").exists());
    assert!(target.is_dir());
}

#[test]
fn undated_report_is_refused() {
    let content = fixture("undated_abstract.txt");
    let ingested = ingest_report(&content, false);
    assert!(!ingested.is_empty());

    let err = StoredReport::from_parse(ingested.result, &content, false).unwrap_err();
    assert!(matches!(err, ChargesError::MissingReportDate));
}

#[test]
fn bad_keys_never_touch_the_filesystem() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileReportStore::new(dir.path());
    assert!(matches!(
        store.load("../secrets"),
        Err(ChargesError::InvalidReportKey(_))
    ));
    assert!(matches!(
        store.delete("2024-03-07.json"),
        Err(ChargesError::InvalidReportKey(_))
    ));
}

#[test]
fn manual_entries_merge_into_saved_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileReportStore::new(dir.path());
    let heads = HeadTable::bundled().expect("heads");

    let mut report = stored_fixture("monthly_abstract.txt", true);
    report.add_entry(LedgerEntry::from_head(&heads, "101", Some(1300.0), Some(3000.0)).unwrap());
    report.add_entry(LedgerEntry::from_head(&heads, "102", Some(80.0), None).unwrap());
    store.save(&report).expect("save");

    let loaded = store.load_required("2024-03-07").expect("load");
    assert_eq!(loaded.manual_entries.len(), 2);

    let rows = loaded.combined_rows(true);
    let rents: Vec<_> = rows.iter().filter(|row| row.label == "Rent").collect();
    assert_eq!(rents.len(), 1);
    assert_eq!(rents[0].month_amount, Some(1300.0));
    assert_eq!(rents[0].as_on_total, 4300.0);
    assert!(rows.iter().any(|row| row.label == "Rates and taxes"));
    assert_eq!(rows.last().unwrap().label, "BALANCE AS PER GENERAL LEDGER");

    let without = loaded.combined_rows(false);
    assert_eq!(without.len(), rows.len() - 4);
}

#[test]
fn ingestion_hash_is_stable() {
    let content = fixture("monthly_abstract.txt");
    let first = ingest_report(&content, true);
    let second = ingest_report(&content, false);
    assert_eq!(first.hash, second.hash);
    assert_eq!(first.hash.len(), 64);
    assert_eq!(first.stats.extracted, second.stats.extracted);
    assert!(second.stats.rows < first.stats.rows);
}
