//! Writing real workbooks to a temporary directory.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use chrono::{NaiveDateTime, Utc};
use lit_core::entities::{RunMetadata, SearchResult};
use lit_core::ids::{RefTag, RunId};
use lit_export::workbook::{EXPORT_DATE_FORMAT, METADATA_SHEET, RESULTS_SHEET};
use lit_export::{ExportError, export_run};
use pretty_assertions::assert_eq;

fn run() -> RunMetadata {
    RunMetadata {
        id: RunId(7),
        min_year: 2019,
        max_year: 2026,
        research_purpose: "To evaluate NSAIDs in knee osteoarthritis.".into(),
        search_strategy: "(nsaid OR nsaids) AND (knee osteoarthritis)".into(),
        created_at: Utc::now(),
    }
}

fn result(seq: u32, title: &str) -> SearchResult {
    SearchResult {
        id: i64::from(seq),
        run_id: Some(RunId(7)),
        ref_id: RefTag::new(seq).unwrap(),
        pmid: format!("3800000{seq}"),
        title: title.into(),
        authors: "Smith J".into(),
        abstract_text: "No Abstract".into(),
        doi: "N/A".into(),
        link: format!("https://pubmed.ncbi.nlm.nih.gov/3800000{seq}/"),
        year: 2021,
        created_at: Utc::now(),
    }
}

fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.sheet_names()
}

/// Every cell of `sheet`, rendered as text.
fn rows(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.clone(),
        Data::Float(number) => format!("{number}"),
        Data::Int(number) => number.to_string(),
        Data::Empty => String::new(),
        other => panic!("unexpected cell {other:?}"),
    }
}

#[test]
fn writes_workbook_under_created_output_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let output_dir = tmp.path().join("data");

    let path = export_run(
        &output_dir,
        "knee",
        &run(),
        &[result(1, "Topical diclofenac"), result(2, "Oral naproxen")],
    )
    .unwrap();

    assert_eq!(path, output_dir.join("knee.xlsx"));
    assert_eq!(sheet_names(&path), [RESULTS_SHEET, METADATA_SHEET]);
}

#[test]
fn results_sheet_holds_one_row_per_result_in_tag_order() {
    let tmp = tempfile::tempdir().unwrap();
    let path = export_run(
        tmp.path(),
        "knee",
        &run(),
        &[result(1, "Topical diclofenac"), result(2, "No Title")],
    )
    .unwrap();

    let rows = rows(&path, RESULTS_SHEET);
    assert_eq!(
        rows[0],
        ["RefID", "PMID", "Title", "Authors", "Abstract", "DOI", "Link"]
    );
    assert_eq!(
        rows[1],
        [
            "S00001",
            "38000001",
            "Topical diclofenac",
            "Smith J",
            "No Abstract",
            "N/A",
            "https://pubmed.ncbi.nlm.nih.gov/38000001/",
        ]
    );
    assert_eq!(rows[2][0], "S00002");
    assert_eq!(rows[2][2], "No Title");
    assert_eq!(rows.len(), 3);
}

#[test]
fn metadata_sheet_holds_the_run_and_export_time() {
    let tmp = tempfile::tempdir().unwrap();
    let path = export_run(tmp.path(), "knee", &run(), &[result(1, "A")]).unwrap();

    let rows = rows(&path, METADATA_SHEET);
    assert_eq!(
        rows[0],
        [
            "min_year",
            "max_year",
            "research_purpose",
            "mesh_strategy",
            "export_date",
        ]
    );
    assert_eq!(
        rows[1][..4],
        [
            "2019",
            "2026",
            "To evaluate NSAIDs in knee osteoarthritis.",
            "(nsaid OR nsaids) AND (knee osteoarthritis)",
        ]
    );
    assert!(
        NaiveDateTime::parse_from_str(&rows[1][4], EXPORT_DATE_FORMAT).is_ok(),
        "export_date {:?} does not match {EXPORT_DATE_FORMAT}",
        rows[1][4]
    );
    assert_eq!(rows.len(), 2);
}

#[test]
fn empty_run_still_exports() {
    let tmp = tempfile::tempdir().unwrap();
    let path = export_run(tmp.path(), "empty.xlsx", &run(), &[]).unwrap();

    let results = rows(&path, RESULTS_SHEET);
    assert_eq!(results.len(), 1, "header row only");
    assert_eq!(rows(&path, METADATA_SHEET)[1][0], "2019");
}

#[test]
fn uppercase_extension_is_not_doubled() {
    let tmp = tempfile::tempdir().unwrap();
    let path = export_run(tmp.path(), "report.XLSX", &run(), &[]).unwrap();
    assert_eq!(path, tmp.path().join("report.XLSX"));
    assert!(path.exists());
}

#[test]
fn invalid_name_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let output_dir = tmp.path().join("data");
    let err = export_run(&output_dir, "../outside", &run(), &[]).unwrap_err();
    assert!(matches!(err, ExportError::InvalidFilename { .. }));
    assert!(!output_dir.exists());
}

#[test]
fn export_overwrites_existing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let first = export_run(tmp.path(), "same", &run(), &[]).unwrap();
    let second = export_run(tmp.path(), "same", &run(), &[result(1, "again")]).unwrap();
    assert_eq!(first, second);
    assert_eq!(rows(&second, RESULTS_SHEET)[1][2], "again");
}
