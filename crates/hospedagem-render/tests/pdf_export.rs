//! Integration tests for the PDF artifacts

use chrono::NaiveDate;
use hospedagem_core::{Dashboard, SpreadsheetRow, Table};
use hospedagem_render::{combined_report_pdf, table_pdf, PdfArtifact, BEACH_PLAZA_PDF, PDF_MIME, TOTAL_GERAL_PDF};
use lopdf::Document;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn dashboard() -> Dashboard {
    Dashboard::new(
        vec![
            SpreadsheetRow::from_numbers(45658.0, [10.0, 20.0, 5.0, 0.0, 35.0]),
            SpreadsheetRow::from_numbers(45659.0, [8.0, 12.0, 3.0, 1.0, 24.0]),
        ],
        Table::default(),
    )
}

fn page_content(artifact: &PdfArtifact) -> Vec<u8> {
    let doc = Document::load_mem(artifact.bytes()).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1);
    let page_id = *pages.values().next().unwrap();
    doc.get_page_content(page_id).unwrap()
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
}

#[test]
fn combined_report_has_each_found_date_and_the_sum() {
    let selection = dashboard().select(&[date(2025, 1, 1), date(2025, 1, 2)]);
    let artifact = combined_report_pdf(&selection).unwrap();

    assert_eq!(artifact.file_name, TOTAL_GERAL_PDF);
    assert_eq!(artifact.mime, PDF_MIME);
    assert_eq!(artifact.buffer.position(), 0);

    let content = page_content(&artifact);
    assert!(contains(&content, "2025-01-01:"));
    assert!(contains(&content, "2025-01-02:"));
    assert!(contains(&content, "Beach: 18"));
    assert!(contains(&content, "Norte: 32"));
    assert!(contains(&content, "Total: 59"));
}

#[test]
fn combined_report_skips_missing_dates() {
    let selection = dashboard().select(&[date(2025, 1, 1), date(2025, 3, 1)]);
    let artifact = combined_report_pdf(&selection).unwrap();

    let content = page_content(&artifact);
    assert!(contains(&content, "2025-01-01:"));
    assert!(!contains(&content, "2025-03-01"));
    // Aggregate over the single found date
    assert!(contains(&content, "Total: 35"));
}

#[test]
fn empty_selection_still_produces_a_document() {
    let selection = dashboard().select(&[]);
    let artifact = combined_report_pdf(&selection).unwrap();
    assert!(!artifact.bytes().is_empty());
    assert_eq!(artifact.buffer.position(), 0);
    page_content(&artifact);
}

#[test]
fn table_pdf_draws_every_cell() {
    let table = Table::new(
        vec!["Apto".into(), "Diarias".into()],
        vec![vec!["101".into(), "3".into()], vec!["102".into(), "2.5".into()]],
    );
    let artifact = table_pdf(&table).unwrap();

    assert_eq!(artifact.file_name, BEACH_PLAZA_PDF);
    assert_eq!(artifact.mime, PDF_MIME);

    let content = page_content(&artifact);
    for text in ["Apto", "Diarias", "101", "102", "2.5"] {
        assert!(contains(&content, text), "missing {text}");
    }
}

#[test]
fn empty_table_gives_a_blank_page() {
    let artifact = table_pdf(&Table::default()).unwrap();
    assert!(!artifact.bytes().is_empty());
    assert_eq!(artifact.buffer.position(), 0);
    page_content(&artifact);
}

#[test]
fn very_large_table_is_shrunk_onto_one_page() {
    let columns: Vec<String> = (0..5).map(|c| format!("Coluna {c}")).collect();
    let rows: Vec<Vec<String>> = (0..2_000)
        .map(|r| (0..5).map(|c| format!("{r}/{c}")).collect())
        .collect();
    let artifact = table_pdf(&Table::new(columns, rows)).unwrap();

    let doc = Document::load_mem(artifact.bytes()).unwrap();
    let page_id = *doc.get_pages().values().next().unwrap();
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .clone();
    let height = media_box[3].as_float().unwrap();
    assert!(height <= 14_400.0 + 0.5);
}
