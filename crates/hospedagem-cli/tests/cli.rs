//! CLI integration tests
//!
//! Each test writes a fixture workbook into a temp dir and drives the compiled
//! `hospedagem` binary against it.
//!
//! ## Exit Code Contract
//!
//! | Exit Code | Meaning |
//! |-----------|---------|
//! | 0 | Success, including dates that were not found |
//! | 1 | The workbook could not be loaded |

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use serde_json::Value;
use tempfile::TempDir;

fn hospedagem_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hospedagem"))
}

fn write_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("hospedagem.xlsx");
    let mut workbook = Workbook::new();

    let totals = workbook.add_worksheet();
    totals.set_name("TOTAL GERAL").unwrap();
    totals.write_string(2, 0, "DATA").unwrap();
    let days: [(f64, [f64; 5]); 2] = [
        (45658.0, [10.0, 20.0, 5.0, 0.0, 35.0]),
        (45659.0, [8.0, 12.0, 3.0, 1.0, 24.0]),
    ];
    for (i, (serial, figures)) in days.iter().enumerate() {
        let row = 3 + i as u32;
        totals.write_number(row, 0, *serial).unwrap();
        for (col, value) in figures.iter().enumerate() {
            totals.write_number(row, 1 + col as u16, *value).unwrap();
        }
    }

    let plaza = workbook.add_worksheet();
    plaza.set_name("Beach Plaza").unwrap();
    plaza.write_string(0, 0, "Apto").unwrap();
    plaza.write_string(0, 1, "Hospede").unwrap();
    plaza.write_string(1, 0, "101").unwrap();
    plaza.write_string(1, 1, "Ana").unwrap();

    workbook.save(&path).unwrap();
    path
}

/// Run the binary against a workbook, with RUST_LOG and the env default cleared
fn run(workbook: &Path, args: &[&str]) -> Output {
    Command::new(hospedagem_binary())
        .env_remove("RUST_LOG")
        .env_remove("HOSPEDAGEM_WORKBOOK")
        .arg("--workbook")
        .arg(workbook)
        .args(args)
        .output()
        .expect("failed to execute hospedagem")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn dates_lists_available_dates() {
    let dir = TempDir::new().unwrap();
    let output = run(&write_fixture(dir.path()), &["dates"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "2025-01-01\n2025-01-02\n");
}

#[test]
fn report_prints_each_date_and_the_sum() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &write_fixture(dir.path()),
        &["report", "--date", "2025-01-02", "--date", "2025-01-01"],
    );

    assert!(output.status.success());
    let out = stdout(&output);
    let first = out.find("Relatório para a data 2025-01-01:").unwrap();
    let second = out.find("Relatório para a data 2025-01-02:").unwrap();
    let sum = out.find("Soma Total para as datas selecionadas:").unwrap();
    assert!(first < second && second < sum);
    assert!(out.ends_with("Beach: 18\nNorte: 32\nTorre: 8\nAdicionais: 1\nTotal: 59\n"));
}

#[test]
fn report_warns_about_missing_dates() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &write_fixture(dir.path()),
        &["report", "--date", "2025-01-01", "--date", "2025-03-01"],
    );

    assert!(output.status.success());
    assert!(stderr(&output).contains("Data 2025-03-01 não encontrada no Excel."));
    let out = stdout(&output);
    assert!(!out.contains("2025-03-01"));
    assert!(out.contains("Soma Total para as datas selecionadas:"));
}

#[test]
fn report_as_json() {
    let dir = TempDir::new().unwrap();
    let output = run(
        &write_fixture(dir.path()),
        &["report", "--date", "2025-01-01", "--format", "json"],
    );

    assert!(output.status.success());
    let value: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["entries"][0]["status"], "found");
    assert_eq!(value["entries"][0]["figures"]["total"], "35");
    assert!(value["aggregate"].is_null());
}

#[test]
fn report_writes_pdf() {
    let dir = TempDir::new().unwrap();
    let pdf = dir.path().join("report.pdf");
    let output = run(
        &write_fixture(dir.path()),
        &["report", "--date", "2025-01-01", "--pdf", pdf.to_str().unwrap()],
    );

    assert!(output.status.success());
    let bytes = std::fs::read(&pdf).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn table_prints_the_display_sheet() {
    let dir = TempDir::new().unwrap();
    let output = run(&write_fixture(dir.path()), &["table"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Apto | Hospede\n-----+--------\n101  | Ana\n");
}

#[test]
fn export_writes_both_documents() {
    let dir = TempDir::new().unwrap();
    let out_dir = dir.path().join("out");
    let output = run(
        &write_fixture(dir.path()),
        &["export", "--date", "2025-01-01", "--out-dir", out_dir.to_str().unwrap()],
    );

    assert!(output.status.success());
    for name in ["total_geral_report.pdf", "beach_plaza_report.pdf"] {
        let bytes = std::fs::read(out_dir.join(name)).unwrap();
        assert!(bytes.starts_with(b"%PDF-"), "{name} is not a PDF");
    }
}

#[test]
fn missing_workbook_exits_1_with_one_error_line() {
    let dir = TempDir::new().unwrap();
    let output = run(&dir.path().join("nope.xlsx"), &["dates"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    let err = stderr(&output);
    assert!(err.starts_with("error: failed to load workbook"));
    assert_eq!(err.lines().count(), 1);
}

#[test]
fn workbook_can_come_from_the_environment() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path());
    let output = Command::new(hospedagem_binary())
        .env_remove("RUST_LOG")
        .env("HOSPEDAGEM_WORKBOOK", &path)
        .arg("dates")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "2025-01-01\n2025-01-02\n");
}
