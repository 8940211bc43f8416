//! # hospedagem-render
//!
//! Rendering backends for hospedagem reports.
//!
//! ## Supported Formats
//!
//! - **Text**: per-date reports, aggregate and combined report ([`text`])
//! - **JSON**: structured entries plus the rendered text ([`json`])
//! - **Terminal table**: padded columns for the display sheet ([`table`])
//! - **PDF**: single-page documents built with lopdf ([`pdf`])
//!
//! ## Example
//!
//! ```rust
//! use hospedagem_core::{Dashboard, SpreadsheetRow, Table};
//! use hospedagem_render::{combined_report_pdf, PDF_MIME, TOTAL_GERAL_PDF};
//! use chrono::NaiveDate;
//!
//! let rows = vec![SpreadsheetRow::from_numbers(45658.0, [10.0, 20.0, 5.0, 0.0, 35.0])];
//! let dashboard = Dashboard::new(rows, Table::default());
//! let selection = dashboard.select(&[NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()]);
//!
//! let artifact = combined_report_pdf(&selection).unwrap();
//! assert_eq!(artifact.file_name, TOTAL_GERAL_PDF);
//! assert_eq!(artifact.mime, PDF_MIME);
//! assert_eq!(artifact.buffer.position(), 0);
//! ```

pub mod json;
pub mod pdf;
pub mod table;
pub mod text;

pub use json::JsonReportRenderer;
pub use pdf::{PageSize, PdfTableRenderer, PdfTextRenderer};
pub use table::TextTableRenderer;
pub use text::TextReportRenderer;

use std::io::Cursor;

use hospedagem_core::{RenderError, ReportRenderer, Selection, Table, TableRenderer};
use tracing::info;

/// Download name of the combined report document
pub const TOTAL_GERAL_PDF: &str = "total_geral_report.pdf";

/// Download name of the display table document
pub const BEACH_PLAZA_PDF: &str = "beach_plaza_report.pdf";

/// MIME type of every exported document
pub const PDF_MIME: &str = "application/pdf";

/// A rendered document ready to be saved or offered for download
#[derive(Clone, Debug)]
pub struct PdfArtifact {
    pub file_name: &'static str,
    pub mime: &'static str,
    /// Document bytes, positioned at offset 0
    pub buffer: Cursor<Vec<u8>>,
}

impl PdfArtifact {
    fn new(file_name: &'static str, buffer: Cursor<Vec<u8>>) -> Self {
        info!(file_name, bytes = buffer.get_ref().len(), "pdf rendered");
        Self { file_name, mime: PDF_MIME, buffer }
    }

    /// Document bytes
    pub fn bytes(&self) -> &[u8] {
        self.buffer.get_ref()
    }
}

/// Combined report of the found dates (plus aggregate) as `total_geral_report.pdf`
pub fn combined_report_pdf(selection: &Selection) -> Result<PdfArtifact, RenderError> {
    let buffer = PdfTextRenderer::new().render(selection)?;
    Ok(PdfArtifact::new(TOTAL_GERAL_PDF, buffer))
}

/// Display table as `beach_plaza_report.pdf`
pub fn table_pdf(table: &Table) -> Result<PdfArtifact, RenderError> {
    let buffer = PdfTableRenderer::new().render_table(table)?;
    Ok(PdfArtifact::new(BEACH_PLAZA_PDF, buffer))
}
