//! # hospedagem-core
//!
//! Core domain model for the hospedagem report dashboard.
//!
//! This crate provides:
//! - Domain types: `CellValue`, `SpreadsheetRow`, `Figures`, `Table`
//! - Serial date decoding (see [`serial`])
//! - Figure extraction and summation (see [`aggregate`])
//! - The read-only [`Dashboard`] store and date selection
//! - Core traits: `ReportRenderer`, `TableRenderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use hospedagem_core::{parse_date, CellValue, Dashboard, Decimal, SpreadsheetRow, Table};
//!
//! let rows = vec![
//!     SpreadsheetRow::from_numbers(45658.0, [10.0, 20.0, 5.0, 0.0, 35.0]), // 2025-01-01
//!     SpreadsheetRow::from_numbers(45659.0, [8.0, 12.0, 3.0, 1.0, 24.0]),  // 2025-01-02
//!     SpreadsheetRow::new(vec![CellValue::Text("DATA".into())]),
//! ];
//! let dashboard = Dashboard::new(rows, Table::default());
//!
//! let dates = [parse_date("2025-01-01").unwrap(), parse_date("2025-01-02").unwrap()];
//! let selection = dashboard.select(&dates);
//!
//! let total = selection.aggregate.unwrap();
//! assert_eq!(total.total, Decimal::from(59));
//! ```

pub mod aggregate;
pub mod dashboard;
pub mod serial;

pub use aggregate::{extract_figures, sum};
pub use dashboard::{Dashboard, DateEntry, DateOutcome, Selection};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub use rust_decimal::Decimal;

// ============================================================================
// Constants
// ============================================================================

/// Date format used at every text boundary (CLI arguments, reports)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of cells in a data row: the date serial followed by five figures
pub const ROW_WIDTH: usize = 6;

/// Column holding the date serial
pub const DATE_COLUMN: usize = 0;

// ============================================================================
// Cells and Rows
// ============================================================================

/// A single spreadsheet cell, independent of the workbook reader
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl CellValue {
    /// Numeric value of the cell, if it holds a finite number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

/// One calendar day's figures: `[date serial, beach, norte, torre, adicionais, total]`
///
/// Rows always hold exactly [`ROW_WIDTH`] cells; shorter input is padded with
/// empty cells and longer input is truncated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpreadsheetRow {
    cells: Vec<CellValue>,
}

impl SpreadsheetRow {
    pub fn new(mut cells: Vec<CellValue>) -> Self {
        cells.resize(ROW_WIDTH, CellValue::Empty);
        Self { cells }
    }

    /// Build a fully numeric row
    pub fn from_numbers(serial: f64, figures: [f64; 5]) -> Self {
        let mut cells = Vec::with_capacity(ROW_WIDTH);
        cells.push(CellValue::Number(serial));
        cells.extend(figures.into_iter().map(CellValue::Number));
        Self::new(cells)
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    pub fn date_cell(&self) -> &CellValue {
        self.cell(DATE_COLUMN)
    }

    /// Calendar date of this row, ignoring any time-of-day fraction
    pub fn date(&self) -> Option<NaiveDate> {
        serial::decode_date(self.date_cell())
    }
}

// ============================================================================
// Figures
// ============================================================================

/// The five reported fields, in report order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Beach,
    Norte,
    Torre,
    Adicionais,
    Total,
}

impl Field {
    /// All fields in the fixed order used by every report
    pub const ALL: [Field; 5] = [
        Field::Beach,
        Field::Norte,
        Field::Torre,
        Field::Adicionais,
        Field::Total,
    ];

    /// Spreadsheet column holding this field
    pub fn column(self) -> usize {
        match self {
            Field::Beach => 1,
            Field::Norte => 2,
            Field::Torre => 3,
            Field::Adicionais => 4,
            Field::Total => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Beach => "Beach",
            Field::Norte => "Norte",
            Field::Torre => "Torre",
            Field::Adicionais => "Adicionais",
            Field::Total => "Total",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Figures for one day, or the element-wise sum over several days
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figures {
    pub beach: Decimal,
    pub norte: Decimal,
    pub torre: Decimal,
    pub adicionais: Decimal,
    pub total: Decimal,
}

/// Figures read from a single row
pub type DailyFigures = Figures;

/// Element-wise sum of [`DailyFigures`] over a selection
pub type AggregateFigures = Figures;

impl Figures {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Decimal {
        match field {
            Field::Beach => self.beach,
            Field::Norte => self.norte,
            Field::Torre => self.torre,
            Field::Adicionais => self.adicionais,
            Field::Total => self.total,
        }
    }

    pub fn set(&mut self, field: Field, value: Decimal) {
        match field {
            Field::Beach => self.beach = value,
            Field::Norte => self.norte = value,
            Field::Torre => self.torre = value,
            Field::Adicionais => self.adicionais = value,
            Field::Total => self.total = value,
        }
    }

    /// Fields paired with their values, in report order
    pub fn fields(&self) -> impl Iterator<Item = (Field, Decimal)> + '_ {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    pub fn is_zero(&self) -> bool {
        self.fields().all(|(_, value)| value.is_zero())
    }
}

/// Field-wise sum; a field that overflows saturates at the Decimal bounds
impl std::ops::Add for Figures {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let mut out = Self::zero();
        for field in Field::ALL {
            out.set(field, saturating_field_add(field, self.get(field), rhs.get(field)));
        }
        out
    }
}

fn saturating_field_add(field: Field, lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_add(rhs).unwrap_or_else(|| {
        warn!(%field, %lhs, %rhs, "figure sum overflowed, saturating");
        lhs.saturating_add(rhs)
    })
}

impl std::ops::AddAssign for Figures {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Figures {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, f| acc + f)
    }
}

impl<'a> std::iter::Sum<&'a Figures> for Figures {
    fn sum<I: Iterator<Item = &'a Figures>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, f| acc + *f)
    }
}

// ============================================================================
// Table
// ============================================================================

/// A free-form sheet with its own header row, every cell as display text
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table, normalizing every row to the header width
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { columns, rows }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no header and no rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", String::as_str)
    }
}

// ============================================================================
// Dates at the boundary
// ============================================================================

/// Parse a `YYYY-MM-DD` date string
pub fn parse_date(input: &str) -> Result<NaiveDate, DashboardError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| DashboardError::InvalidDate(input.to_string()))
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering for a date selection
pub trait ReportRenderer {
    type Output;

    /// Render the reports of a selection
    fn render(&self, selection: &Selection) -> Result<Self::Output, RenderError>;
}

/// Output rendering for a free-form table
pub trait TableRenderer {
    type Output;

    /// Render a table to the output format
    fn render_table(&self, table: &Table) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Dashboard input error
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("PDF error: {0}")]
    Pdf(String),
}

// ============================================================================
// Tests
// ============================================================================
