//! # hospedagem-source
//!
//! Loads the lodging workbook into a [`Dashboard`].
//!
//! Two sheets are read:
//! - the daily totals sheet (`TOTAL GERAL`), a fixed block of rows with the
//!   date serial in column A and the five figures in columns B-F;
//! - the display sheet (`Beach Plaza`), a free-form table whose first row is
//!   the header.
//!
//! Any format calamine detects (xlsx, xls, xlsb, ods) is accepted.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hospedagem_source::{load_workbook, SourceLayout};
//!
//! let dashboard = load_workbook("HOSPEDAGEM MRV271125.xlsx".as_ref(), &SourceLayout::default())?;
//! for date in dashboard.available_dates() {
//!     println!("{date}");
//! }
//! # Ok::<(), hospedagem_source::SourceError>(())
//! ```

use std::io::{Read, Seek};
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use hospedagem_core::{format_date, serial, CellValue, Dashboard, SpreadsheetRow, Table, ROW_WIDTH};
use thiserror::Error;
use tracing::{debug, info};

/// Workbook file name used when none is given
pub const DEFAULT_WORKBOOK: &str = "HOSPEDAGEM MRV271125.xlsx";

/// Sheet holding the daily totals
pub const TOTAL_SHEET: &str = "TOTAL GERAL";

/// Sheet holding the free-form display table
pub const TABLE_SHEET: &str = "Beach Plaza";

/// Workbook loading error
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Cannot open workbook {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet '{sheet}' not found in {}", path.display())]
    MissingSheet { path: PathBuf, sheet: String },

    #[error("Cannot read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Invalid row range {first}..={last}")]
    InvalidLayout { first: u32, last: u32 },
}

/// Where the data lives inside the workbook
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLayout {
    /// Name of the daily totals sheet
    pub total_sheet: String,
    /// Name of the display table sheet
    pub table_sheet: String,
    /// First data row of the totals sheet (0-indexed, absolute)
    pub first_row: u32,
    /// Last data row of the totals sheet (0-indexed, absolute, inclusive)
    pub last_row: u32,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            total_sheet: TOTAL_SHEET.into(),
            table_sheet: TABLE_SHEET.into(),
            first_row: 3,
            last_row: 11,
        }
    }
}

impl SourceLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the daily totals sheet name
    pub fn total_sheet(mut self, name: impl Into<String>) -> Self {
        self.total_sheet = name.into();
        self
    }

    /// Set the display table sheet name
    pub fn table_sheet(mut self, name: impl Into<String>) -> Self {
        self.table_sheet = name.into();
        self
    }

    /// Set the inclusive data row range of the totals sheet
    pub fn rows(mut self, first: u32, last: u32) -> Self {
        self.first_row = first;
        self.last_row = last;
        self
    }

    pub fn validate(&self) -> Result<(), SourceError> {
        if self.first_row > self.last_row {
            return Err(SourceError::InvalidLayout {
                first: self.first_row,
                last: self.last_row,
            });
        }
        Ok(())
    }
}

/// Load both sheets of the workbook at `path`
pub fn load_workbook(path: &Path, layout: &SourceLayout) -> Result<Dashboard, SourceError> {
    layout.validate()?;

    let mut workbook = open_workbook_auto(path).map_err(|source| SourceError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let totals = read_sheet(&mut workbook, path, &layout.total_sheet)?;
    let rows = rows_from_range(&totals, layout);

    let display = read_sheet(&mut workbook, path, &layout.table_sheet)?;
    let table = table_from_range(&display);

    let dashboard = Dashboard::new(rows, table);
    info!(
        path = %path.display(),
        dates = dashboard.available_dates().len(),
        table_rows = dashboard.table().height(),
        "workbook loaded"
    );
    Ok(dashboard)
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    path: &Path,
    sheet: &str,
) -> Result<Range<Data>, SourceError> {
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(SourceError::MissingSheet {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
        });
    }
    workbook.worksheet_range(sheet).map_err(|source| SourceError::Sheet {
        sheet: sheet.to_string(),
        source,
    })
}

/// Daily rows of the totals sheet, read at absolute positions
///
/// Cells outside the sheet's used range read as empty.
pub fn rows_from_range(range: &Range<Data>, layout: &SourceLayout) -> Vec<SpreadsheetRow> {
    (layout.first_row..=layout.last_row)
        .map(|row| {
            let cells = (0..ROW_WIDTH as u32)
                .map(|col| range.get_value((row, col)).map_or(CellValue::Empty, cell_value))
                .collect();
            SpreadsheetRow::new(cells)
        })
        .collect()
}

/// Convert a calamine cell into a reader-independent value
///
/// Date-formatted cells keep their serial number.
pub fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(format!("{e:?}")),
    }
}

/// Build the display table: first row is the header, blank cells become `""`
pub fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        debug!("display sheet is empty");
        return Table::default();
    };

    let columns = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = display_text(cell);
            if name.is_empty() {
                format!("Unnamed: {i}")
            } else {
                name
            }
        })
        .collect();

    let body = rows.map(|row| row.iter().map(display_text).collect()).collect();
    Table::new(columns, body)
}

fn display_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::DateTime(dt) if !dt.is_duration() => {
            date_text(dt.as_f64()).unwrap_or_else(|| data.to_string())
        }
        Data::Error(e) => format!("{e:?}"),
        other => other.to_string(),
    }
}

/// `YYYY-MM-DD` for whole days, `YYYY-MM-DD HH:MM:SS` otherwise
fn date_text(serial_value: f64) -> Option<String> {
    let dt = serial::decode(&CellValue::Number(serial_value))?;
    if dt.date().and_hms_opt(0, 0, 0) == Some(dt) {
        Some(format_date(dt.date()))
    } else {
        Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
    }
}
