//! Spreadsheet serial date decoding
//!
//! Spreadsheets store dates as a count of days since 1899-12-30. The integer
//! part selects the calendar day and the fractional part is the time of day,
//! so `45658.5` is 2025-01-01 at noon.
//!
//! Decoding never fails loudly: cells that are empty, textual, or not a finite
//! number decode to `None`, which callers treat as "not a data row".
//!
//! ```rust
//! use chrono::NaiveDate;
//! use hospedagem_core::serial::decode_serial;
//!
//! let noon = decode_serial(45658.5).unwrap();
//! assert_eq!(noon.date(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
//! assert_eq!(noon.time().to_string(), "12:00:00");
//! ```

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::CellValue;

/// Milliseconds in one serial day; fractional serials are resolved to this precision
pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Day zero of the serial encoding (1899-12-30)
pub fn epoch() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)
}

/// Decode a raw serial number into a date and time of day
///
/// Returns `None` for non-finite input or serials outside chrono's date range.
pub fn decode_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    let offset = Duration::try_milliseconds(millis)?;
    epoch()?.checked_add_signed(offset)
}

/// Decode a cell holding a serial date
pub fn decode(cell: &CellValue) -> Option<NaiveDateTime> {
    cell.as_number().and_then(decode_serial)
}

/// Decode a cell to its calendar date, dropping the time of day
pub fn decode_date(cell: &CellValue) -> Option<NaiveDate> {
    decode(cell).map(|dt| dt.date())
}
