//! Figure extraction and summation
//!
//! Missing, textual, or non-finite figure cells count as zero so that a
//! partially filled row never poisons a sum. Numbers beyond the Decimal range
//! (about 7.9e28) are treated like non-finite ones: zero, with a warning.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use crate::{CellValue, Field, Figures, SpreadsheetRow};

/// Numeric value of a figure cell, zero when absent or out of range
pub fn figure_value(cell: &CellValue) -> Decimal {
    let Some(number) = cell.as_number() else {
        return Decimal::ZERO;
    };
    match Decimal::from_f64(number) {
        Some(value) => value.normalize(),
        None => {
            warn!(value = number, "figure out of decimal range, counted as zero");
            Decimal::ZERO
        }
    }
}

/// Read the five figures of a row
pub fn extract_figures(row: &SpreadsheetRow) -> Figures {
    let mut figures = Figures::zero();
    for field in Field::ALL {
        figures.set(field, figure_value(row.cell(field.column())));
    }
    figures
}

/// Element-wise sum of figures
pub fn sum<'a>(figures: impl IntoIterator<Item = &'a Figures>) -> Figures {
    figures.into_iter().sum()
}
