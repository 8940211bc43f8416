//! Read-only data store and date selection
//!
//! A [`Dashboard`] is built once from the workbook and then only borrowed.
//! Every query produces fresh values; nothing in the store is mutated.
//!
//! # Lookup policy
//!
//! A requested date matches the first row whose decoded date equals it,
//! ignoring time of day. Later rows with the same date are ignored.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{extract_figures, sum};
use crate::{format_date, Figures, SpreadsheetRow, Table};

/// Loaded workbook contents
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    rows: Vec<SpreadsheetRow>,
    table: Table,
}

impl Dashboard {
    pub fn new(rows: Vec<SpreadsheetRow>, table: Table) -> Self {
        Self { rows, table }
    }

    /// Data rows of the daily totals sheet
    pub fn rows(&self) -> &[SpreadsheetRow] {
        &self.rows
    }

    /// The free-form display table
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Distinct decodable dates, ascending. Rows without a date are skipped.
    pub fn available_dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self.rows.iter().filter_map(SpreadsheetRow::date).collect();
        dates.into_iter().collect()
    }

    /// First row dated `date`
    pub fn find_row(&self, date: NaiveDate) -> Option<&SpreadsheetRow> {
        let mut matching = self.rows.iter().filter(|row| row.date() == Some(date));
        let first = matching.next()?;
        let duplicates = matching.count();
        if duplicates > 0 {
            debug!(date = %date, duplicates, "duplicate rows for date, using the first");
        }
        Some(first)
    }

    /// Figures for `date`, or `None` if no row carries that date
    pub fn lookup(&self, date: NaiveDate) -> Option<Figures> {
        self.find_row(date).map(extract_figures)
    }

    /// Resolve a set of dates
    ///
    /// Dates are deduplicated and sorted. The aggregate is present whenever
    /// more than one distinct date was requested and sums only the dates that
    /// were found.
    pub fn select(&self, dates: &[NaiveDate]) -> Selection {
        let requested: BTreeSet<NaiveDate> = dates.iter().copied().collect();

        let entries: Vec<DateEntry> = requested
            .iter()
            .map(|&date| {
                let outcome = match self.lookup(date) {
                    Some(figures) => DateOutcome::Found { figures },
                    None => {
                        debug!(date = %format_date(date), "date not found");
                        DateOutcome::NotFound
                    }
                };
                DateEntry { date, outcome }
            })
            .collect();

        let aggregate = (requested.len() > 1).then(|| sum(entries.iter().filter_map(DateEntry::figures)));

        Selection { entries, aggregate }
    }
}

/// Result of looking up one requested date
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DateOutcome {
    Found { figures: Figures },
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub outcome: DateOutcome,
}

impl DateEntry {
    pub fn figures(&self) -> Option<&Figures> {
        match &self.outcome {
            DateOutcome::Found { figures } => Some(figures),
            DateOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        self.figures().is_some()
    }
}

/// Resolved dates in ascending order, plus the aggregate for multi-date selections
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub entries: Vec<DateEntry>,
    pub aggregate: Option<Figures>,
}

impl Selection {
    /// Found dates with their figures
    pub fn found(&self) -> impl Iterator<Item = (NaiveDate, &Figures)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.figures().map(|figures| (entry.date, figures)))
    }

    /// Requested dates with no matching row
    pub fn missing(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.entries.iter().filter(|e| !e.is_found()).map(|e| e.date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
