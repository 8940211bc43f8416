//! Plain-text reports
//!
//! Produces the per-date blocks, the aggregate block, not-found notices and
//! the combined report that feeds the PDF export.
//!
//! ## Example Output
//!
//! ```text
//! Relatório para a data 2025-01-01:
//! Beach: 10
//! Norte: 20
//! Torre: 5
//! Adicionais: 0
//! Total: 35
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use hospedagem_core::{format_date, AggregateFigures, DailyFigures, Figures, RenderError, ReportRenderer, Selection};

/// Header of a single-date report, followed by the date
pub const SINGLE_HEADER: &str = "Relatório para a data";

/// Header of the aggregate report
pub const AGGREGATE_HEADER: &str = "Soma Total para as datas selecionadas:";

/// Text report renderer
#[derive(Clone, Debug, Default)]
pub struct TextReportRenderer;

impl TextReportRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Report block for one date
    pub fn render_single(&self, date: NaiveDate, figures: &DailyFigures) -> String {
        let mut out = format!("{} {}:\n", SINGLE_HEADER, format_date(date));
        push_fields(&mut out, figures);
        out
    }

    /// Report block for the sum over several dates
    pub fn render_aggregate(&self, figures: &AggregateFigures) -> String {
        let mut out = format!("{}\n", AGGREGATE_HEADER);
        push_fields(&mut out, figures);
        out
    }

    /// Notice for a requested date with no matching row
    pub fn not_found_notice(&self, date: NaiveDate) -> String {
        format!("Data {} não encontrada no Excel.", format_date(date))
    }

    /// Report text (or notice) for each requested date
    pub fn render_by_date(&self, selection: &Selection) -> BTreeMap<NaiveDate, String> {
        selection
            .entries
            .iter()
            .map(|entry| {
                let text = match entry.figures() {
                    Some(figures) => self.render_single(entry.date, figures),
                    None => self.not_found_notice(entry.date),
                };
                (entry.date, text)
            })
            .collect()
    }

    /// Found-date reports in ascending order, then the aggregate if present
    ///
    /// Blocks are separated by a blank line. Not-found dates are left out.
    pub fn render_combined(&self, selection: &Selection) -> String {
        let mut combined = selection
            .found()
            .map(|(date, figures)| self.render_single(date, figures))
            .collect::<Vec<_>>()
            .join("\n\n");

        if let Some(aggregate) = &selection.aggregate {
            combined.push_str("\n\n");
            combined.push_str(&self.render_aggregate(aggregate));
        }
        combined
    }
}

fn push_fields(out: &mut String, figures: &Figures) {
    for (field, value) in figures.fields() {
        out.push_str(&format!("{}: {}\n", field.label(), value));
    }
}

impl ReportRenderer for TextReportRenderer {
    type Output = String;

    fn render(&self, selection: &Selection) -> Result<String, RenderError> {
        Ok(self.render_combined(selection))
    }
}
