//! JSON output for a selection
//!
//! Carries the structured entries alongside the rendered text so scripts can
//! use either.

use std::collections::BTreeMap;

use hospedagem_core::{format_date, DateEntry, Figures, RenderError, ReportRenderer, Selection};
use serde::Serialize;

use crate::text::TextReportRenderer;

/// JSON report renderer
#[derive(Clone, Debug, Default)]
pub struct JsonReportRenderer {
    /// Pretty-print the output
    pub pretty: bool,
}

impl JsonReportRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty-printed output
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    entries: &'a [DateEntry],
    aggregate: Option<&'a Figures>,
    reports: BTreeMap<String, String>,
    notices: Vec<String>,
    combined: String,
}

impl ReportRenderer for JsonReportRenderer {
    type Output = String;

    fn render(&self, selection: &Selection) -> Result<String, RenderError> {
        let text = TextReportRenderer::new();
        let report = JsonReport {
            entries: &selection.entries,
            aggregate: selection.aggregate.as_ref(),
            reports: text
                .render_by_date(selection)
                .into_iter()
                .map(|(date, body)| (format_date(date), body))
                .collect(),
            notices: selection.missing().map(|date| text.not_found_notice(date)).collect(),
            combined: text.render_combined(selection),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| RenderError::Format(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use hospedagem_core::DateOutcome;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    fn selection() -> Selection {
        let figures = Figures { beach: dec!(10), norte: dec!(20), torre: dec!(5), adicionais: dec!(0), total: dec!(35) };
        Selection {
            entries: vec![
                DateEntry {
                    date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                    outcome: DateOutcome::Found { figures },
                },
                DateEntry {
                    date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                    outcome: DateOutcome::NotFound,
                },
            ],
            aggregate: Some(figures),
        }
    }

    #[test]
    fn entries_are_tagged_by_status() {
        let json = JsonReportRenderer::new().render(&selection()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let entries = value["entries"].as_array().unwrap();
        assert_eq!(entries[0]["date"], "2025-01-01");
        assert_eq!(entries[0]["status"], "found");
        assert_eq!(entries[0]["figures"]["total"], "35");
        assert_eq!(entries[1]["status"], "not_found");
        assert!(entries[1].get("figures").is_none());
    }

    #[test]
    fn reports_and_notices() {
        let json = JsonReportRenderer::new().pretty().render(&selection()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert!(value["reports"]["2025-01-01"].as_str().unwrap().contains("Total: 35"));
        assert_eq!(value["notices"][0], "Data 2025-03-01 não encontrada no Excel.");
        assert!(value["combined"].as_str().unwrap().contains("Soma Total"));
        assert_eq!(value["aggregate"]["beach"], "10");
    }

    #[test]
    fn empty_selection_renders() {
        let json = JsonReportRenderer::new().render(&Selection::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value["entries"].as_array().unwrap().is_empty());
        assert!(value["aggregate"].is_null());
    }
}
