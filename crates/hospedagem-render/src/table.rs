//! Terminal rendering of a free-form table
//!
//! Columns are padded to their widest cell, measured in characters.
//!
//! ```text
//! Apto | Hóspede | Diárias
//! -----+---------+--------
//! 101  | Ana     | 3
//! ```

use hospedagem_core::{RenderError, Table, TableRenderer};

/// Text table renderer
#[derive(Clone, Debug)]
pub struct TextTableRenderer {
    /// Column separator
    pub separator: String,
}

impl Default for TextTableRenderer {
    fn default() -> Self {
        Self { separator: " | ".into() }
    }
}

impl TextTableRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn column_widths(table: &Table) -> Vec<usize> {
        (0..table.width())
            .map(|col| {
                let header = table.columns[col].chars().count();
                (0..table.height())
                    .map(|row| table.cell(row, col).chars().count())
                    .fold(header, usize::max)
            })
            .collect()
    }

    fn format_line(&self, cells: &[String], widths: &[usize]) -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect();
        padded.join(&self.separator).trim_end().to_string()
    }
}

impl TableRenderer for TextTableRenderer {
    type Output = String;

    fn render_table(&self, table: &Table) -> Result<String, RenderError> {
        if table.width() == 0 {
            return Ok(String::new());
        }

        let widths = Self::column_widths(table);
        let mut out = String::new();

        out.push_str(&self.format_line(&table.columns, &widths));
        out.push('\n');

        let rule_joint = self.separator.replace(|c: char| c != '|', "-").replace('|', "+");
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join(&rule_joint));
        out.push('\n');

        for row in &table.rows {
            out.push_str(&self.format_line(row, &widths));
            out.push('\n');
        }
        Ok(out)
    }
}
