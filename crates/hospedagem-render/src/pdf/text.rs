//! Text block export
//!
//! The block is anchored at 10% from the left and top edges of a portrait
//! letter page, one PDF text line per input line.

use std::io::Cursor;

use hospedagem_core::{RenderError, ReportRenderer, Selection};

use super::{text_width, PageSize, PdfCanvas};
use crate::text::TextReportRenderer;

/// PDF renderer for a plain text block
#[derive(Clone, Debug)]
pub struct PdfTextRenderer {
    /// Minimum page size; the page grows when the text does not fit
    pub page: PageSize,
    /// Font size in points
    pub font_size: f32,
    /// Line advance as a multiple of the font size
    pub line_spacing: f32,
    /// Left offset as a fraction of the page width
    pub left: f32,
    /// Top offset as a fraction of the page height
    pub top: f32,
}

impl Default for PdfTextRenderer {
    fn default() -> Self {
        Self {
            page: PageSize::LETTER,
            font_size: 10.0,
            line_spacing: 1.2,
            left: 0.1,
            top: 0.1,
        }
    }
}

impl PdfTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the minimum page size
    pub fn page_size(mut self, page: PageSize) -> Self {
        self.page = page;
        self
    }

    /// Page size needed for `lines`, never smaller than the configured page
    fn fit_page(&self, lines: &[&str]) -> (PageSize, f32, f32) {
        let x = self.page.width * self.left;
        let y = self.page.height * self.top;
        let line_height = self.font_size * self.line_spacing;

        let widest = lines
            .iter()
            .map(|line| text_width(line, self.font_size))
            .fold(0.0_f32, f32::max);
        let needed_width = 2.0 * x + widest;
        let needed_height = 2.0 * y + lines.len() as f32 * line_height;

        let size = PageSize::new(self.page.width.max(needed_width), self.page.height.max(needed_height));
        (size, x, y)
    }

    /// Lay out `text` top-aligned on a single page
    pub fn render_text_document(&self, text: &str) -> Result<Cursor<Vec<u8>>, RenderError> {
        let lines: Vec<&str> = text.lines().collect();
        let (size, x, y) = self.fit_page(&lines);
        let line_height = self.font_size * self.line_spacing;

        let mut canvas = PdfCanvas::new(size, "text report");
        for (i, line) in lines.iter().enumerate() {
            canvas.text(x, y + i as f32 * line_height, self.font_size, line);
        }
        canvas.finish()
    }
}

impl ReportRenderer for PdfTextRenderer {
    type Output = Cursor<Vec<u8>>;

    /// Render the combined report of a selection
    fn render(&self, selection: &Selection) -> Result<Self::Output, RenderError> {
        let text = TextReportRenderer::new().render_combined(selection);
        self.render_text_document(&text)
    }
}
