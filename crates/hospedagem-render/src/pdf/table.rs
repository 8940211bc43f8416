//! Table export
//!
//! Draws the whole table as one centered grid: a shaded header row followed by
//! every body row, cell text centered. Column widths follow the widest cell;
//! both axes are stretched by the scale factors so small fonts stay legible.

use std::io::Cursor;

use hospedagem_core::{RenderError, Table, TableRenderer};
use tracing::debug;

use super::{text_width, PageSize, PdfCanvas};

/// PDF renderer for a free-form table
#[derive(Clone, Debug)]
pub struct PdfTableRenderer {
    /// Minimum page size; the page grows when the grid does not fit
    pub page: PageSize,
    /// Font size in points
    pub font_size: f32,
    /// Horizontal stretch applied to column widths
    pub scale_x: f32,
    /// Vertical stretch applied to row heights
    pub scale_y: f32,
    /// Horizontal padding inside each cell, in points
    pub cell_padding: f32,
    /// Space kept around the grid, in points
    pub margin: f32,
    /// Gray level of the header background
    pub header_gray: f32,
    /// Grid line width, in points
    pub line_width: f32,
}

impl Default for PdfTableRenderer {
    fn default() -> Self {
        Self {
            page: PageSize::WIDE,
            font_size: 5.0,
            scale_x: 1.5,
            scale_y: 1.5,
            cell_padding: 2.0,
            margin: 18.0,
            header_gray: 0.9,
            line_width: 0.3,
        }
    }
}

/// Computed grid geometry in layout coordinates
#[derive(Clone, Debug, PartialEq)]
struct GridLayout {
    page: PageSize,
    origin_x: f32,
    origin_y: f32,
    column_widths: Vec<f32>,
    row_height: f32,
}

impl GridLayout {
    fn width(&self) -> f32 {
        self.column_widths.iter().sum()
    }
}

impl PdfTableRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font size
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set horizontal and vertical stretch factors
    pub fn scale(mut self, x: f32, y: f32) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self
    }

    /// Set the minimum page size
    pub fn page_size(mut self, page: PageSize) -> Self {
        self.page = page;
        self
    }

    fn layout(&self, table: &Table) -> GridLayout {
        let column_widths: Vec<f32> = (0..table.width())
            .map(|col| {
                let header = text_width(&table.columns[col], self.font_size);
                let widest = (0..table.height())
                    .map(|row| text_width(table.cell(row, col), self.font_size))
                    .fold(header, f32::max);
                (widest + 2.0 * self.cell_padding) * self.scale_x
            })
            .collect();
        let row_height = self.font_size * 1.6 * self.scale_y;

        let grid_width: f32 = column_widths.iter().sum();
        let grid_height = if table.width() == 0 {
            0.0
        } else {
            (table.height() + 1) as f32 * row_height
        };

        let page = PageSize::new(
            self.page.width.max(grid_width + 2.0 * self.margin),
            self.page.height.max(grid_height + 2.0 * self.margin),
        );

        GridLayout {
            origin_x: (page.width - grid_width) / 2.0,
            origin_y: (page.height - grid_height) / 2.0,
            page,
            column_widths,
            row_height,
        }
    }

    fn draw_row(&self, canvas: &mut PdfCanvas, grid: &GridLayout, top: f32, cells: &[String]) {
        let mut x = grid.origin_x;
        for (cell, &width) in cells.iter().zip(&grid.column_widths) {
            canvas.stroke_rect(x, top, width, grid.row_height, self.line_width);
            let text_x = x + (width - text_width(cell, self.font_size)) / 2.0;
            let text_top = top + (grid.row_height - self.font_size) / 2.0;
            canvas.text(text_x, text_top, self.font_size, cell);
            x += width;
        }
    }

    /// Lay out the full table as a grid on a single page
    pub fn render_table_document(&self, table: &Table) -> Result<Cursor<Vec<u8>>, RenderError> {
        let grid = self.layout(table);
        debug!(
            columns = table.width(),
            rows = table.height(),
            page_width = grid.page.width,
            page_height = grid.page.height,
            "table layout"
        );

        let mut canvas = PdfCanvas::new(grid.page, "table");
        if table.width() > 0 {
            canvas.fill_rect(grid.origin_x, grid.origin_y, grid.width(), grid.row_height, self.header_gray);
            self.draw_row(&mut canvas, &grid, grid.origin_y, &table.columns);
            for (i, row) in table.rows.iter().enumerate() {
                let top = grid.origin_y + (i + 1) as f32 * grid.row_height;
                self.draw_row(&mut canvas, &grid, top, row);
            }
        }
        canvas.finish()
    }
}

impl TableRenderer for PdfTableRenderer {
    type Output = Cursor<Vec<u8>>;

    fn render_table(&self, table: &Table) -> Result<Self::Output, RenderError> {
        self.render_table_document(table)
    }
}
