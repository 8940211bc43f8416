//! PDF export
//!
//! Both exporters draw onto a single-page [`PdfCanvas`] and return the
//! serialized document as an in-memory buffer positioned at offset 0.
//!
//! Layout uses the standard Helvetica font (no embedding), so text widths are
//! estimated from an average glyph width. Pages grow to fit their content;
//! content larger than the PDF page limit is scaled down with a warning
//! instead of failing.

mod table;
mod text;

pub use table::PdfTableRenderer;
pub use text::PdfTextRenderer;

use std::io::Cursor;

use hospedagem_core::RenderError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use tracing::warn;

/// Largest page side a PDF viewer is required to accept, in points
pub const MAX_PAGE_DIMENSION: f32 = 14_400.0;

/// Average Helvetica glyph width as a fraction of the font size
const AVERAGE_GLYPH_WIDTH: f32 = 0.55;

/// Page dimensions in points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter portrait, 8.5 x 11 in
    pub const LETTER: PageSize = PageSize { width: 612.0, height: 792.0 };

    /// 12 x 8 in landscape, used for wide tables
    pub const WIDE: PageSize = PageSize { width: 864.0, height: 576.0 };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Estimated rendered width of `text` at `font_size`
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVERAGE_GLYPH_WIDTH
}

/// Encode text for a WinAnsi Type1 font; characters outside Latin-1 become `?`
pub(crate) fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn pdf_error(e: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(e.to_string())
}

/// One page of drawing operations in layout coordinates
///
/// Layout coordinates put the origin at the top-left corner with y growing
/// downwards. They are flipped to PDF space when operations are recorded.
pub(crate) struct PdfCanvas {
    size: PageSize,
    scale: f32,
    content: Content,
}

impl PdfCanvas {
    /// Start a page of `size`, shrinking it to the PDF page limit if needed
    pub(crate) fn new(size: PageSize, what: &str) -> Self {
        let longest = size.width.max(size.height);
        let scale = if longest > MAX_PAGE_DIMENSION {
            let scale = MAX_PAGE_DIMENSION / longest;
            warn!(
                width = size.width,
                height = size.height,
                scale,
                "{what} exceeds the PDF page limit, shrinking to fit"
            );
            scale
        } else {
            1.0
        };

        let mut content = Content { operations: vec![] };
        if scale < 1.0 {
            content.operations.push(Operation::new(
                "cm",
                vec![scale.into(), 0.into(), 0.into(), scale.into(), 0.into(), 0.into()],
            ));
        }
        Self { size, scale, content }
    }

    pub(crate) fn size(&self) -> PageSize {
        self.size
    }

    pub(crate) fn scale(&self) -> f32 {
        self.scale
    }

    /// Draw one line of text with its top edge at `top`
    pub(crate) fn text(&mut self, x: f32, top: f32, font_size: f32, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let baseline = self.size.height - (top + font_size * 0.8);
        let ops = &mut self.content.operations;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new("Tf", vec!["F1".into(), font_size.into()]));
        ops.push(Operation::new("Td", vec![x.into(), baseline.into()]));
        ops.push(Operation::new("Tj", vec![Object::string_literal(to_win_ansi(text))]));
        ops.push(Operation::new("ET", vec![]));
    }

    /// Fill a rectangle with a gray level (0 = black, 1 = white)
    pub(crate) fn fill_rect(&mut self, x: f32, top: f32, width: f32, height: f32, gray: f32) {
        let y = self.size.height - (top + height);
        let ops = &mut self.content.operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("g", vec![gray.into()]));
        ops.push(Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    /// Outline a rectangle
    pub(crate) fn stroke_rect(&mut self, x: f32, top: f32, width: f32, height: f32, line_width: f32) {
        let y = self.size.height - (top + height);
        let ops = &mut self.content.operations;
        ops.push(Operation::new("w", vec![line_width.into()]));
        ops.push(Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]));
        ops.push(Operation::new("S", vec![]));
    }

    /// Serialize the page as a one-page document
    pub(crate) fn finish(self) -> Result<Cursor<Vec<u8>>, RenderError> {
        let media_width = self.size.width * self.scale;
        let media_height = self.size.height * self.scale;

        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let encoded = self.content.encode().map_err(pdf_error)?;
        let content_id = document.add_object(Stream::new(Dictionary::new(), encoded));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), media_width.into(), media_height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        document.save_to(&mut buffer).map_err(pdf_error)?;
        Ok(Cursor::new(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_keeps_latin1() {
        assert_eq!(to_win_ansi("Relatório"), b"Relat\xf3rio".to_vec());
        assert_eq!(to_win_ansi("não"), b"n\xe3o".to_vec());
        assert_eq!(to_win_ansi("→ ok"), b"? ok".to_vec());
    }

    #[test]
    fn text_width_scales_with_font() {
        assert_eq!(text_width("", 10.0), 0.0);
        assert!(text_width("abcd", 10.0) > text_width("abcd", 5.0));
        assert_eq!(text_width("ó", 10.0), text_width("o", 10.0));
    }

    #[test]
    fn blank_canvas_is_a_valid_document() {
        let canvas = PdfCanvas::new(PageSize::LETTER, "test page");
        assert_eq!(canvas.scale(), 1.0);
        let buffer = canvas.finish().unwrap();
        assert_eq!(buffer.position(), 0);

        let bytes = buffer.into_inner();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn oversized_canvas_is_scaled_down() {
        let canvas = PdfCanvas::new(PageSize::new(612.0, MAX_PAGE_DIMENSION * 2.0), "test page");
        assert_eq!(canvas.scale(), 0.5);
        assert_eq!(canvas.size().height, MAX_PAGE_DIMENSION * 2.0);

        let bytes = canvas.finish().unwrap().into_inner();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let media_box = doc
            .get_dictionary(page_id)
            .unwrap()
            .get(b"MediaBox")
            .unwrap()
            .as_array()
            .unwrap()
            .clone();
        assert_eq!(media_box[3].as_float().unwrap(), MAX_PAGE_DIMENSION);
    }
}
