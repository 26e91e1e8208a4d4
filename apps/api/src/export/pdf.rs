//! PDF exporter: one wrapped text cell per line on A4 pages with automatic page breaks.
//!
//! When the configured TrueType font loads, it is embedded and the text keeps
//! full Unicode. Otherwise the core Helvetica font is used and the text is
//! reduced to ASCII first (core fonts only cover Latin-1).

use std::borrow::Cow;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};
use tracing::debug;

use crate::export::font_metrics::{GlyphMetrics, HELVETICA};
use crate::export::ExportError;

pub const PDF_MIME: &str = "application/pdf";
pub const PDF_FILE_NAME: &str = "cover_letter.pdf";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
/// Left, right and top margin.
const MARGIN_MM: f32 = 10.0;
/// Bottom margin that triggers an automatic page break.
const AUTO_PAGE_BREAK_MM: f32 = 15.0;
/// Horizontal padding inside a text cell.
const CELL_PADDING_MM: f32 = 1.0;
const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_MM: f32 = 8.0;
const MM_PER_PT: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfFont {
    /// The configured TrueType font, embedded.
    Embedded,
    /// Core Helvetica with ASCII-sanitized text.
    CoreHelvetica,
}

#[derive(Debug)]
pub struct PdfExport {
    pub bytes: Vec<u8>,
    pub font: PdfFont,
}

/// Replaces common typographic punctuation with ASCII look-alikes, then drops
/// every remaining non-ASCII character.
pub fn sanitize_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2019}' | '\u{2018}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2022}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            c if c.is_ascii() => out.push(c),
            _ => {}
        }
    }
    out
}

/// Lays `text` out into pages of rows. Every `\n`-separated line is wrapped to
/// the usable width; a row that would cross the bottom break margin starts a new page.
pub fn paginate(text: &str, metrics: &GlyphMetrics<'_>) -> Vec<Vec<String>> {
    let font_size_mm = FONT_SIZE_PT * MM_PER_PT;
    let max_width_em = (PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM) / font_size_mm;
    let page_limit = PAGE_HEIGHT_MM - AUTO_PAGE_BREAK_MM;

    let mut pages = vec![Vec::new()];
    let mut y = MARGIN_MM;

    for line in text.split('\n') {
        let line = line.trim_end_matches('\r');
        for row in metrics.wrap_line(line, max_width_em) {
            if y + LINE_HEIGHT_MM > page_limit {
                pages.push(Vec::new());
                y = MARGIN_MM;
            }
            if let Some(page) = pages.last_mut() {
                page.push(row);
            }
            y += LINE_HEIGHT_MM;
        }
    }
    pages
}

/// Renders the cover letter to PDF bytes.
///
/// `font_path` is optional in practice: a missing or unparseable file selects the
/// core-font fallback and is never an error.
pub fn render_pdf(text: &str, font_path: &Path) -> Result<PdfExport, ExportError> {
    let (doc, first_page, first_layer) =
        PdfDocument::new("Cover Letter", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let font_data = std::fs::read(font_path).ok();
    let embedded = font_data
        .as_deref()
        .and_then(|data| embed_font(&doc, data));

    let (font_ref, metrics, body, font) = match embedded {
        Some((font_ref, face)) => (
            font_ref,
            GlyphMetrics::Face(face),
            Cow::Borrowed(text),
            PdfFont::Embedded,
        ),
        None => {
            debug!(
                "PDF font {} unavailable, falling back to {}",
                font_path.display(),
                HELVETICA.name
            );
            let font_ref = doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ExportError::Pdf(e.to_string()))?;
            (
                font_ref,
                GlyphMetrics::Table(&HELVETICA),
                Cow::Owned(sanitize_ascii(text)),
                PdfFont::CoreHelvetica,
            )
        }
    };

    let pages = paginate(&body, &metrics);
    let font_size_mm = FONT_SIZE_PT * MM_PER_PT;

    for (index, rows) in pages.iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);

        let mut top = MARGIN_MM;
        for row in rows {
            if !row.is_empty() {
                // Baseline roughly centred in the cell.
                let baseline = top + LINE_HEIGHT_MM / 2.0 + 0.3 * font_size_mm;
                layer.use_text(
                    row.as_str(),
                    FONT_SIZE_PT,
                    Mm(MARGIN_MM + CELL_PADDING_MM),
                    Mm(PAGE_HEIGHT_MM - baseline),
                    &font_ref,
                );
            }
            top += LINE_HEIGHT_MM;
        }
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    debug!(
        "Rendered PDF: {} pages, {} bytes, font={:?}",
        pages.len(),
        bytes.len(),
        font
    );
    Ok(PdfExport { bytes, font })
}

fn embed_font<'a>(
    doc: &PdfDocumentReference,
    data: &'a [u8],
) -> Option<(IndirectFontRef, ttf_parser::Face<'a>)> {
    let face = ttf_parser::Face::parse(data, 0).ok()?;
    let font_ref = doc.add_external_font(data).ok()?;
    Some((font_ref, face))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn missing_font() -> PathBuf {
        PathBuf::from("/nonexistent/fonts/DejaVuSans.ttf")
    }

    #[test]
    fn test_sanitize_maps_smart_punctuation() {
        let input = "\u{2019}\u{2018}\u{201C}\u{201D}\u{2013}\u{2014}\u{2022}\u{2026}";
        assert_eq!(sanitize_ascii(input), "''\"\"--*...");
    }

    #[test]
    fn test_sanitize_strips_other_non_ascii() {
        assert_eq!(sanitize_ascii("Café – naïve 日本 🚀 ok"), "Caf - nave   ok");
    }

    #[test]
    fn test_sanitize_keeps_ascii_untouched() {
        let ascii = "Dear team,\n\tI'm \"ready\" - 100%!";
        assert_eq!(sanitize_ascii(ascii), ascii);
    }

    #[test]
    fn test_missing_font_falls_back_to_core_font() {
        let export = render_pdf("Grüße “quoted” — 日本語 • done…", &missing_font()).unwrap();
        assert_eq!(export.font, PdfFont::CoreHelvetica);
        assert!(export.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_core_font_output_contains_sanitized_text() {
        let export = render_pdf(
            "Dear team, “thanks” — Grüße\n\nSecond line",
            &missing_font(),
        )
        .unwrap();
        let text = pdf_extract::extract_text_from_mem(&export.bytes).unwrap();
        assert!(text.contains("Dear team, \"thanks\" - Gre"), "got {text:?}");
        assert!(text.contains("Second line"), "got {text:?}");
        assert!(!text.contains('ü'));
        assert!(!text.contains('“'));
    }

    #[test]
    fn test_unparseable_font_falls_back_to_core_font() {
        let mut junk = tempfile::NamedTempFile::new().unwrap();
        junk.write_all(b"this is not a truetype font").unwrap();

        let export = render_pdf("Hello", junk.path()).unwrap();
        assert_eq!(export.font, PdfFont::CoreHelvetica);
    }

    #[test]
    fn test_empty_text_renders() {
        let export = render_pdf("", &missing_font()).unwrap();
        assert!(export.bytes.starts_with(b"%PDF"));
    }

    #[test]
    #[ignore = "needs DejaVu Sans at /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"]
    fn test_embedded_font_when_available() {
        let system_font = PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
        assert!(system_font.exists(), "font not found at {system_font:?}");
        let export = render_pdf("Grüße — 日本", &system_font).unwrap();
        assert_eq!(export.font, PdfFont::Embedded);
        assert!(export.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_paginate_breaks_at_bottom_margin() {
        let text = vec!["line"; 100].join("\n");
        let pages = paginate(&text, &GlyphMetrics::Table(&HELVETICA));
        // 10mm top, 8mm rows, break once a row would pass 297 - 15 = 282mm → 34 rows/page.
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].len(), 34);
        assert_eq!(pages[1].len(), 34);
        assert_eq!(pages[2].len(), 32);
    }

    #[test]
    fn test_paginate_keeps_blank_lines_as_rows() {
        let pages = paginate("Dear team,\n\nThanks\r\n", &GlyphMetrics::Table(&HELVETICA));
        assert_eq!(pages, vec![vec!["Dear team,", "", "Thanks", ""]]);
    }

    #[test]
    fn test_paginate_wraps_long_lines() {
        let long = "word ".repeat(200);
        let pages = paginate(long.trim_end(), &GlyphMetrics::Table(&HELVETICA));
        assert!(pages[0].len() > 1);
    }
}
