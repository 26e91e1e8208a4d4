//! Word (.docx) exporter.

use std::io::Cursor;

use docx_rust::document::{Break, Paragraph, Run, TextSpace};
use docx_rust::Docx;
use serde::Deserialize;

use crate::export::ExportError;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DOCX_FILE_NAME: &str = "cover_letter.docx";

/// How the cover letter is broken into Word paragraphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocxLayout {
    /// One paragraph per blank-line-separated block.
    #[default]
    Paragraphs,
    /// The whole text as a single paragraph; blank lines become consecutive line breaks.
    Single,
}

/// Splits `text` into the paragraphs written for `layout`.
pub fn split_paragraphs(text: &str, layout: DocxLayout) -> Vec<&str> {
    match layout {
        DocxLayout::Paragraphs => text.split("\n\n").collect(),
        DocxLayout::Single => vec![text],
    }
}

/// One Word paragraph holding a single run. Every `\n` inside the block
/// becomes a line break and whitespace is kept verbatim. Empty lines are
/// bare breaks.
fn paragraph_of(block: &str) -> Paragraph<'_> {
    let mut run = Run::default();
    for (i, line) in block.split('\n').enumerate() {
        if i > 0 {
            run = run.push_break(Break::default());
        }
        let line = line.trim_end_matches('\r');
        if !line.is_empty() {
            run = run.push_text((line, TextSpace::Preserve));
        }
    }
    Paragraph::default().push(run)
}

/// Serializes the cover letter to an in-memory .docx file.
pub fn render_docx(text: &str, layout: DocxLayout) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::default();
    for block in split_paragraphs(text, layout) {
        docx.document.push(paragraph_of(block));
    }

    let cursor = docx
        .write(Cursor::new(Vec::new()))
        .map_err(|e| ExportError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}
