//! Cover letter export to Word and PDF.

use thiserror::Error;

pub mod docx;
pub mod font_metrics;
pub mod handlers;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("DOCX serialization failed: {0}")]
    Docx(String),

    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}
