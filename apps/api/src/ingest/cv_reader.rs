//! CV text extraction: turns an uploaded PDF or plain-text file into one string.

use std::panic;

use tracing::debug;

use crate::ingest::AcquisitionError;

/// Extracts the text content of an uploaded CV.
///
/// Files whose name ends in `.pdf` (any case) are parsed as PDF and their
/// pages concatenated in order. Anything else is decoded as UTF-8 with
/// undecodable byte sequences dropped. The result is trimmed.
///
/// PDF parsing is CPU-bound; async callers run this inside `spawn_blocking`.
pub fn read_cv(file_name: &str, bytes: &[u8]) -> Result<String, AcquisitionError> {
    let text = if file_name.to_lowercase().ends_with(".pdf") {
        extract_pdf_text(bytes)?
    } else {
        decode_utf8_dropping_invalid(bytes)
    };

    debug!(
        "Read CV '{}' ({} bytes → {} chars)",
        file_name,
        bytes.len(),
        text.chars().count()
    );
    Ok(text.trim().to_string())
}

fn extract_pdf_text(bytes: &[u8]) -> Result<String, AcquisitionError> {
    // pdf-extract panics instead of erroring on some malformed documents.
    match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(AcquisitionError::CvRead(e.to_string())),
        Err(_) => Err(AcquisitionError::CvRead(
            "PDF parser aborted on malformed document".to_string(),
        )),
    }
}

/// UTF-8 decode that skips invalid sequences instead of inserting U+FFFD.
fn decode_utf8_dropping_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}
