//! Output Splitter: pulls the cover letter out of a free-text completion.
//!
//! The model is asked to follow a template but nothing enforces it. The splitter
//! never fails: when the expected header is missing, the whole completion is the letter.

use crate::generation::prompts::{COVER_LETTER_MARKER, CV_IMPROVEMENT_MARKER};

/// Returns the cover-letter section of `completion`, trimmed.
///
/// - No `COVER LETTER:` (any case) → the whole completion.
/// - Otherwise → text after that header up to the next `CV IMPROVEMENT`
///   (any case), or to the end when there is none.
pub fn extract_cover_letter(completion: &str) -> String {
    // ASCII upper-casing keeps byte offsets aligned with `completion`.
    let upper = completion.to_ascii_uppercase();

    let Some(start) = upper.find(COVER_LETTER_MARKER) else {
        return completion.trim().to_string();
    };
    let body_start = start + COVER_LETTER_MARKER.len();

    let body_end = upper[body_start..]
        .find(CV_IMPROVEMENT_MARKER)
        .map(|offset| body_start + offset)
        .unwrap_or(completion.len());

    completion[body_start..body_end].trim().to_string()
}
