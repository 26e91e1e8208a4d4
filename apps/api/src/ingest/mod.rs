// Input acquisition: job posting scrape + CV text extraction.
// Both stages must succeed before any paid generation call is made.

use thiserror::Error;

pub mod cv_reader;
pub mod web_scraper;

pub use cv_reader::read_cv;
pub use web_scraper::Scraper;

/// Failure to acquire one of the two pipeline inputs.
///
/// The `Display` text keeps the bracketed markers users already recognise,
/// so the message can be surfaced verbatim.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("[Scrape error] {0}")]
    Scrape(String),

    #[error("[CV read error] {0}")]
    CvRead(String),
}
