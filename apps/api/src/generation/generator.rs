//! Cover letter generation: orchestrates the full pipeline.
//!
//! Flow: scrape posting → read CV → (optional) keyword gaps →
//!       compose prompt → LLM generate → split out the cover letter.
//!
//! Both acquisition steps must succeed before the paid LLM call is made.

use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::generation::keyword_gaps::{analyze_gaps, GapReport};
use crate::generation::prompts::COVER_LETTER_PROMPT_TEMPLATE;
use crate::generation::splitter::extract_cover_letter;
use crate::generation::tone::Tone;
use crate::ingest::{read_cv, Scraper};
use crate::llm_client::prompts::CAREER_COACH_SYSTEM;
use crate::llm_client::TextGenerator;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// The recognised pipeline options. One pipeline serves every combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub tone: Tone,
    /// Provider model id, already resolved against the catalog.
    pub model: String,
    pub highlight_gaps: bool,
}

/// Inputs collected from one Generate action.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub job_url: String,
    pub cv_file_name: String,
    pub cv_bytes: Bytes,
    pub options: GenerationOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    /// Full completion text, as returned by the model.
    pub output: String,
    /// The part of `output` offered for export.
    pub cover_letter: String,
    pub model: String,
    pub tone: Tone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_report: Option<GapReport>,
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt composition
// ────────────────────────────────────────────────────────────────────────────

/// Builds the single instruction block sent as the user message.
pub fn compose_prompt(job_description: &str, cv_text: &str, tone: Tone) -> String {
    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("{tone}", tone.label()),
            ("{job_description}", job_description),
            ("{cv_text}", cv_text),
        ],
    )
}

/// Single-pass placeholder substitution. Inserted values are never rescanned,
/// so a posting that happens to contain `{cv_text}` stays literal.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(
        template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>(),
    );
    let mut rest = template;

    'scan: while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        for (key, value) in values {
            if let Some(after) = rest.strip_prefix(key) {
                out.push_str(value);
                rest = after;
                continue 'scan;
            }
        }
        out.push('{');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full pipeline for one Generate action.
///
/// Steps:
/// 1. scraper.scrape() → posting text        (halts on AcquisitionError::Scrape)
/// 2. read_cv()        → CV text             (halts on AcquisitionError::CvRead)
/// 3. analyze_gaps()   → GapReport           (only when highlight_gaps is set)
/// 4. compose_prompt() + generator.complete() (halts on LlmError)
/// 5. extract_cover_letter()                 (never fails)
pub async fn generate_cover_letter(
    scraper: &Scraper,
    generator: &dyn TextGenerator,
    request: GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    let GenerateRequest {
        job_url,
        cv_file_name,
        cv_bytes,
        options,
    } = request;

    // Step 1: Scrape posting
    info!("Scraping job posting {job_url}");
    let job_description = scraper.scrape(&job_url).await?;

    // Step 2: Extract CV text (PDF parsing is CPU-bound)
    let cv_text = tokio::task::spawn_blocking(move || read_cv(&cv_file_name, &cv_bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("CV extraction task failed: {e}")))??;
    info!(
        "Inputs acquired: posting={} chars, cv={} chars",
        job_description.chars().count(),
        cv_text.chars().count()
    );

    // Step 3: Keyword gaps
    let gap_report = options
        .highlight_gaps
        .then(|| analyze_gaps(&job_description, &cv_text));

    // Step 4: Generate
    let prompt = compose_prompt(&job_description, &cv_text, options.tone);
    info!(
        "Requesting completion: model={}, tone={}",
        options.model, options.tone
    );
    let output = generator
        .complete(&options.model, CAREER_COACH_SYSTEM, &prompt)
        .await?;

    // Step 5: Split
    let cover_letter = extract_cover_letter(&output);
    info!(
        "Generation complete: output={} chars, cover_letter={} chars",
        output.chars().count(),
        cover_letter.chars().count()
    );

    Ok(GenerateResponse {
        output,
        cover_letter,
        model: options.model,
        tone: options.tone,
        gap_report,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
