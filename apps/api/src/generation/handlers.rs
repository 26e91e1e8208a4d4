//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::generator::{
    generate_cover_letter, GenerateRequest, GenerateResponse, GenerationOptions,
};
use crate::generation::models::{default_model, resolve_model, ModelOption, MODEL_CATALOG};
use crate::generation::tone::Tone;
use crate::state::AppState;

const MISSING_INPUTS: &str = "Please provide both a job posting URL and a CV file.";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ToneOption {
    pub id: Tone,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub tones: Vec<ToneOption>,
    pub default_tone: Tone,
    pub models: &'static [ModelOption],
    pub default_model: &'static str,
}

/// Raw multipart fields of a Generate action, before validation.
#[derive(Debug, Default)]
pub struct CoverLetterForm {
    pub job_url: Option<String>,
    pub cv: Option<(String, Bytes)>,
    pub tone: Option<String>,
    pub model: Option<String>,
    pub highlight_gaps: Option<String>,
}

impl CoverLetterForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = CoverLetterForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "cv" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::Validation(format!("Could not read CV upload: {e}"))
                    })?;
                    form.cv = Some((file_name, bytes));
                }
                "job_url" | "tone" | "model" | "highlight_gaps" => {
                    let value = field.text().await.map_err(|e| {
                        AppError::Validation(format!("Could not read field '{name}': {e}"))
                    })?;
                    let slot = match name.as_str() {
                        "job_url" => &mut form.job_url,
                        "tone" => &mut form.tone,
                        "model" => &mut form.model,
                        _ => &mut form.highlight_gaps,
                    };
                    *slot = Some(value);
                }
                // Unknown fields are ignored.
                _ => {}
            }
        }
        Ok(form)
    }

    /// Validates the form into a pipeline request.
    ///
    /// A URL and a named CV file must both be present. Tone and model fall
    /// back to their defaults when blank.
    pub fn into_request(self) -> Result<GenerateRequest, AppError> {
        let job_url = self
            .job_url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        let cv = self.cv.filter(|(file_name, _)| !file_name.trim().is_empty());

        let (Some(job_url), Some((cv_file_name, cv_bytes))) = (job_url, cv) else {
            return Err(AppError::Validation(MISSING_INPUTS.to_string()));
        };

        let tone = match self.tone.as_deref().map(str::trim) {
            None | Some("") => Tone::default(),
            Some(t) => t.parse()?,
        };
        let model = resolve_model(self.model.as_deref())?;
        let highlight_gaps = parse_flag(self.highlight_gaps.as_deref())?;

        Ok(GenerateRequest {
            job_url,
            cv_file_name,
            cv_bytes,
            options: GenerationOptions {
                tone,
                model: model.id.to_string(),
                highlight_gaps,
            },
        })
    }
}

fn parse_flag(value: Option<&str>) -> Result<bool, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" || v.eq_ignore_ascii_case("on") => {
            Ok(true)
        }
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" || v.eq_ignore_ascii_case("off") => {
            Ok(false)
        }
        Some(v) => Err(AppError::Validation(format!(
            "highlight_gaps must be true or false, got '{v}'"
        ))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/options
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        tones: Tone::ALL
            .into_iter()
            .map(|t| ToneOption {
                id: t,
                label: t.label(),
            })
            .collect(),
        default_tone: Tone::default(),
        models: MODEL_CATALOG,
        default_model: default_model().id,
    })
}

/// POST /api/v1/cover-letter
///
/// Full pipeline: scrape posting → read CV → (gaps) → LLM generate → split.
/// Refuses to start without a saved API key so no scrape happens for nothing.
pub async fn handle_generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    if !state.credentials.is_present().await {
        return Err(AppError::MissingCredential);
    }

    let request = CoverLetterForm::from_multipart(multipart)
        .await?
        .into_request()?;

    let response =
        generate_cover_letter(&state.scraper, state.generator.as_ref(), request).await?;

    Ok(Json(response))
}
