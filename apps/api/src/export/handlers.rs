//! Axum route handlers for the Export API.

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::docx::{render_docx, DocxLayout, DOCX_FILE_NAME, DOCX_MIME};
use crate::export::pdf::{render_pdf, PDF_FILE_NAME, PDF_MIME};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Cover letter text, usually the `cover_letter` field of a generation response.
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct DocxQuery {
    #[serde(default)]
    pub layout: DocxLayout,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letter/export/docx[?layout=single]
pub async fn handle_export_docx(
    Query(query): Query<DocxQuery>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let layout = query.layout;
    let bytes = tokio::task::spawn_blocking(move || render_docx(&request.text, layout))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("DOCX export task failed: {e}")))??;

    info!("Exported DOCX: {} bytes, layout={layout:?}", bytes.len());
    Ok(attachment(DOCX_MIME, DOCX_FILE_NAME, bytes))
}

/// POST /api/v1/cover-letter/export/pdf
///
/// Uses the configured TrueType font when it loads, core Helvetica otherwise.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let font_path = state.config.pdf_font_path.clone();
    let export = tokio::task::spawn_blocking(move || render_pdf(&request.text, &font_path))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF export task failed: {e}")))??;

    info!(
        "Exported PDF: {} bytes, font={:?}",
        export.bytes.len(),
        export.font
    );
    Ok(attachment(PDF_MIME, PDF_FILE_NAME, export.bytes))
}

fn attachment(mime: &'static str, file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
