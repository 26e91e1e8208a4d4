use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::ingest::AcquisitionError;
use crate::llm_client::LlmError;
use crate::session::CredentialError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No API key saved. Save your OpenAI API key before generating.")]
    MissingCredential,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    /// Scrape or CV read failure. Display keeps the bracketed marker.
    #[error(transparent)]
    Acquisition(#[from] AcquisitionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MissingCredential => (
                StatusCode::UNAUTHORIZED,
                "MISSING_CREDENTIAL",
                self.to_string(),
            ),
            AppError::Credential(e) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", e.to_string()),
            AppError::Acquisition(e) => {
                tracing::warn!("Input acquisition failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    match e {
                        AcquisitionError::Scrape(_) => "SCRAPE_ERROR",
                        AcquisitionError::CvRead(_) => "CV_READ_ERROR",
                    },
                    e.to_string(),
                )
            }
            AppError::Llm(LlmError::MissingCredential) => (
                StatusCode::UNAUTHORIZED,
                "MISSING_CREDENTIAL",
                AppError::MissingCredential.to_string(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    format!("[OpenAI error] {e}"),
                )
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The document could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_scrape_error_surfaced_verbatim() {
        let (status, body) =
            body_of(AcquisitionError::Scrape("404 Not Found".to_string()).into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "SCRAPE_ERROR");
        assert_eq!(body["error"]["message"], "[Scrape error] 404 Not Found");
    }

    #[tokio::test]
    async fn test_cv_error_surfaced_verbatim() {
        let (status, body) =
            body_of(AcquisitionError::CvRead("bad xref".to_string()).into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["message"], "[CV read error] bad xref");
    }

    #[tokio::test]
    async fn test_llm_error_prefixed() {
        let err = LlmError::Api {
            status: 429,
            message: "Rate limit".to_string(),
        };
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("[OpenAI error]"));
        assert!(message.contains("Rate limit"));
    }

    #[tokio::test]
    async fn test_missing_credential_from_llm_is_unauthorized() {
        let (status, body) = body_of(LlmError::MissingCredential.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_CREDENTIAL");
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = body_of(anyhow::anyhow!("secret detail").into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"]["message"].as_str().unwrap().contains("secret"));
    }
}
