//! Axum route handlers for the credential lifecycle.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SetCredentialRequest {
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct CredentialStatus {
    pub present: bool,
}

/// GET /api/v1/credential
pub async fn handle_credential_status(State(state): State<AppState>) -> Json<CredentialStatus> {
    Json(CredentialStatus {
        present: state.credentials.is_present().await,
    })
}

/// PUT /api/v1/credential
///
/// Saves (or replaces) the API key for the rest of the session.
pub async fn handle_set_credential(
    State(state): State<AppState>,
    Json(request): Json<SetCredentialRequest>,
) -> Result<StatusCode, AppError> {
    state.credentials.set(&request.api_key).await?;
    info!("API key saved");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/credential
pub async fn handle_clear_credential(State(state): State<AppState>) -> StatusCode {
    state.credentials.clear().await;
    info!("API key cleared");
    StatusCode::NO_CONTENT
}
