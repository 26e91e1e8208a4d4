pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(generation::handle_options))
        // Session credential
        .route(
            "/api/v1/credential",
            get(session::handle_credential_status)
                .put(session::handle_set_credential)
                .delete(session::handle_clear_credential),
        )
        // Cover letter
        .route("/api/v1/cover-letter", post(generation::handle_generate))
        .route(
            "/api/v1/cover-letter/export/docx",
            post(export::handle_export_docx),
        )
        .route(
            "/api/v1/cover-letter/export/pdf",
            post(export::handle_export_pdf),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}
