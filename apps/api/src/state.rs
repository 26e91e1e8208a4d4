use std::sync::Arc;

use crate::config::Config;
use crate::ingest::Scraper;
use crate::llm_client::TextGenerator;
use crate::session::CredentialStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Session-scoped API key. Shared with the production `LlmClient`.
    pub credentials: CredentialStore,
    pub scraper: Scraper,
    /// Chat-completion backend. Default: `LlmClient`. Tests swap in stubs.
    pub generator: Arc<dyn TextGenerator>,
}
