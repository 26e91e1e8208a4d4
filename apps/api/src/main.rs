mod config;
mod errors;
mod export;
mod generation;
mod ingest;
mod llm_client;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ingest::Scraper;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::CredentialStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ApplyBuddy API v{}", env!("CARGO_PKG_VERSION"));

    // Session credential (optionally seeded from OPENAI_API_KEY)
    let credentials = CredentialStore::seeded(config.openai_api_key.clone());
    if credentials.is_present().await {
        info!("API key seeded from environment");
    } else {
        warn!("No API key configured; generation is disabled until one is saved");
    }

    // Initialize job posting scraper
    let scraper = Scraper::new(config.scrape_timeout, config.scrape_max_bytes)?;
    info!(
        "Scraper initialized (timeout: {:?}, max body: {} bytes)",
        config.scrape_timeout, config.scrape_max_bytes
    );

    // Initialize LLM client
    let llm = LlmClient::new(
        &config.openai_base_url,
        config.llm_timeout,
        credentials.clone(),
    )?;
    info!("LLM client initialized (endpoint: {})", config.openai_base_url);

    if !config.pdf_font_path.exists() {
        warn!(
            "PDF font {} not found; PDF export will use core Helvetica",
            config.pdf_font_path.display()
        );
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        credentials,
        scraper,
        generator: Arc::new(llm),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
