use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; the API key can also be supplied at runtime.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Seeds the credential store at startup when present.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub llm_timeout: Duration,
    pub scrape_timeout: Duration,
    /// Largest job posting body the scraper will download.
    pub scrape_max_bytes: usize,
    /// TrueType font embedded into PDF exports. Missing file → core Helvetica.
    pub pdf_font_path: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com".to_string()),
            llm_timeout: Duration::from_secs(
                parse_env("LLM_TIMEOUT_SECS", 120u64)
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            scrape_timeout: Duration::from_secs(
                parse_env("SCRAPE_TIMEOUT_SECS", 20u64)
                    .context("SCRAPE_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            scrape_max_bytes: parse_env("SCRAPE_MAX_BYTES", 5 * 1024 * 1024usize)
                .context("SCRAPE_MAX_BYTES must be a byte count")?,
            pdf_font_path: optional_env("PDF_FONT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("assets/fonts/DejaVuSans.ttf")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            openai_api_key: None,
            openai_base_url: "https://api.openai.com".to_string(),
            llm_timeout: Duration::from_secs(120),
            scrape_timeout: Duration::from_secs(20),
            scrape_max_bytes: 5 * 1024 * 1024,
            pdf_font_path: PathBuf::from("assets/fonts/DejaVuSans.ttf"),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Returns the trimmed value of `key`, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}
