//! Job posting scraper: fetches a URL and reduces the HTML to visible text.

use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use tracing::{debug, warn};

use crate::ingest::AcquisitionError;

/// User-agent sent with every posting fetch. Some job boards reject requests without one.
pub const USER_AGENT: &str = "Mozilla/5.0 (JobGenie/1.0)";

/// Elements whose text content never reaches the output.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript"];

/// Fetches job postings over HTTP. Cheap to clone (shares the connection pool).
#[derive(Clone)]
pub struct Scraper {
    client: Client,
    timeout: Duration,
    /// Upper bound on the response body; larger postings are rejected.
    max_body_bytes: usize,
}

impl Scraper {
    pub fn new(timeout: Duration, max_body_bytes: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            timeout,
            max_body_bytes,
        })
    }

    /// Issues one GET for `url` and returns the page's visible text.
    ///
    /// Transport failures, timeouts, non-2xx statuses and bodies over
    /// `max_body_bytes` all map to `AcquisitionError::Scrape`. No retries.
    pub async fn scrape(&self, url: &str) -> Result<String, AcquisitionError> {
        let mut response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("Scrape of {url} failed: {e}");
                AcquisitionError::Scrape(e.to_string())
            })?;

        let too_large = || {
            warn!("Scrape of {url} aborted: body exceeds {} bytes", self.max_body_bytes);
            AcquisitionError::Scrape(format!(
                "response body exceeds {} bytes",
                self.max_body_bytes
            ))
        };
        if response
            .content_length()
            .is_some_and(|len| len > self.max_body_bytes as u64)
        {
            return Err(too_large());
        }

        let mut raw = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| AcquisitionError::Scrape(e.to_string()))?
        {
            if raw.len() + chunk.len() > self.max_body_bytes {
                return Err(too_large());
            }
            raw.extend_from_slice(&chunk);
        }
        let body = String::from_utf8_lossy(&raw);

        let text = visible_text(&body);
        debug!(
            "Scraped {url}: {} bytes of HTML → {} lines of text",
            body.len(),
            text.lines().count()
        );
        Ok(text)
    }
}

/// Reduces an HTML document to its visible text.
///
/// Every text node outside `<script>`, `<style>` and `<noscript>` is emitted on
/// its own line in document order; lines are trimmed and blank ones dropped.
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        raw.push_str(text);
        raw.push('\n');
    }

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::header, http::StatusCode, routing::get, Router};
    use std::net::SocketAddr;

    async fn serve(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn scraper() -> Scraper {
        Scraper::new(Duration::from_secs(5), 1024 * 1024).unwrap()
    }

    #[test]
    fn test_script_style_noscript_never_leak() {
        let html = r#"<html><head><style>body { color: red }</style>
            <script>var secret = "tracking";</script></head>
            <body><noscript>Enable JavaScript</noscript>
            <h1>Backend Engineer</h1><p>Build APIs</p>
            <script type="application/ld+json">{"jobTitle":"hidden"}</script></body></html>"#;
        let text = visible_text(html);
        assert_eq!(text, "Backend Engineer\nBuild APIs");
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Enable JavaScript"));
        assert!(!text.contains("hidden"));
    }

    #[test]
    fn test_blank_lines_dropped_and_lines_trimmed() {
        let html = "<div>\n   first   \n\n\n<span>  second </span></div><p>   </p>";
        assert_eq!(visible_text(html), "first\nsecond");
    }

    #[test]
    fn test_document_order_kept_without_dedup() {
        let html = "<ul><li>Rust</li><li>Go</li><li>Rust</li></ul>";
        assert_eq!(visible_text(html), "Rust\nGo\nRust");
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(visible_text("<p>R&amp;D &lt;team&gt;</p>"), "R&D <team>");
    }

    #[tokio::test]
    async fn test_scrape_success_returns_visible_text() {
        let app = Router::new().route(
            "/job",
            get(|headers: axum::http::HeaderMap| async move {
                let ua = headers
                    .get(header::USER_AGENT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                (
                    [(header::CONTENT_TYPE, "text/html")],
                    format!("<html><body><script>ignored</script><p>UA={ua}</p></body></html>"),
                )
            }),
        );
        let addr = serve(app).await;

        let text = scraper().scrape(&format!("http://{addr}/job")).await.unwrap();
        assert_eq!(text, format!("UA={USER_AGENT}"));
    }

    #[tokio::test]
    async fn test_scrape_http_status_error_is_sentinel() {
        let app = Router::new().route(
            "/gone",
            get(|| async { (StatusCode::NOT_FOUND, "<p>Not here</p>") }),
        );
        let addr = serve(app).await;

        let err = scraper()
            .scrape(&format!("http://{addr}/gone"))
            .await
            .unwrap_err();
        assert!(matches!(err, AcquisitionError::Scrape(_)));
        assert!(err.to_string().starts_with("[Scrape error]"));
    }

    #[tokio::test]
    async fn test_scrape_server_error_is_sentinel() {
        let app = Router::new().route(
            "/boom",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let addr = serve(app).await;

        let err = scraper()
            .scrape(&format!("http://{addr}/boom"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("[Scrape error]"));
    }

    #[tokio::test]
    async fn test_scrape_connection_refused_is_sentinel() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = scraper()
            .scrape(&format!("http://{addr}/"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("[Scrape error]"));
    }

    #[tokio::test]
    async fn test_scrape_timeout_is_sentinel() {
        let app = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                "<p>too late</p>"
            }),
        );
        let addr = serve(app).await;

        let slow = Scraper::new(Duration::from_millis(100), 1024 * 1024).unwrap();
        let err = slow
            .scrape(&format!("http://{addr}/slow"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("[Scrape error]"));
    }

    #[tokio::test]
    async fn test_scrape_oversized_body_rejected() {
        let app = Router::new().route(
            "/huge",
            get(|| async { format!("<p>{}</p>", "x".repeat(64 * 1024)) }),
        );
        let addr = serve(app).await;

        let small = Scraper::new(Duration::from_secs(5), 16 * 1024).unwrap();
        let err = small
            .scrape(&format!("http://{addr}/huge"))
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("[Scrape error]"));
        assert!(err.to_string().contains("exceeds 16384 bytes"));
    }

    #[tokio::test]
    async fn test_scrape_streamed_body_over_cap_rejected() {
        use axum::body::Body;
        use futures_util::stream;

        // Chunked response without Content-Length.
        let app = Router::new().route(
            "/stream",
            get(|| async {
                let chunks = (0..8).map(|_| Ok::<_, std::io::Error>("y".repeat(4096)));
                Body::from_stream(stream::iter(chunks))
            }),
        );
        let addr = serve(app).await;

        let small = Scraper::new(Duration::from_secs(5), 10_000).unwrap();
        let err = small
            .scrape(&format!("http://{addr}/stream"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exceeds 10000 bytes"));
    }

    #[tokio::test]
    async fn test_scrape_malformed_url_is_sentinel() {
        let err = scraper().scrape("not a url").await.unwrap_err();
        assert!(err.to_string().starts_with("[Scrape error]"));
    }
}
