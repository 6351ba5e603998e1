//! Single-shot page fetcher.
//!
//! Issues exactly one GET per URL with a bounded timeout and a browser-like
//! user agent. There is no retry loop: a failed fetch simply means the HTML
//! signals are unavailable for this request.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default fetch timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default `User-Agent` header, enough to get past trivial bot filters.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Why a page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("not an absolute http(s) URL: {0}")]
    InvalidUrl(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("response is not text (content-type {0})")]
    NonText(String),
    #[error("failed to read response body: {0}")]
    Body(String),
    #[error("request failed: {0}")]
    Request(String),
    #[error("fetching is disabled")]
    Disabled,
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Anything that can produce the HTML of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the raw page text. Every failure is reported as a `FetchError`.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Live HTTP fetcher backed by a shared `reqwest::Client`.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    timeout: Duration,
    user_agent: String,
}

impl HttpPageFetcher {
    /// Build a fetcher with the given timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            timeout,
            user_agent: user_agent.to_string(),
        })
    }

    /// Fetcher with the default 5 second timeout and `Mozilla/5.0` agent.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_USER_AGENT)
    }

    fn classify_error(&self, err: reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else if err.is_connect() {
            FetchError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            FetchError::Body(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl PageSource for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let target = parse_target(url)?;

        let resp = self
            .client
            .get(target)
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        debug!(url, status = resp.status().as_u16(), "page fetched");

        if let Some(ct) = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !is_textual(ct) {
                return Err(FetchError::NonText(ct.to_string()));
            }
        }

        resp.text().await.map_err(|e| self.classify_error(e))
    }
}

/// Source used when fetching is turned off; always reports `Disabled`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Offline;

#[async_trait]
impl PageSource for Offline {
    async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError::Disabled)
    }
}

fn parse_target(url: &str) -> Result<url::Url, FetchError> {
    let parsed = url::Url::parse(url.trim()).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        _ => Err(FetchError::InvalidUrl(url.to_string())),
    }
}

/// Whether a content type carries markup or text worth scanning.
fn is_textual(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime.is_empty()
        || mime.starts_with("text/")
        || mime == "application/xhtml+xml"
        || mime == "application/xml"
        || mime.ends_with("+xml")
        || mime == "application/json"
        || mime == "application/javascript"
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_is_textual() {
        assert!(is_textual("text/html; charset=utf-8"));
        assert!(is_textual("TEXT/PLAIN"));
        assert!(is_textual("application/xhtml+xml"));
        assert!(is_textual("image/svg+xml"));
        assert!(is_textual(""));
        assert!(!is_textual("image/png"));
        assert!(!is_textual("application/octet-stream"));
        assert!(!is_textual("application/pdf"));
    }

    #[test]
    fn test_parse_target() {
        assert!(parse_target("https://example.com/x").is_ok());
        assert!(parse_target("http://192.168.0.1/login?user=1").is_ok());
        assert!(matches!(parse_target("example.com"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(parse_target("ftp://example.com/"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(parse_target(""), Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent_and_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/login"))
            .and(header("user-agent", "Mozilla/5.0"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::with_defaults().unwrap();
        let body = fetcher
            .fetch(&format!("{}/login", server.uri()))
            .await
            .unwrap();
        assert!(body.contains("hi"));
    }

    #[tokio::test]
    async fn test_fetch_error_status_still_returns_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_raw("<iframe></iframe>", "text/html"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::with_defaults().unwrap();
        let body = fetcher.fetch(&server.uri()).await.unwrap();
        assert_eq!(body, "<iframe></iframe>");
    }

    #[tokio::test]
    async fn test_fetch_timeout_makes_single_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html></html>", "text/html")
                    .set_delay(Duration::from_secs(2)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::new(Duration::from_millis(100), DEFAULT_USER_AGENT).unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_rejects_binary_content() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8, 1, 2], "image/png"))
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::with_defaults().unwrap();
        let err = fetcher.fetch(&server.uri()).await.unwrap_err();
        assert!(matches!(err, FetchError::NonText(ct) if ct == "image/png"));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let fetcher = HttpPageFetcher::new(Duration::from_secs(2), DEFAULT_USER_AGENT).unwrap();
        let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
        assert!(matches!(err, FetchError::Connect(_) | FetchError::Request(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_never_hits_network() {
        let fetcher = HttpPageFetcher::with_defaults().unwrap();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_offline_source() {
        let err = Offline.fetch("https://example.com").await.unwrap_err();
        assert!(matches!(err, FetchError::Disabled));
    }
}
