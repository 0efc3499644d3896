//! Blocking HTTP fetcher.

use crate::error::{FetchErrorKind, RespDiffError, Result};
use crate::model::{FetchError, FetchOutcome, Fetcher, Response};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use std::time::Duration;

/// HTTP fetcher configuration.
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Request timeout, covering connect and body transfer
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
    /// Maximum redirects to follow (0 disables redirects)
    pub max_redirects: usize,
    /// Extra headers sent with every request
    pub headers: Vec<(String, String)>,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
            max_redirects: 10,
            headers: Vec::new(),
        }
    }
}

/// Fetches resources with a blocking `reqwest` client.
pub struct HttpFetcher {
    client: Client,
}

/// Helper to convert header parse errors
fn header_error(name: &str, reason: impl ToString) -> RespDiffError {
    RespDiffError::fetch(
        "building default headers",
        FetchErrorKind::InvalidHeader {
            name: name.to_string(),
            reason: reason.to_string(),
        },
    )
}

impl HttpFetcher {
    /// Create a new fetcher.
    pub fn new(config: HttpFetcherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| header_error(name, e))?;
            let header_value = HeaderValue::from_str(value).map_err(|e| header_error(name, e))?;
            headers.insert(header_name, header_value);
        }

        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .redirect(redirect)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                RespDiffError::fetch(
                    "Failed to create HTTP client",
                    FetchErrorKind::ClientBuild(e.to_string()),
                )
            })?;

        Ok(Self { client })
    }
}

/// Status line text as `"<code> <reason>"`, or just the code when the
/// reason phrase is unknown.
fn status_text(status: reqwest::StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> FetchOutcome {
        let response = self.client.get(url).send().map_err(|e| {
            tracing::debug!("GET {} failed: {}", url, e);
            FetchError::from_error(&e)
        })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        tracing::debug!("GET {} -> {}", url, status);

        Ok(Response::new(status.as_u16(), status_text(status), response).with_headers(headers))
    }
}
