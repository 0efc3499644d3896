//! Fetch outcomes handed to the comparison core.

use crate::error::{RespDiffError, Result};
use std::fmt;
use std::io::Read;

/// Which of the two compared resources a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// A successful fetch: status line, headers and a single-use body stream.
///
/// The body is consumed by [`Response::read_body`], which takes `self`, so a
/// response can be drained at most once.
pub struct Response {
    status_code: u16,
    status: String,
    headers: Vec<(String, String)>,
    body: Box<dyn Read + Send>,
}

impl Response {
    /// Build a response from a status code, status text and body stream.
    pub fn new(status_code: u16, status: impl Into<String>, body: impl Read + Send + 'static) -> Self {
        Self {
            status_code,
            status: status.into(),
            headers: Vec::new(),
            body: Box::new(body),
        }
    }

    /// Build a response whose body is already in memory.
    pub fn from_bytes(status_code: u16, status: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status_code, status, std::io::Cursor::new(body.into()))
    }

    /// Attach response headers.
    #[must_use]
    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Status text as shown on the wire, e.g. `"200 OK"`.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Drain the body stream completely.
    pub fn read_body(mut self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.body
            .read_to_end(&mut buf)
            .map_err(|e| RespDiffError::body(format!("status {}", self.status), e))?;
        Ok(buf)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status_code", &self.status_code)
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// A failed fetch, carrying the full error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Flatten an error and its source chain into one `a: b: c` message.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.ends_with(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self { message }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FetchError {}

/// Outcome of fetching one side.
pub type FetchOutcome = std::result::Result<Response, FetchError>;

/// The external collaborator that retrieves a resource.
pub trait Fetcher {
    /// Fetch `url`. Failures are returned as values, never panics.
    fn fetch(&self, url: &str) -> FetchOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_fetch_error_flattens_chain() {
        let err = Outer(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));
        let fetch_err = FetchError::from_error(&err);
        assert_eq!(
            fetch_err.message(),
            "error sending request: connection refused"
        );
    }

    #[test]
    fn test_read_body_once() {
        let resp = Response::from_bytes(200, "200 OK", b"{\"a\":1}".to_vec());
        assert_eq!(resp.status(), "200 OK");
        assert_eq!(resp.read_body().unwrap(), b"{\"a\":1}");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let resp = Response::from_bytes(200, "200 OK", Vec::new())
            .with_headers(vec![("Content-Type".into(), "text/html".into())]);
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.header("etag"), None);
    }

    #[test]
    fn test_read_body_failure() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "reset"))
            }
        }
        let resp = Response::new(200, "200 OK", Broken);
        assert!(matches!(
            resp.read_body(),
            Err(RespDiffError::Body { .. })
        ));
    }
}
