//! Text extraction from HTML responses.

use crate::error::{RespDiffError, Result};
use scraper::{Html, Selector};

/// A response body parsed once into a queryable document tree.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parse a body. Invalid UTF-8 is replaced rather than rejected; the
    /// parser itself recovers from malformed markup.
    #[must_use]
    pub fn parse(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        Self {
            html: Html::parse_document(&text),
        }
    }

    /// Concatenated descendant text of every element matching `selector`,
    /// in document order. No match yields an empty string.
    pub fn extract_text(&self, selector: &str) -> Result<String> {
        let parsed = Selector::parse(selector)
            .map_err(|e| RespDiffError::invalid_selector(selector, e.to_string()))?;
        let mut text = String::new();
        let mut matched = 0usize;
        for element in self.html.select(&parsed) {
            matched += 1;
            text.extend(element.text());
        }
        tracing::trace!(selector, matched, "extracted element text");
        Ok(text)
    }
}

impl std::fmt::Debug for HtmlDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlDocument").finish_non_exhaustive()
    }
}
