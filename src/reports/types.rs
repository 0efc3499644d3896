//! Report type definitions.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable fragment listing
    #[default]
    Summary,
    /// Structured JSON output
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Summary => write!(f, "summary"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// What was compared, carried alongside the result into reports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// URL of side A
    pub url_a: String,
    /// URL of side B
    pub url_b: String,
    /// Element selectors, empty for a JSON comparison
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<String>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new(url_a: impl Into<String>, url_b: impl Into<String>) -> Self {
        Self {
            url_a: url_a.into(),
            url_b: url_b.into(),
            selectors: Vec::new(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    #[must_use]
    pub fn with_selectors(mut self, selectors: &[String]) -> Self {
        self.selectors = selectors.to_vec();
        self
    }
}
