//! JSON report generator.

use super::{ReportError, ReportFormat, ReportGenerator, ReportMetadata};
use crate::model::{Comparison, DiffFragment, Strategy};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_report(
        &self,
        comparison: &Comparison,
        metadata: &ReportMetadata,
    ) -> Result<String, ReportError> {
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: env!("CARGO_PKG_NAME").to_string(),
                    version: metadata.tool_version.clone(),
                },
                generated_at: Utc::now().to_rfc3339(),
                url_a: metadata.url_a.clone(),
                url_b: metadata.url_b.clone(),
                selectors: metadata.selectors.clone(),
            },
            summary: JsonSummary {
                strategy: comparison.strategy,
                identical: comparison.is_empty(),
                insertions: comparison.insertions(),
                deletions: comparison.deletions(),
            },
            fragments: comparison.fragments.clone(),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };
        json.map_err(|e| ReportError::SerializationError(e.to_string()))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// ============================================================================
// JSON report structures
// ============================================================================

/// Full report document
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiffReport {
    pub metadata: JsonReportMetadata,
    pub summary: JsonSummary,
    pub fragments: Vec<DiffFragment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReportMetadata {
    pub tool: ToolInfo,
    pub generated_at: String,
    pub url_a: String,
    pub url_b: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selectors: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    pub strategy: Strategy,
    pub identical: bool,
    pub insertions: usize,
    pub deletions: usize,
}
