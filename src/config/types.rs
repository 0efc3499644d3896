//! Configuration types for respdiff operations.
//!
//! [`AppConfig`] is the file-backed configuration; [`CompareConfig`] is the
//! fully resolved input of one `compare` run.

use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of redirects followed per request.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// CLI arguments are collected into [`CliOverrides`] and applied over the
/// file configuration with [`AppConfig::apply_overrides`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP request settings
    pub request: RequestConfig,
    /// Default element selectors
    pub compare: ElementConfig,
    /// Output configuration (format, file, colors)
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the request timeout.
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.request.timeout_secs = secs;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.request.user_agent = Some(user_agent.into());
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.request.headers.insert(name.into(), value.into());
        self
    }

    /// Set the element selectors.
    pub fn elements(mut self, elements: Vec<String>) -> Self {
        self.config.compare.elements = elements;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Sections
// ============================================================================

/// HTTP request settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RequestConfig {
    /// Request timeout in seconds, covering connect and body transfer
    pub timeout_secs: u64,
    /// User-Agent header (defaults to respdiff/<version>)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Maximum redirects to follow; 0 disables redirects
    pub max_redirects: usize,
    /// Extra headers sent to both sides
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            headers: BTreeMap::new(),
        }
    }
}

#[cfg(feature = "http")]
impl RequestConfig {
    /// Settings for the HTTP fetcher.
    #[must_use]
    pub fn to_fetcher_config(&self) -> crate::fetch::HttpFetcherConfig {
        let mut config = crate::fetch::HttpFetcherConfig {
            timeout: std::time::Duration::from_secs(self.timeout_secs),
            max_redirects: self.max_redirects,
            headers: self
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            ..Default::default()
        };
        if let Some(user_agent) = &self.user_agent {
            config.user_agent.clone_from(user_agent);
        }
        config
    }
}

/// Element selection. Empty means the bodies are compared as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ElementConfig {
    /// CSS selectors of the HTML elements to compare, in order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<String>,
}

impl ElementConfig {
    /// Selectors to hand to the classifier: `None` selects the JSON path.
    #[must_use]
    pub fn selectors(&self) -> Option<&[String]> {
        if self.elements.is_empty() {
            None
        } else {
            Some(&self.elements)
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Behavior flags for compare operations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with code 1 if any differences are detected
    pub fail_on_change: bool,
    /// Suppress non-essential output
    pub quiet: bool,
}

// ============================================================================
// CLI Overrides
// ============================================================================

/// Settings given explicitly on the command line.
///
/// `None` means the flag was absent, so the file value (or default) stays.
/// Boolean flags can only switch a setting on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub max_redirects: Option<usize>,
    /// Added to the file headers, replacing same-named entries
    pub headers: BTreeMap<String, String>,
    /// Replace the file selectors when non-empty
    pub elements: Vec<String>,
    pub format: Option<ReportFormat>,
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub fail_on_change: bool,
    pub quiet: bool,
}

// ============================================================================
// Command Configuration
// ============================================================================

/// URLs of the two compared resources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareUrls {
    /// Side A, usually the reference environment
    pub a: String,
    /// Side B
    pub b: String,
}

/// Configuration for one compare run
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// URLs to compare
    pub urls: CompareUrls,
    /// HTTP request settings
    pub request: RequestConfig,
    /// Element selectors
    pub compare: ElementConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl CompareConfig {
    /// Resolve a run from merged application settings.
    #[must_use]
    pub fn from_app(app: AppConfig, urls: CompareUrls) -> Self {
        Self {
            urls,
            request: app.request,
            compare: app.compare,
            output: app.output,
            behavior: app.behavior,
        }
    }
}

/// Builder for `CompareConfig`
#[derive(Debug, Default)]
pub struct CompareConfigBuilder {
    url_a: Option<String>,
    url_b: Option<String>,
    app: AppConfig,
}

impl CompareConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn url_a(mut self, url: impl Into<String>) -> Self {
        self.url_a = Some(url.into());
        self
    }

    #[must_use]
    pub fn url_b(mut self, url: impl Into<String>) -> Self {
        self.url_b = Some(url.into());
        self
    }

    #[must_use]
    pub fn element(mut self, selector: impl Into<String>) -> Self {
        self.app.compare.elements.push(selector.into());
        self
    }

    #[must_use]
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.app.output.format = format;
        self
    }

    #[must_use]
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.app.output.file = file;
        self
    }

    #[must_use]
    pub const fn timeout_secs(mut self, secs: u64) -> Self {
        self.app.request.timeout_secs = secs;
        self
    }

    #[must_use]
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.app.behavior.fail_on_change = fail;
        self
    }

    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.app.behavior.quiet = quiet;
        self
    }

    pub fn build(self) -> anyhow::Result<CompareConfig> {
        let a = self.url_a.ok_or_else(|| anyhow::anyhow!("URL of side A is required"))?;
        let b = self.url_b.ok_or_else(|| anyhow::anyhow!("URL of side B is required"))?;

        Ok(CompareConfig::from_app(self.app, CompareUrls { a, b }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_none_when_empty() {
        assert_eq!(ElementConfig::default().selectors(), None);
        let config = ElementConfig {
            elements: vec!["h1".to_string()],
        };
        assert_eq!(config.selectors(), Some(&["h1".to_string()][..]));
    }

    #[test]
    fn test_compare_config_builder_requires_urls() {
        assert!(CompareConfigBuilder::new().url_a("http://a").build().is_err());

        let config = CompareConfigBuilder::new()
            .url_a("http://a")
            .url_b("http://b")
            .element("title")
            .fail_on_change(true)
            .build()
            .unwrap();
        assert_eq!(config.urls.b, "http://b");
        assert_eq!(config.compare.elements, vec!["title".to_string()]);
        assert!(config.behavior.fail_on_change);
        assert_eq!(config.request.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_fetcher_config_mapping() {
        let app = AppConfig::builder()
            .timeout_secs(5)
            .user_agent("probe/1")
            .header("X-Env", "staging")
            .build();
        let fetcher = app.request.to_fetcher_config();
        assert_eq!(fetcher.timeout, std::time::Duration::from_secs(5));
        assert_eq!(fetcher.user_agent, "probe/1");
        assert_eq!(fetcher.headers, vec![("X-Env".to_string(), "staging".to_string())]);
    }

    #[test]
    fn test_yaml_defaults_fill_missing_sections() {
        let config: AppConfig = serde_yaml::from_str("compare:\n  elements: [h1]\n").unwrap();
        assert_eq!(config.compare.elements, vec!["h1".to_string()]);
        assert_eq!(config.request, RequestConfig::default());
        assert_eq!(config.output.format, ReportFormat::Summary);
    }
}
