//! Configuration validation for respdiff.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, BehaviorConfig, CompareConfig, ElementConfig, OutputConfig, RequestConfig};
use scraper::Selector;

/// Upper bound for `request.timeout_secs`.
const MAX_TIMEOUT_SECS: u64 = 3600;

/// Upper bound for `request.max_redirects`.
const MAX_REDIRECTS: usize = 50;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.request.validate());
        errors.extend(self.compare.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for CompareConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for (field, url) in [("urls.a", &self.urls.a), ("urls.b", &self.urls.b)] {
            if url.trim().is_empty() {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: "URL must not be empty".to_string(),
                });
            }
        }
        errors.extend(self.request.validate());
        errors.extend(self.compare.validate());
        errors.extend(self.output.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

/// RFC 7230 token characters, the alphabet of header names.
fn is_header_token(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b))
}

impl Validatable for RequestConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            errors.push(ConfigError {
                field: "request.timeout_secs".to_string(),
                message: format!(
                    "Timeout must be between 1 and {MAX_TIMEOUT_SECS} seconds, got {}",
                    self.timeout_secs
                ),
            });
        }

        if self.max_redirects > MAX_REDIRECTS {
            errors.push(ConfigError {
                field: "request.max_redirects".to_string(),
                message: format!(
                    "At most {MAX_REDIRECTS} redirects can be followed, got {}",
                    self.max_redirects
                ),
            });
        }

        if let Some(user_agent) = &self.user_agent {
            if user_agent.trim().is_empty() {
                errors.push(ConfigError {
                    field: "request.user_agent".to_string(),
                    message: "User agent must not be empty".to_string(),
                });
            }
        }

        for (name, value) in &self.headers {
            if !is_header_token(name) {
                errors.push(ConfigError {
                    field: format!("request.headers.{name}"),
                    message: format!("Invalid header name '{name}'"),
                });
            }
            if value.contains(['\r', '\n']) {
                errors.push(ConfigError {
                    field: format!("request.headers.{name}"),
                    message: "Header value must not contain line breaks".to_string(),
                });
            }
        }

        errors
    }
}

impl Validatable for ElementConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(i, selector)| {
                Selector::parse(selector).err().map(|e| ConfigError {
                    field: format!("compare.elements[{i}]"),
                    message: format!("Invalid selector '{selector}': {e}"),
                })
            })
            .collect()
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(parent) = self.file.as_deref().and_then(std::path::Path::parent) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                errors.push(ConfigError {
                    field: "output.file".to_string(),
                    message: format!("Parent directory does not exist: {}", parent.display()),
                });
            }
        }

        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Only boolean flags
        Vec::new()
    }
}
