//! Configuration module for respdiff.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use respdiff::config::AppConfig;
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .timeout_secs(10)
//!     .elements(vec!["title".into()])
//!     .fail_on_change(true)
//!     .build();
//!
//! // Load from file
//! use respdiff::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.respdiff.yaml` file in your project root or `~/.config/respdiff/`:
//!
//! ```yaml
//! request:
//!   timeout_secs: 10
//! compare:
//!   elements: [title, h1]
//! behavior:
//!   fail_on_change: true
//! ```

pub mod file;
mod types;
mod validation;

// Re-export main types
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, CliOverrides, CompareConfig,
    CompareConfigBuilder, CompareUrls, ElementConfig, OutputConfig, RequestConfig, DEFAULT_MAX_REDIRECTS,
    DEFAULT_TIMEOUT_SECS,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError, CONFIG_DIR_NAME, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.respdiff.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> crate::error::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
