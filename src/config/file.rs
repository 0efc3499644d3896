//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, CliOverrides};
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".respdiff.yaml",
    ".respdiff.yml",
    "respdiff.yaml",
    "respdiff.yml",
];

/// Directory under the user config directory holding the global config.
pub const CONFIG_DIR_NAME: &str = "respdiff";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/respdiff/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    if let Some(path) = cwd.as_deref().and_then(find_config_in_dir) {
        return Some(path);
    }

    if let Some(path) = cwd
        .as_deref()
        .and_then(find_git_root)
        .and_then(|root| find_config_in_dir(&root))
    {
        return Some(path);
    }

    if let Some(path) = dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .and_then(|dir| find_config_in_dir(&dir))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up from `start`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// File not found
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error reading file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Apply command-line settings over this configuration.
    ///
    /// Every flag that was given wins, even when it equals the default.
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        // Request config
        if let Some(secs) = overrides.timeout_secs {
            self.request.timeout_secs = secs;
        }
        if overrides.user_agent.is_some() {
            self.request.user_agent.clone_from(&overrides.user_agent);
        }
        if let Some(max) = overrides.max_redirects {
            self.request.max_redirects = max;
        }
        self.request.headers.extend(
            overrides
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );

        // Selectors replace rather than accumulate
        if !overrides.elements.is_empty() {
            self.compare.elements.clone_from(&overrides.elements);
        }

        // Output config
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if overrides.output_file.is_some() {
            self.output.file.clone_from(&overrides.output_file);
        }
        if overrides.no_color {
            self.output.no_color = true;
        }

        // Behavior config (flags can only switch on)
        if overrides.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if overrides.quiet {
            self.behavior.quiet = true;
        }
    }

    /// Load from file and apply CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &CliOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.apply_overrides(overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# respdiff configuration
# Place this file at .respdiff.yaml in your project root or ~/.config/respdiff/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# respdiff configuration file
# ============================
#
# Place it at:
#   - .respdiff.yaml in your project root
#   - ~/.config/respdiff/respdiff.yaml for global config
#
# CLI arguments always override file settings.

# HTTP requests
request:
  # Timeout in seconds for each side
  timeout_secs: 30
  # User-Agent header (default: respdiff/<version>)
  # user_agent: respdiff-probe
  # Redirects to follow; 0 disables redirects
  max_redirects: 10
  # Extra headers sent to both sides
  # headers:
  #   Accept: application/json

# What to compare
compare:
  # CSS selectors of HTML elements to compare, in order.
  # Leave empty to compare the bodies as JSON, e.g. [title, h1]
  elements: []

# Output configuration
output:
  # Format: summary, json
  format: summary
  # Output file path (omit for stdout)
  # file: diff.json
  # Disable colored output
  no_color: false

# Behavior flags
behavior:
  # Exit with code 1 if any differences are detected
  fail_on_change: false
  # Suppress non-essential output
  quiet: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS};
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".respdiff.yaml");
        std::fs::write(&config_path, "compare:\n  elements: [h1]\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_find_git_root_walks_up() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(find_git_root(&nested), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.yaml");
        std::fs::write(&path, "behavior:\n  quiet: true\n").unwrap();
        assert_eq!(discover_config_file(Some(&path)), Some(path));
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r#"
request:
  timeout_secs: 5
  headers:
    Accept: application/json
compare:
  elements: ["title", "h1"]
output:
  format: json
behavior:
  fail_on_change: true
"#;
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.request.timeout_secs, 5);
        assert_eq!(
            config.request.headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(config.compare.elements, vec!["title", "h1"]);
        assert_eq!(config.output.format, ReportFormat::Json);
        assert!(config.behavior.fail_on_change);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        std::fs::write(&path, "request: [unclosed").unwrap();
        assert!(matches!(
            load_config_file(&path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_falls_back_on_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.yaml");
        std::fs::write(&path, "output:\n  format: sarif\n").unwrap();
        let (config, loaded_from) = load_or_default(Some(&path));
        assert_eq!(config, AppConfig::default());
        assert_eq!(loaded_from, None);
    }

    #[test]
    fn test_apply_overrides() {
        let mut base = AppConfig::builder()
            .timeout_secs(5)
            .header("Accept", "application/json")
            .elements(vec!["h1".to_string()])
            .build();
        let overrides = CliOverrides {
            headers: [("X-Env".to_string(), "prod".to_string())].into(),
            elements: vec!["title".to_string()],
            format: Some(ReportFormat::Json),
            fail_on_change: true,
            ..CliOverrides::default()
        };

        base.apply_overrides(&overrides);

        assert_eq!(base.request.timeout_secs, 5);
        assert_eq!(base.request.headers.len(), 2);
        assert_eq!(base.compare.elements, vec!["title".to_string()]);
        assert_eq!(base.output.format, ReportFormat::Json);
        assert!(base.behavior.fail_on_change);
        assert!(!base.behavior.quiet);
    }

    #[test]
    fn test_absent_overrides_keep_file_values() {
        let mut base = AppConfig::builder()
            .timeout_secs(10)
            .elements(vec!["h1".into()])
            .output_format(ReportFormat::Json)
            .build();
        let expected = base.clone();
        base.apply_overrides(&CliOverrides::default());
        assert_eq!(base, expected);
    }

    #[test]
    fn test_explicit_default_values_override_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("respdiff.yaml");
        std::fs::write(
            &path,
            "request:\n  timeout_secs: 10\n  max_redirects: 0\noutput:\n  format: json\n",
        )
        .unwrap();
        let overrides = CliOverrides {
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            max_redirects: Some(DEFAULT_MAX_REDIRECTS),
            format: Some(ReportFormat::Summary),
            ..CliOverrides::default()
        };

        let (config, loaded_from) = AppConfig::from_file_with_overrides(Some(&path), &overrides);

        assert_eq!(loaded_from, Some(path));
        assert_eq!(config.request.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.request.max_redirects, DEFAULT_MAX_REDIRECTS);
        assert_eq!(config.output.format, ReportFormat::Summary);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("request:"));
        assert!(example.contains("timeout_secs: 30"));
    }

    #[test]
    fn test_full_example_config_parses() {
        let config: AppConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
