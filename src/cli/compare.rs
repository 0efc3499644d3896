//! Compare command handler.
//!
//! Implements the `compare` subcommand for diffing two URLs.

use crate::compare::compare_urls;
use crate::config::{CompareConfig, Validatable};
use crate::model::{Comparison, Fetcher};
use crate::pipeline::{exit_codes, output_report};
use anyhow::{Context, Result};

/// Run the compare command over the HTTP fetcher, returning the exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
#[cfg(feature = "http")]
#[allow(clippy::needless_pass_by_value)]
pub fn run_compare(config: CompareConfig) -> Result<i32> {
    let fetcher = crate::fetch::HttpFetcher::new(config.request.to_fetcher_config())
        .context("failed to set up HTTP client")?;
    run_compare_with(&config, &fetcher)
}

/// Run the compare command with any [`Fetcher`].
pub fn run_compare_with(config: &CompareConfig, fetcher: &impl Fetcher) -> Result<i32> {
    let errors = config.validate();
    if !errors.is_empty() {
        let list: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", list.join("\n  "));
    }

    let quiet = config.behavior.quiet;
    if !quiet {
        tracing::info!("Comparing {} with {}", config.urls.a, config.urls.b);
    }

    let comparison = compare_urls(
        fetcher,
        &config.urls.a,
        &config.urls.b,
        config.compare.selectors(),
    )
    .context("comparison failed")?;

    if !quiet {
        tracing::info!(
            "{} strategy: {} insertions, {} deletions",
            comparison.strategy,
            comparison.insertions(),
            comparison.deletions()
        );
    }

    output_report(config, &comparison)?;

    Ok(determine_exit_code(config, &comparison))
}

/// Determine the appropriate exit code based on the result and config flags.
fn determine_exit_code(config: &CompareConfig, comparison: &Comparison) -> i32 {
    if config.behavior.fail_on_change && !comparison.is_empty() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompareConfigBuilder;
    use crate::model::{FetchError, FetchOutcome, Response};
    use crate::reports::ReportFormat;
    use tempfile::TempDir;

    struct StaticFetcher;

    impl Fetcher for StaticFetcher {
        fn fetch(&self, url: &str) -> FetchOutcome {
            match url {
                "http://a" => Ok(Response::from_bytes(200, "200 OK", br#"{"v":1}"#.to_vec())),
                "http://b" => Ok(Response::from_bytes(200, "200 OK", br#"{"v":2}"#.to_vec())),
                _ => Err(FetchError::new(format!("get {url}: connection refused"))),
            }
        }
    }

    fn config(tmp: &TempDir, url_b: &str, fail_on_change: bool) -> CompareConfig {
        CompareConfigBuilder::new()
            .url_a("http://a")
            .url_b(url_b)
            .output_format(ReportFormat::Json)
            .output_file(Some(tmp.path().join("out.json")))
            .fail_on_change(fail_on_change)
            .quiet(true)
            .build()
            .unwrap()
    }

    #[test]
    fn test_exit_code_with_fail_on_change() {
        let tmp = TempDir::new().unwrap();
        let code = run_compare_with(&config(&tmp, "http://b", true), &StaticFetcher).unwrap();
        assert_eq!(code, exit_codes::CHANGES_DETECTED);
    }

    #[test]
    fn test_exit_code_without_fail_on_change() {
        let tmp = TempDir::new().unwrap();
        let code = run_compare_with(&config(&tmp, "http://b", false), &StaticFetcher).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn test_identical_sides_succeed() {
        let tmp = TempDir::new().unwrap();
        let code = run_compare_with(&config(&tmp, "http://a", true), &StaticFetcher).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let mut config = config(&tmp, "http://b", false);
        config.compare.elements.push("[".to_string());
        let err = run_compare_with(&config, &StaticFetcher).unwrap_err();
        assert!(err.to_string().contains("compare.elements[0]"));
    }
}
