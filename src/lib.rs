//! **Compare HTTP responses served from two places.**
//!
//! `respdiff` fetches the same resource from two URLs (say staging and
//! production) and reports how the responses differ, as a flat, ordered
//! list of insertion and deletion fragments.
//!
//! ## How a comparison is chosen
//!
//! - One side failed to fetch: the failure message is set against the other
//!   side's status line.
//! - Both sides failed: the two failure messages are text-diffed.
//! - Both succeeded without selectors: the bodies are diffed as JSON
//!   documents.
//! - Both succeeded with selectors: the text of each selected HTML element
//!   is diffed, selector by selector.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: fetch outcomes, [`DiffFragment`] and [`Comparison`].
//! - **[`compare`]**: the classifier, [`compare()`] and [`compare_urls`].
//! - **[`diff`]**: the text, JSON and HTML engines.
//! - **[`fetch`]**: a blocking HTTP [`Fetcher`] (feature `http`).
//! - **[`reports`]**: summary and JSON report generators.
//! - **[`config`]**: YAML configuration with discovery and validation.
//!
//! ## Comparing in-memory outcomes
//!
//! ```
//! use respdiff::{compare, DiffFragment, FetchError, Response};
//!
//! let a = Err(FetchError::new("dial tcp 10.0.0.1:80: connection refused"));
//! let b = Ok(Response::from_bytes(200, "200 OK", b"{}".to_vec()));
//!
//! let result = compare(a, b, None).unwrap();
//! assert_eq!(
//!     result.fragments,
//!     vec![
//!         DiffFragment::deletion(": connection refused"),
//!         DiffFragment::insertion("200 OK"),
//!     ]
//! );
//! ```
//!
//! ## Comparing two URLs
//!
//! ```no_run
//! use respdiff::{compare_urls, HttpFetcher, HttpFetcherConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = HttpFetcher::new(HttpFetcherConfig::default())?;
//!     let selectors = vec!["title".to_string(), "h1".to_string()];
//!     let result = compare_urls(
//!         &fetcher,
//!         "https://staging.example.com/",
//!         "https://www.example.com/",
//!         Some(selectors.as_slice()),
//!     )?;
//!
//!     for fragment in &result.fragments {
//!         println!("{fragment}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::unwrap_used)]

pub mod cli;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
#[cfg(feature = "http")]
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod utils;

// Re-export main types for convenience
pub use compare::{compare, compare_urls, trim_error_host};
pub use config::{AppConfig, CompareConfig};
pub use diff::{diff_json, diff_text, Delta, HtmlDocument, TextDiffer};
pub use error::{ErrorContext, RespDiffError, Result};
#[cfg(feature = "http")]
pub use fetch::{HttpFetcher, HttpFetcherConfig};
pub use model::{
    Comparison, DiffFragment, FetchError, FetchOutcome, Fetcher, FragmentKind, Response, Side,
    Strategy,
};
pub use reports::{ReportFormat, ReportGenerator};
