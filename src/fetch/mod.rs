//! Fetch layer: retrieves the two compared resources over HTTP.
//!
//! The comparison core only sees [`Fetcher`](crate::model::Fetcher); this
//! module provides the blocking `reqwest` implementation used by the CLI.

mod client;

pub use client::{HttpFetcher, HttpFetcherConfig};
