//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.

mod compare;

#[cfg(feature = "http")]
pub use compare::run_compare;
pub use compare::run_compare_with;

// Re-export config types used by handlers
pub use crate::config::CompareConfig;
