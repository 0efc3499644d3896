//! Pipeline orchestration for compare runs.
//!
//! Shared fetch → compare → report plumbing used by the CLI handlers.

mod output;
mod report_stage;

pub use output::{should_use_color, write_output, OutputTarget};
pub use report_stage::{build_metadata, output_report};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no differences detected (or --fail-on-change not set)
    pub const SUCCESS: i32 = 0;
    /// Differences were detected with --fail-on-change
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
