//! Report output stage.

use crate::config::CompareConfig;
use crate::model::Comparison;
use crate::reports::{create_reporter_with_options, ReportMetadata};
use anyhow::Result;

use super::{should_use_color, write_output, OutputTarget};

/// Report metadata for a compare run.
#[must_use]
pub fn build_metadata(config: &CompareConfig) -> ReportMetadata {
    ReportMetadata::new(&config.urls.a, &config.urls.b).with_selectors(&config.compare.elements)
}

/// Output a comparison report to the configured destination.
pub fn output_report(config: &CompareConfig, comparison: &Comparison) -> Result<()> {
    let output_target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color, &output_target);
    let reporter = create_reporter_with_options(config.output.format, use_color);
    let report = reporter.generate_report(comparison, &build_metadata(config))?;

    write_output(&report, &output_target, config.behavior.quiet)
}
