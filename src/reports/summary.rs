//! Summary report generator for shell output.
//!
//! Lists every fragment on its own line, marker first, followed by totals.

use super::{ReportError, ReportFormat, ReportGenerator, ReportMetadata};
use crate::model::{Comparison, FragmentKind};

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Summary reporter for shell output
pub struct SummaryReporter {
    /// Use colored output
    colored: bool,
}

impl SummaryReporter {
    /// Create a new summary reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Make control characters in fragment text visible on one line.
fn visible(text: &str) -> String {
    text.replace('\n', "\\n").replace('\r', "\\r").replace('\t', "\\t")
}

impl ReportGenerator for SummaryReporter {
    fn generate_report(
        &self,
        comparison: &Comparison,
        metadata: &ReportMetadata,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        lines.push(self.color("Response Diff", "bold"));
        lines.push(self.color("─".repeat(40).as_str(), "dim"));
        lines.push(format!("{}  {}", self.color("A:", "cyan"), metadata.url_a));
        lines.push(format!("{}  {}", self.color("B:", "cyan"), metadata.url_b));
        if !metadata.selectors.is_empty() {
            lines.push(format!(
                "{}  {}",
                self.color("Elements:", "cyan"),
                metadata.selectors.join(", ")
            ));
        }
        lines.push(format!(
            "{}  {}",
            self.color("Strategy:", "cyan"),
            comparison.strategy
        ));
        lines.push(String::new());

        if comparison.is_empty() {
            lines.push(self.color("No differences", "dim"));
            return Ok(lines.join("\n"));
        }

        for fragment in &comparison.fragments {
            let color = match fragment.kind {
                FragmentKind::Insertion => "green",
                FragmentKind::Deletion => "red",
            };
            let line = format!("{}{}", fragment.kind.marker(), visible(&fragment.text));
            lines.push(self.color(&line, color));
        }

        lines.push(String::new());
        let insertions = comparison.insertions();
        let deletions = comparison.deletions();
        lines.push(format!(
            "{} {}, {} {}",
            self.color(&format!("+{insertions}"), "green"),
            if insertions == 1 { "insertion" } else { "insertions" },
            self.color(&format!("-{deletions}"), "red"),
            if deletions == 1 { "deletion" } else { "deletions" },
        ));

        Ok(lines.join("\n"))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Summary
    }
}
