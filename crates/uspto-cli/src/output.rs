//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};
use uspto_pipeline::{ErrorRecord, RunMetrics};

/// Longest error message shown in the table; JSON keeps the full text.
const MESSAGE_WIDTH: usize = 80;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the run summary.
    pub fn format_metrics(&self, metrics: &RunMetrics) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(metrics)?),
            OutputFormat::Table => Ok(self.format_metrics_table(metrics)),
            OutputFormat::Quiet => Ok(format!("{} {}", metrics.succeeded, metrics.errored)),
        }
    }

    /// Format totals, then failures, as tables.
    fn format_metrics_table(&self, metrics: &RunMetrics) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Metric", "Value"]);

        let rows = [
            ("Succeeded", metrics.succeeded.to_string()),
            ("Errored", metrics.errored.to_string()),
            ("Attempted", metrics.attempted.to_string()),
            ("Skipped (sequence listings)", metrics.skipped.to_string()),
            ("Files read", metrics.files_processed.to_string()),
            ("Files failed", metrics.files_failed.to_string()),
            ("Batches flushed", metrics.batches_flushed.to_string()),
            ("Batches failed", metrics.batches_failed.to_string()),
            ("Elapsed", format!("{:.1}s", metrics.elapsed_seconds)),
            ("Docs/second", format!("{:.1}", metrics.docs_per_second())),
        ];
        for (name, value) in rows {
            builder.push_record([name.to_string(), value]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut sections = vec![table.to_string()];

        if !metrics.errors.is_empty() {
            sections.push(self.warning(&format!("{} failure(s)", metrics.errors.len())));
            sections.push(self.format_errors_table(&metrics.errors));
        }

        let verdict = format!(
            "Success Count: {}, Error Count: {}",
            metrics.succeeded, metrics.errored
        );
        if metrics.errored == 0 && metrics.files_failed == 0 {
            sections.push(self.success(&verdict));
        } else {
            sections.push(self.error(&verdict));
        }

        sections.join("\n")
    }

    /// Format failures as a table.
    fn format_errors_table(&self, errors: &[ErrorRecord]) -> String {
        let mut builder = Builder::default();
        builder.push_record(["#", "File", "Title", "Kind", "Message"]);

        for error in errors {
            builder.push_record([
                error.index.map_or_else(|| "-".to_string(), |i| i.to_string()),
                error.file.clone(),
                error.title.clone().unwrap_or_default(),
                error.kind.clone(),
                truncate(&error.message, MESSAGE_WIDTH),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}
