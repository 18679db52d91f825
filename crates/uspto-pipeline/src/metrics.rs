//! Metrics collection for pipeline runs

use serde::Serialize;
use std::fmt;

/// One retained failure, with enough context for offline triage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRecord {
    /// Source file
    pub file: String,

    /// Run-wide sequence number of the document (absent for file failures)
    pub index: Option<usize>,

    /// Best-effort invention title
    pub title: Option<String>,

    /// Failure category (`field-extraction`, `schema-validation`, `sink`, `file`, ...)
    pub kind: String,

    /// Error message
    pub message: String,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = self
            .index
            .map_or_else(|| "-".to_string(), |i| i.to_string());
        write!(
            f,
            "({}, {}, {}, {}: {})",
            index,
            self.title.as_deref().unwrap_or("None"),
            self.file,
            self.kind,
            self.message
        )
    }
}

/// Totals collected during a run
///
/// `attempted == succeeded + errored` once the run is done. Skipped sequence
/// listings are counted separately and belong to neither side.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunMetrics {
    /// Documents extracted or failed
    pub attempted: usize,

    /// Documents committed by the sink
    pub succeeded: usize,

    /// Documents discarded or lost with a failed batch
    pub errored: usize,

    /// Sequence listings passed over
    pub skipped: usize,

    /// Files read
    pub files_processed: usize,

    /// Files that could not be read
    pub files_failed: usize,

    /// Successful sink flushes
    pub batches_flushed: usize,

    /// Failed sink flushes
    pub batches_failed: usize,

    /// Processing time in seconds
    pub elapsed_seconds: f64,

    /// Every failure, in the order it happened
    pub errors: Vec<ErrorRecord>,
}

impl RunMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a skipped sequence listing
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Record a document that failed extraction
    pub fn record_document_error(&mut self, error: ErrorRecord) {
        self.attempted += 1;
        self.errored += 1;
        self.errors.push(error);
    }

    /// Record a committed batch of `count` documents
    pub fn record_flush(&mut self, count: usize) {
        self.attempted += count;
        self.succeeded += count;
        self.batches_flushed += 1;
    }

    /// Record a failed batch; every document in it is errored
    pub fn record_flush_failure(&mut self, errors: Vec<ErrorRecord>) {
        self.attempted += errors.len();
        self.errored += errors.len();
        self.batches_failed += 1;
        self.errors.extend(errors);
    }

    /// Record a file that was read
    pub fn record_file(&mut self) {
        self.files_processed += 1;
    }

    /// Record a file that could not be read
    pub fn record_file_failure(&mut self, error: ErrorRecord) {
        self.files_failed += 1;
        self.errors.push(error);
    }

    /// Documents per second over the run
    pub fn docs_per_second(&self) -> f64 {
        if self.elapsed_seconds > 0.0 {
            self.attempted as f64 / self.elapsed_seconds
        } else {
            0.0
        }
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Load Summary".to_string(),
            "============".to_string(),
            format!("Success Count: {}", self.succeeded),
            format!("Error Count: {}", self.errored),
            format!("Attempted: {}", self.attempted),
            format!("Skipped (sequence listings): {}", self.skipped),
            format!(
                "Files: {} read, {} failed",
                self.files_processed, self.files_failed
            ),
            format!(
                "Batches: {} flushed, {} failed",
                self.batches_flushed, self.batches_failed
            ),
            format!(
                "Elapsed: {:.1}s ({:.1} docs/s)",
                self.elapsed_seconds,
                self.docs_per_second()
            ),
        ];

        if !self.errors.is_empty() {
            lines.push(String::new());
            lines.push("Errors:".to_string());
            for error in &self.errors {
                lines.push(format!("  {}", error));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(kind: &str) -> ErrorRecord {
        ErrorRecord {
            file: "ipg180102.xml".to_string(),
            index: Some(3),
            title: Some("Widget".to_string()),
            kind: kind.to_string(),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_metrics_creation() {
        let metrics = RunMetrics::new();
        assert_eq!(metrics.attempted, 0);
        assert_eq!(metrics.succeeded, 0);
        assert_eq!(metrics.errored, 0);
        assert!(metrics.errors.is_empty());
    }

    #[test]
    fn test_counts_stay_balanced() {
        let mut metrics = RunMetrics::new();
        metrics.record_document_error(error("field-extraction"));
        metrics.record_flush(49);
        metrics.record_flush_failure(vec![error("sink"), error("sink")]);
        metrics.record_skip();

        assert_eq!(metrics.attempted, 52);
        assert_eq!(metrics.succeeded, 49);
        assert_eq!(metrics.errored, 3);
        assert_eq!(metrics.attempted, metrics.succeeded + metrics.errored);
        assert_eq!(metrics.skipped, 1);
        assert_eq!(metrics.batches_flushed, 1);
        assert_eq!(metrics.batches_failed, 1);
        assert_eq!(metrics.errors.len(), 3);
    }

    #[test]
    fn test_file_failure_not_a_document() {
        let mut metrics = RunMetrics::new();
        metrics.record_file_failure(ErrorRecord {
            index: None,
            title: None,
            ..error("file")
        });
        assert_eq!(metrics.files_failed, 1);
        assert_eq!(metrics.attempted, 0);
        assert_eq!(metrics.errors.len(), 1);
    }

    #[test]
    fn test_error_record_display() {
        assert_eq!(
            error("sink").to_string(),
            "(3, Widget, ipg180102.xml, sink: boom)"
        );
        let anonymous = ErrorRecord {
            index: None,
            title: None,
            ..error("file")
        };
        assert_eq!(anonymous.to_string(), "(-, None, ipg180102.xml, file: boom)");
    }

    #[test]
    fn test_summary() {
        let mut metrics = RunMetrics::new();
        metrics.record_flush(10);
        metrics.record_document_error(error("xml"));
        metrics.elapsed_seconds = 2.0;

        let summary = metrics.summary();
        assert!(summary.contains("Success Count: 10"));
        assert!(summary.contains("Error Count: 1"));
        assert!(summary.contains("5.5 docs/s"));
        assert!(summary.contains("xml: boom"));
    }
}
