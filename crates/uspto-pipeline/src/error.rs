//! Error types for pipeline runs

use thiserror::Error;

/// Errors that can end or reject a pipeline run
///
/// Per-document and per-batch failures are not errors at this level; they
/// are counted in [`crate::RunMetrics`] and the run continues.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A source file could not be read
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No input file could be enumerated
    #[error("No input files found: {0}")]
    NoInputs(String),
}
