//! Types for extraction results

use crate::error::ExtractError;
use uspto_domain::PatentRecord;

/// What became of one fragment
///
/// This is the per-document result shape. Batch-level sink failures are a
/// separate `Result` owned by the pipeline, so the two severities never mix.
#[derive(Debug)]
pub enum FragmentOutcome {
    /// Sequence listing, excluded from success and error counts
    Skipped,

    /// A complete record
    Extracted(PatentRecord),

    /// The document was discarded
    Failed {
        /// Best-effort invention title, if one could be read
        title: Option<String>,
        /// Why the document was discarded
        error: ExtractError,
    },
}
