//! Trait definitions for external interactions
//!
//! The storage layer implements these; the pipeline only sees the trait.

use crate::PatentRecord;

/// A durable destination for extracted patent batches
///
/// Implemented by the infrastructure layer (uspto-store).
///
/// One call to [`PatentSink::flush`] is one unit of durability: either the
/// whole batch is committed or none of it is.
pub trait PatentSink {
    /// Error type for sink operations
    type Error;

    /// Write one batch, returning the number of records committed
    fn flush(&mut self, batch: &[PatentRecord]) -> Result<usize, Self::Error>;

    /// Human-readable destination name for logs
    fn name(&self) -> &str;
}
