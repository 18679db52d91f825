//! USPTO Storage Layer
//!
//! Implements the [`PatentSink`] trait for the two supported destinations.
//!
//! # Architecture
//!
//! - [`SqliteSink`]: relational upsert store. Patents are keyed on
//!   `publication_number` and overwritten on re-extraction, keeping the
//!   original `created_at`. Referential documents are appended, duplicates
//!   ignored. One transaction per batch.
//! - [`JsonlSink`]: appends one JSON object per record per line. Not
//!   idempotent across reruns.
//!
//! List columns are comma-joined and text-block columns newline-joined in
//! the relational store; the line-delimited store keeps the record as is.
//!
//! # Examples
//!
//! ```no_run
//! use uspto_store::{SqliteSink, StoreConfig};
//!
//! let sink = SqliteSink::in_memory(StoreConfig::default()).unwrap();
//! assert_eq!(sink.count_patents().unwrap(), 0);
//! ```

#![warn(missing_docs)]

mod config;
mod jsonl;
mod sqlite;

pub use config::StoreConfig;
pub use jsonl::JsonlSink;
pub use sqlite::{PatentRow, SqliteSink, PATENT_COLUMNS, TIMESTAMP_FORMAT};

#[doc(no_inline)]
pub use uspto_domain::PatentSink;

use thiserror::Error;

/// Errors that can occur during storage operations
///
/// Any of these raised from a flush fails the whole batch.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
