//! USPTO Domain Layer
//!
//! This crate holds the canonical record model that every bulk-dump schema
//! revision is normalized into, plus the trait boundary to the storage layer.
//! It depends only on `serde`/`serde_json`; parsing lives in
//! `uspto-extractor` and persistence in `uspto-store`.
//!
//! ## Key Concepts
//!
//! - **PatentRecord**: one per source document, keyed by publication number
//! - **ReferentialDocument**: a related filing, cited reference or priority
//!   claim, always carrying exactly seven attributes
//! - **Classification**: IPC codes flattened into four nested, deduplicated lists
//! - **OrderedSet**: first-seen-order string set used for deduplication
//! - **PatentSink**: the batch write boundary implemented by the store crate

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classification;
pub mod ordered_set;
pub mod patent;
pub mod referential;
pub mod traits;

// Re-exports for convenience
pub use classification::{Classification, ClassificationSet, IpcCode};
pub use ordered_set::OrderedSet;
pub use patent::PatentRecord;
pub use referential::{
    DocumentType, Metadata, ReferentialDocument, ShapeError, REFERENTIAL_FIELDS,
};
pub use traits::PatentSink;
