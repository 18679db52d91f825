//! USPTO Pipeline
//!
//! Batch loader that streams bulk dump files through the Extractor into a
//! [`PatentSink`](uspto_domain::PatentSink).
//!
//! # Overview
//!
//! The Pipeline is responsible for:
//! - **Input discovery**: walking directories for dump files
//! - **Batching**: grouping extracted records so each flush is one commit
//! - **Error containment**: a bad document, batch or file never stops the run
//! - **Metrics collection**: totals and every failure, for offline triage
//!
//! # Architecture
//!
//! ```text
//!  STREAMING ──► ACCUMULATING ──► FLUSHING ──┐
//!      ▲                                     │
//!      └─────────────────────────────────────┘
//!                   (input exhausted) ──► DONE
//! ```
//!
//! Fragments are pulled one at a time from the current file. Each attempted
//! document (extracted or failed) moves the batch one step toward
//! `batch_size`; at that point, or at the end of the file, the extracted
//! records go to the sink in a single call. A failed flush reports every
//! record of that batch as errored.
//!
//! Sequence listings are skipped and counted apart from both totals.
//!
//! # Usage
//!
//! ```no_run
//! use uspto_pipeline::{BatchPipeline, PipelineConfig};
//! use uspto_store::JsonlSink;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = JsonlSink::new("patents.jsonl");
//! let mut pipeline = BatchPipeline::new(sink, PipelineConfig::sample())?;
//!
//! let metrics = pipeline.run(&["dumps/2018"])?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! batch_size = 50
//! limit_per_file = 100
//! file_extension = "xml"
//! log_records = false
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod loader;
mod metrics;

pub use batch::{run_paths, BatchPipeline, FILE_ERROR_KIND, SINK_ERROR_KIND};
pub use config::PipelineConfig;
pub use error::PipelineError;
pub use loader::discover_files;
pub use metrics::{ErrorRecord, RunMetrics};
