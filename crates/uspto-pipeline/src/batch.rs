//! Core batch pipeline implementation

use crate::loader::discover_files;
use crate::{ErrorRecord, PipelineConfig, PipelineError, RunMetrics};
use std::fmt::Display;
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};
use uspto_domain::{PatentRecord, PatentSink};
use uspto_extractor::{FragmentOutcome, FragmentSplitter, PatentExtractor};

/// Error kind recorded for documents lost with a failed flush
pub const SINK_ERROR_KIND: &str = "sink";

/// Error kind recorded for files that could not be read
pub const FILE_ERROR_KIND: &str = "file";

/// Records waiting for the next flush
///
/// `attempted` counts failed documents too, so a batch closes after
/// `batch_size` attempted documents even when some of them were discarded.
#[derive(Debug, Default)]
struct PendingBatch {
    records: Vec<PatentRecord>,
    indexes: Vec<usize>,
    attempted: usize,
    recent_title: Option<String>,
}

impl PendingBatch {
    fn push(&mut self, index: usize, record: PatentRecord) {
        self.recent_title = Some(record.publication_title.clone());
        self.indexes.push(index);
        self.records.push(record);
        self.attempted += 1;
    }

    fn push_failure(&mut self, title: Option<&str>) {
        if let Some(title) = title {
            self.recent_title = Some(title.to_string());
        }
        self.attempted += 1;
    }
}

/// Drives fragments from files through the Extractor into a sink
///
/// Single-threaded and sequential: one file, one fragment, one flush at a
/// time. Only one batch of records is held in memory. A batch never spans two
/// files and is committed by exactly one `flush` call.
///
/// # Examples
///
/// ```no_run
/// use uspto_pipeline::{BatchPipeline, PipelineConfig};
/// use uspto_store::{SqliteSink, StoreConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sink = SqliteSink::open(StoreConfig::default())?;
/// let mut pipeline = BatchPipeline::new(sink, PipelineConfig::default())?;
///
/// let metrics = pipeline.run(&["data/ipg180102.xml"])?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct BatchPipeline<S: PatentSink> {
    sink: S,
    config: PipelineConfig,
    extractor: PatentExtractor,
    metrics: RunMetrics,
    sequence: usize,
}

impl<S: PatentSink> BatchPipeline<S>
where
    S::Error: Display,
{
    /// Create a pipeline writing to `sink`
    pub fn new(sink: S, config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        let extractor = PatentExtractor::new().with_record_logging(config.log_records);

        Ok(Self {
            sink,
            config,
            extractor,
            metrics: RunMetrics::new(),
            sequence: 0,
        })
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Get a reference to the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Give the sink back, ending the pipeline
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Load every matching file under `inputs`
    ///
    /// Fails only when no input file can be enumerated; unreadable files,
    /// bad documents and failed flushes are recorded in the metrics and the
    /// run continues.
    pub fn run<P: AsRef<Path>>(&mut self, inputs: &[P]) -> Result<RunMetrics, PipelineError> {
        let start = Instant::now();
        info!("Loading files to parse");

        let files = discover_files(inputs, &self.config.file_extension)?;
        info!("Found {} input files", files.len());

        for file in &files {
            if let Err(e) = self.process_file(file) {
                error!("Skipping {}: {}", file.display(), e);
                self.metrics.record_file_failure(ErrorRecord {
                    file: file.display().to_string(),
                    index: None,
                    title: None,
                    kind: FILE_ERROR_KIND.to_string(),
                    message: e.to_string(),
                });
            }
        }

        self.metrics.elapsed_seconds += start.elapsed().as_secs_f64();
        self.log_totals();

        Ok(self.metrics.clone())
    }

    /// Read one file and load its documents
    pub fn process_file(&mut self, path: &Path) -> Result<(), PipelineError> {
        let text = fs::read_to_string(path)
            .map_err(|e| PipelineError::Io(format!("{}: {}", path.display(), e)))?;

        self.metrics.record_file();
        self.process_text(&text, &path.display().to_string());
        Ok(())
    }

    /// Load the documents of one dump file's text
    ///
    /// `source` names the file in progress lines and error records.
    pub fn process_text(&mut self, text: &str, source: &str) {
        let mut batch = PendingBatch::default();
        let mut file_attempted = 0;

        for fragment in FragmentSplitter::new(text) {
            if self
                .config
                .limit_per_file
                .is_some_and(|limit| file_attempted >= limit)
            {
                debug!("Reached limit of {} documents for {}", file_attempted, source);
                break;
            }

            match self.extractor.process_fragment(fragment) {
                FragmentOutcome::Skipped => {
                    debug!("Skipping sequence listing in {}", source);
                    self.metrics.record_skip();
                    continue;
                }
                FragmentOutcome::Extracted(record) => {
                    self.sequence += 1;
                    batch.push(self.sequence, record);
                }
                FragmentOutcome::Failed { title, error } => {
                    self.sequence += 1;
                    error!("Error at {}: ({:?}, {})", self.sequence, title, error);
                    batch.push_failure(title.as_deref());
                    self.metrics.record_document_error(ErrorRecord {
                        file: source.to_string(),
                        index: Some(self.sequence),
                        title,
                        kind: error.kind().to_string(),
                        message: error.to_string(),
                    });
                }
            }
            file_attempted += 1;

            if batch.attempted >= self.config.batch_size {
                self.flush(&mut batch, source);
            }
        }

        if batch.attempted > 0 {
            self.flush(&mut batch, source);
        }
    }

    /// Hand the pending records to the sink in one call
    ///
    /// All-or-nothing: on failure none of the batch is credited and every
    /// record in it is reported errored.
    fn flush(&mut self, batch: &mut PendingBatch, source: &str) {
        let pending = mem::take(batch);
        let title = pending.recent_title.as_deref().unwrap_or("None");

        if pending.records.is_empty() {
            info!("{}, {}, {}", self.sequence, source, title);
            return;
        }

        match self.sink.flush(&pending.records) {
            Ok(written) => {
                debug!(
                    "Sink {} wrote {} of {} records",
                    self.sink.name(),
                    written,
                    pending.records.len()
                );
                self.metrics.record_flush(pending.records.len());
                info!("{}, {}, {}", self.sequence, source, title);
            }
            Err(e) => {
                error!(
                    "Error: ({}, {}, sink {} failed: {})",
                    self.sequence,
                    title,
                    self.sink.name(),
                    e
                );
                let message = e.to_string();
                let errors = pending
                    .indexes
                    .into_iter()
                    .zip(pending.records)
                    .map(|(index, record)| ErrorRecord {
                        file: source.to_string(),
                        index: Some(index),
                        title: Some(record.publication_title),
                        kind: SINK_ERROR_KIND.to_string(),
                        message: message.clone(),
                    })
                    .collect();
                self.metrics.record_flush_failure(errors);
            }
        }
    }

    fn log_totals(&self) {
        if !self.metrics.errors.is_empty() {
            error!("Errors");
            error!("------------------------");
            for e in &self.metrics.errors {
                error!("{}", e);
            }
        }
        info!("{}", "=".repeat(50));
        info!("Success Count: {}", self.metrics.succeeded);
        info!("Error Count: {}", self.metrics.errored);
    }
}

/// Convenience wrapper over owned path lists
pub fn run_paths<S: PatentSink>(
    sink: S,
    config: PipelineConfig,
    inputs: &[PathBuf],
) -> Result<RunMetrics, PipelineError>
where
    S::Error: Display,
{
    BatchPipeline::new(sink, config)?.run(inputs)
}
