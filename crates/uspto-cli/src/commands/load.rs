//! Load command implementation.

use crate::config::{Config, SinkKind};
use crate::error::Result;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::info;
use uspto_domain::PatentSink;
use uspto_pipeline::{BatchPipeline, RunMetrics};
use uspto_store::{JsonlSink, SqliteSink};

/// Load `paths` into the configured sink.
///
/// The sink is chosen once from the configuration. Only a sink that cannot
/// be opened, an invalid configuration or an empty input set is an error;
/// everything else ends up in the returned metrics.
pub fn execute_load(paths: &[PathBuf], config: &Config) -> Result<RunMetrics> {
    match config.settings.sink {
        SinkKind::Sqlite => {
            let sink = SqliteSink::open(config.store.clone())?;
            run(sink, paths, config)
        }
        SinkKind::Jsonl => run(JsonlSink::new(&config.store.jsonl_path), paths, config),
    }
}

fn run<S: PatentSink>(sink: S, paths: &[PathBuf], config: &Config) -> Result<RunMetrics>
where
    S::Error: Display,
{
    info!("Writing to {}", sink.name());
    let mut pipeline = BatchPipeline::new(sink, config.pipeline.clone())?;
    Ok(pipeline.run(paths)?)
}
