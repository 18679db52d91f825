//! Line-delimited JSON sink

use crate::StoreError;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use uspto_domain::{PatentRecord, PatentSink};

/// Appends one JSON object per record to a file
///
/// Reruns append again; nothing is deduplicated. A batch is serialized in
/// full before the file is touched, so a serialization error writes nothing.
pub struct JsonlSink {
    path: PathBuf,
    name: String,
}

impl JsonlSink {
    /// Create a sink appending to `path` (created on first flush)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = format!("jsonl:{}", path.display());
        Self { path, name }
    }

    /// Output path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PatentSink for JsonlSink {
    type Error = StoreError;

    fn flush(&mut self, batch: &[PatentRecord]) -> Result<usize, Self::Error> {
        let mut lines = String::new();
        for record in batch {
            lines.push_str(&serde_json::to_string(record)?);
            lines.push('\n');
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(lines.as_bytes())?;
        writer.flush()?;

        debug!("Appended {} records to {}", batch.len(), self.path.display());
        Ok(batch.len())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
