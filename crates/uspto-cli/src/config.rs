//! Configuration management for the CLI.
//!
//! One TOML file holds every section:
//!
//! ```toml
//! [settings]
//! sink = "sqlite"
//! format = "table"
//! color = true
//!
//! [pipeline]
//! batch_size = 50
//!
//! [store]
//! database_path = "uspto.db"
//!
//! [logging]
//! level = "info"
//! file = "logs/uspto-load.log"
//! ```

use crate::cli::Cli;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uspto_pipeline::PipelineConfig;
use uspto_store::StoreConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Batch pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Sink settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Logger settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Destination for extracted records
    #[serde(default = "default_sink")]
    pub sink: SinkKind,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Summary format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Logger settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default filter; `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,

    /// Optional log file, written in addition to stderr
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

/// Sink choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// SQLite upsert store
    Sqlite,
    /// Append-only JSON lines
    Jsonl,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".uspto").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate().map_err(CliError::Config)?;
        self.store.validate().map_err(CliError::Config)?;
        Ok(())
    }

    /// Apply command-line flags on top of file values.
    pub fn apply_args(&mut self, cli: &Cli) -> Result<()> {
        if let Some(sink) = cli.sink {
            self.settings.sink = sink.into();
        }
        if let Some(format) = cli.format {
            self.settings.format = format.into();
        }
        if cli.no_color {
            self.settings.color = false;
        }

        if let Some(batch_size) = cli.batch_size {
            self.pipeline.batch_size = batch_size;
        }
        if cli.limit_per_file.is_some() {
            self.pipeline.limit_per_file = cli.limit_per_file;
        }
        if let Some(extension) = &cli.extension {
            self.pipeline.file_extension = extension.clone();
        }
        if cli.log_records {
            self.pipeline.log_records = true;
        }

        if let Some(database) = &cli.database {
            self.store.database_path = database.clone();
        }
        if let Some(output) = &cli.output {
            self.store.jsonl_path = output.clone();
        }
        if cli.no_referential {
            self.store.include_referential = false;
        }

        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }

        self.validate()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sink: default_sink(),
            color: true,
            format: default_format(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

fn default_sink() -> SinkKind {
    SinkKind::Sqlite
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_level() -> String {
    "info".to_string()
}
