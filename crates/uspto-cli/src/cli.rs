//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

/// Load USPTO bulk patent XML dumps into a database or a JSON-lines file.
#[derive(Debug, Parser)]
#[command(name = "uspto-load")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Dump files or directories to load
    #[arg(required_unless_present = "init_config")]
    pub paths: Vec<PathBuf>,

    /// Destination for extracted records
    #[arg(short, long, value_enum)]
    pub sink: Option<SinkArg>,

    /// SQLite database path (sqlite sink)
    #[arg(short, long, env = "USPTO_DB_PATH")]
    pub database: Option<PathBuf>,

    /// JSON-lines output path (jsonl sink)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Documents per flush
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Maximum documents attempted per file
    #[arg(short, long)]
    pub limit_per_file: Option<usize>,

    /// Extension of the files to read, without the dot
    #[arg(long)]
    pub extension: Option<String>,

    /// Skip writing referential documents (sqlite sink)
    #[arg(long)]
    pub no_referential: bool,

    /// Dump every extracted record at debug level
    #[arg(long)]
    pub log_records: bool,

    /// Configuration file path (default: ~/.uspto/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    pub init_config: bool,

    /// Summary format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Sink options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SinkArg {
    /// SQLite upsert store
    Sqlite,
    /// Append-only JSON lines
    Jsonl,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (success and error counts only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<SinkArg> for crate::config::SinkKind {
    fn from(sink: SinkArg) -> Self {
        match sink {
            SinkArg::Sqlite => crate::config::SinkKind::Sqlite,
            SinkArg::Jsonl => crate::config::SinkKind::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OutputFormat, SinkKind};

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["uspto-load", "dumps/ipg180102.xml", "dumps/2019"]);
        assert_eq!(cli.paths.len(), 2);
        assert!(cli.sink.is_none());
        assert!(!cli.no_color);
    }

    #[test]
    fn test_paths_required() {
        assert!(Cli::try_parse_from(["uspto-load"]).is_err());
        assert!(Cli::try_parse_from(["uspto-load", "--init-config"]).is_ok());
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::parse_from([
            "uspto-load",
            "--sink",
            "jsonl",
            "--output",
            "out.jsonl",
            "--batch-size",
            "25",
            "--limit-per-file",
            "5",
            "--format",
            "quiet",
            "--log-level",
            "debug",
            "a.xml",
        ]);
        assert_eq!(cli.sink, Some(SinkArg::Jsonl));
        assert_eq!(cli.output, Some(PathBuf::from("out.jsonl")));
        assert_eq!(cli.batch_size, Some(25));
        assert_eq!(cli.limit_per_file, Some(5));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.format.map(OutputFormat::from), Some(OutputFormat::Quiet)));
    }

    #[test]
    fn test_unknown_sink_rejected() {
        assert!(Cli::try_parse_from(["uspto-load", "--sink", "postgres", "a.xml"]).is_err());
    }

    #[test]
    fn test_sink_conversion() {
        let kind: SinkKind = SinkArg::Sqlite.into();
        assert_eq!(kind, SinkKind::Sqlite);
    }
}
