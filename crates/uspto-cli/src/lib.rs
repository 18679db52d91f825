//! USPTO loader CLI library.
//!
//! This library provides the pieces behind the `uspto-load` binary:
//! argument parsing, the layered TOML configuration, logger bootstrap,
//! the load command and summary formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
