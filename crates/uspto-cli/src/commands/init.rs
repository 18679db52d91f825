//! Init-config command implementation.

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Write the effective configuration so it can be edited and reused.
pub fn execute_init(config: &Config, path: &Path, formatter: &Formatter) -> Result<()> {
    config.save(path)?;
    println!(
        "{}",
        formatter.success(&format!("Wrote configuration to {}", path.display()))
    );
    Ok(())
}
