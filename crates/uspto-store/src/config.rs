//! Configuration for the sinks

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where and how records are stored
///
/// # Examples
///
/// ```
/// use uspto_store::StoreConfig;
///
/// let config = StoreConfig::default();
/// assert_eq!(config.patent_table, "uspto_patents");
/// assert!(config.include_referential);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file
    /// Default: `uspto.db`
    pub database_path: PathBuf,

    /// Patent table name
    /// Default: `uspto_patents`
    pub patent_table: String,

    /// Referential document table name
    /// Default: `uspto_referential_documents`
    pub referential_table: String,

    /// Write referential documents alongside patents
    /// Default: true
    pub include_referential: bool,

    /// Output file of the line-delimited sink
    /// Default: `uspto_patents.jsonl`
    pub jsonl_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("uspto.db"),
            patent_table: "uspto_patents".to_string(),
            referential_table: "uspto_referential_documents".to_string(),
            include_referential: true,
            jsonl_path: PathBuf::from("uspto_patents.jsonl"),
        }
    }
}

impl StoreConfig {
    /// Validate configuration
    ///
    /// Table names are spliced into SQL, so they must be plain identifiers.
    pub fn validate(&self) -> Result<(), String> {
        for (field, name) in [
            ("patent_table", &self.patent_table),
            ("referential_table", &self.referential_table),
        ] {
            if !is_identifier(name) {
                return Err(format!("{} must be a SQL identifier, got '{}'", field, name));
            }
        }

        if self.patent_table == self.referential_table {
            return Err("patent_table and referential_table must differ".to_string());
        }

        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
