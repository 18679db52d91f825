//! Configuration for pipeline runs
//!
//! Defines batch size, per-file limits and which files are read.

use serde::{Deserialize, Serialize};

/// Configuration for the batch pipeline
///
/// # Examples
///
/// ```
/// use uspto_pipeline::PipelineConfig;
///
/// // Default configuration
/// let config = PipelineConfig::default();
/// assert_eq!(config.batch_size, 50);
///
/// // Look at the first few documents of each file
/// let config = PipelineConfig::sample();
/// assert_eq!(config.limit_per_file, Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Documents per sink flush
    /// Default: 50
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum documents attempted per file
    /// Default: unlimited
    #[serde(default)]
    pub limit_per_file: Option<usize>,

    /// Extension of the files to read, without the dot
    /// Default: `xml`
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Dump every extracted record at debug level
    /// Default: false
    #[serde(default)]
    pub log_records: bool,
}

fn default_batch_size() -> usize {
    50
}

fn default_file_extension() -> String {
    "xml".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            limit_per_file: None,
            file_extension: default_file_extension(),
            log_records: false,
        }
    }
}

impl PipelineConfig {
    /// Small batches over the first documents of every file, records logged
    ///
    /// Suitable for checking a new dump revision before a full load.
    pub fn sample() -> Self {
        Self {
            batch_size: 10,
            limit_per_file: Some(10),
            file_extension: default_file_extension(),
            log_records: true,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }
        if self.limit_per_file == Some(0) {
            return Err("limit_per_file must be at least 1 when set".to_string());
        }
        if self.file_extension.is_empty() || self.file_extension.starts_with('.') {
            return Err(format!(
                "file_extension must be non-empty and given without a dot, got '{}'",
                self.file_extension
            ));
        }
        Ok(())
    }

    /// Load from TOML
    pub fn from_toml(text: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(text).map_err(|e| format!("Failed to parse pipeline config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize pipeline config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.limit_per_file, None);
        assert_eq!(config.file_extension, "xml");
        assert!(!config.log_records);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_config() {
        let config = PipelineConfig::sample();
        assert!(config.batch_size < PipelineConfig::default().batch_size);
        assert!(config.log_records);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let zero_batch = PipelineConfig {
            batch_size: 0,
            ..PipelineConfig::default()
        };
        assert!(zero_batch.validate().is_err());

        let zero_limit = PipelineConfig {
            limit_per_file: Some(0),
            ..PipelineConfig::default()
        };
        assert!(zero_limit.validate().is_err());

        let dotted = PipelineConfig {
            file_extension: ".xml".to_string(),
            ..PipelineConfig::default()
        };
        assert!(dotted.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = PipelineConfig {
            limit_per_file: Some(25),
            ..PipelineConfig::sample()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(PipelineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_toml_defaults() {
        let config = PipelineConfig::from_toml("batch_size = 20").unwrap();
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.file_extension, "xml");
        assert_eq!(config.limit_per_file, None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(PipelineConfig::from_toml("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_toml_invalid_rejected() {
        assert!(PipelineConfig::from_toml("batch_size = 0").is_err());
        assert!(PipelineConfig::from_toml("batch_size = \"many\"").is_err());
    }
}
