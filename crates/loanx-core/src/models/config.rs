//! Configuration for loanx front ends (CLI, batch runs).
//!
//! The extractor itself is not configurable; these settings only shape how
//! callers read input and present results.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoanxError, Result};

/// Main configuration for loanx.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanxConfig {
    /// Output configuration.
    pub output: OutputConfig,

    /// Batch processing configuration.
    pub batch: BatchConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Rendering format for extracted records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON submission body.
    #[default]
    Json,
    /// CSV with a header row.
    Csv,
    /// Plain text summary.
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

/// Batch processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Keep going when an input cannot be read.
    pub continue_on_error: bool,

    /// Lines starting with this prefix are skipped in line mode.
    pub comment_prefix: String,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            continue_on_error: false,
            comment_prefix: "#".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoanxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.check()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.check()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that parse but make no sense.
    pub fn check(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

        if !LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(LoanxError::Config(format!(
                "unknown log level '{}' (expected one of {})",
                self.logging.level,
                LEVELS.join(", ")
            )));
        }

        if self.batch.comment_prefix.trim().is_empty() {
            return Err(LoanxError::Config(
                "batch.comment_prefix must not be blank".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: LoanxConfig =
            serde_json::from_str(r#"{ "output": { "format": "csv" } }"#).unwrap();

        assert_eq!(config.output.format, OutputFormat::Csv);
        assert!(!config.output.pretty);
        assert_eq!(config.batch, BatchConfig::default());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LoanxConfig::default();
        config.output.pretty = true;
        config.batch.continue_on_error = true;
        config.save(&path).unwrap();

        assert_eq!(LoanxConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut config = LoanxConfig::default();
        config.logging.level = "loud".to_string();

        assert!(matches!(config.check(), Err(LoanxError::Config(_))));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(LoanxConfig::from_file(&path), Err(LoanxError::Json(_))));
    }
}
