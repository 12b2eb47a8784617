//! Configuration structures for the extraction pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the invozip pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Job / filesystem configuration.
    pub job: JobConfig,

    /// Invoice extraction configuration.
    pub extraction: ExtractionConfig,

    /// Workbook output configuration.
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            job: JobConfig::default(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Filesystem settings for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Work directory for archive extraction. Recreated at the start of
    /// every run and removed afterwards.
    pub tmp_dir: PathBuf,

    /// File-name suffix selecting documents after extraction.
    pub file_extension: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            tmp_dir: PathBuf::from("tmp"),
            file_extension: ".pdf".to_string(),
        }
    }
}

/// Invoice extraction configuration. Read once per document, so edits
/// between documents take effect without a restart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Unit-of-measure allow-list matched inside the entry grammar.
    pub units: Vec<String>,

    /// Due date recorded for credit invoices, which carry none in their
    /// text.
    pub credit_due_date: NaiveDate,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            units: vec!["Pár".to_string(), "Darab".to_string()],
            credit_due_date: NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
        }
    }
}

/// Workbook output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Workbook file name created in the output directory.
    pub workbook_name: String,

    /// Column placement for the four invoice header fields (id, origin
    /// date, due date, total). Anything but exactly four entries falls
    /// back to sequential placement from column 0.
    pub header_columns: Vec<u16>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            workbook_name: "invoices.xlsx".to_string(),
            header_columns: vec![1, 2, 3, 4],
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.extraction.units, vec!["Pár", "Darab"]);
        assert_eq!(config.output.header_columns, vec![1, 2, 3, 4]);
        assert_eq!(config.job.file_extension, ".pdf");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AppConfig::default();
        config.extraction.units.push("Doboz".to_string());
        config.save(&path).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.units, config.extraction.units);
        assert_eq!(loaded.extraction.credit_due_date, config.extraction.credit_due_date);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output": {"workbook_name": "out.xlsx"}}"#).unwrap();

        let loaded = AppConfig::from_file(&path).unwrap();
        assert_eq!(loaded.output.workbook_name, "out.xlsx");
        assert_eq!(loaded.output.header_columns, vec![1, 2, 3, 4]);
        assert_eq!(loaded.extraction.units, vec!["Pár", "Darab"]);
    }
}
