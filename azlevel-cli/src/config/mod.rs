//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use azlevel_core::{Heuristics, Language};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Output format names accepted in configuration files
pub const FORMAT_NAMES: [&str; 5] = ["text", "json", "markdown", "csv", "xlsx"];

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Classification configuration
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Heuristic thresholds and weights
    #[serde(default)]
    pub heuristics: Heuristics,
}

impl CliConfig {
    /// Load and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate TOML configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.classification.language()?;
        if !FORMAT_NAMES.contains(&self.output.format.to_lowercase().as_str()) {
            return Err(CliError::ConfigError(format!(
                "unknown output format '{}' (expected one of: {})",
                self.output.format,
                FORMAT_NAMES.join(", ")
            ))
            .into());
        }
        self.heuristics
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(())
    }
}

/// Classification-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Justification language
    pub language: String,

    /// Rubric CSV used when `--rubric` is not given
    pub rubric: Option<PathBuf>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            language: "english".to_string(),
            rubric: None,
        }
    }
}

impl ClassificationConfig {
    /// Parsed justification language
    pub fn language(&self) -> Result<Language> {
        Language::from_code(&self.language).ok_or_else(|| {
            CliError::ConfigError(format!("unknown language '{}'", self.language)).into()
        })
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq, Default)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Classify books in parallel
    pub parallel: bool,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::from_toml_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.classification.language().unwrap(), Language::English);
        assert!(config.output.pretty_json);
        assert_eq!(config.heuristics, Heuristics::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = CliConfig::from_toml_str(
            r#"
[classification]
language = "portuguese"
rubric = "rubrica.csv"

[performance]
parallel = true

[heuristics.bands]
a_to_d = 5.0
e_to_i = 9.0
j_to_m = 13.0
n_to_s = 18.0
"#,
        )
        .unwrap();

        assert_eq!(
            config.classification.language().unwrap(),
            Language::Portuguese
        );
        assert_eq!(
            config.classification.rubric,
            Some(PathBuf::from("rubrica.csv"))
        );
        assert!(config.performance.parallel);
        assert_eq!(config.performance.worker_threads, 0);
        assert_eq!(config.heuristics.bands.a_to_d, 5.0);
        assert_eq!(config.output.format, "text");
    }

    #[test]
    fn test_unknown_language_rejected() {
        let err = CliConfig::from_toml_str("[classification]\nlanguage = \"klingon\"\n")
            .unwrap_err();
        assert!(err.to_string().contains("unknown language 'klingon'"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = CliConfig::from_toml_str("[output]\nformat = \"docx\"\n").unwrap_err();
        assert!(err.to_string().contains("unknown output format 'docx'"));
    }

    #[test]
    fn test_invalid_heuristics_rejected() {
        let err = CliConfig::from_toml_str("[heuristics]\nmax_sample_chars = 0\n").unwrap_err();
        assert!(err.to_string().contains("max_sample_chars"));
    }

    #[test]
    fn test_from_file_reports_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[output\nformat = ").unwrap();

        let err = CliConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid config file:"));

        let err = CliConfig::from_file(Path::new("/nonexistent/azlevel.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config file:"));
    }
}
