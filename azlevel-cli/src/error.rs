//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Rubric could not be loaded
    RubricError(String),
    /// Classification error from core
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::RubricError(msg) => write!(f, "Rubric error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_not_found_error_display() {
        let error = CliError::FileNotFound("rubric.csv".to_string());
        assert_eq!(error.to_string(), "File not found: rubric.csv");
    }

    #[test]
    fn test_invalid_pattern_error_display() {
        let error = CliError::InvalidPattern("[invalid".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [invalid");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("unknown format 'xlsx'".to_string());
        assert_eq!(
            error.to_string(),
            "Configuration error: unknown format 'xlsx'"
        );
    }

    #[test]
    fn test_rubric_error_display() {
        let error = CliError::RubricError("missing columns: images".to_string());
        assert_eq!(error.to_string(), "Rubric error: missing columns: images");
    }

    #[test]
    fn test_processing_error_display() {
        let error = CliError::ProcessingError("thread pool failed".to_string());
        assert_eq!(error.to_string(), "Processing error: thread pool failed");
    }

    #[test]
    fn test_error_downcast_through_anyhow() {
        let result: CliResult<()> = Err(CliError::RubricError("bad".to_string()).into());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::RubricError(_))
        ));
    }

    #[test]
    fn test_error_with_special_characters() {
        let error = CliError::FileNotFound("livros/9788535914849 ção.txt".to_string());
        assert_eq!(
            error.to_string(),
            "File not found: livros/9788535914849 ção.txt"
        );
    }
}
