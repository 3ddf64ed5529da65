//! Leveling error types

use thiserror::Error;

/// Errors surfaced to the caller before or outside per-document processing.
///
/// Per-document failures (empty extraction, too little text) are never
/// errors; they are reported through [`crate::Outcome`].
#[derive(Error, Debug)]
pub enum LevelError {
    /// The rubric table lacks one or more required columns
    #[error("rubric is missing required columns: {}", missing.join(", "))]
    MalformedRubric {
        /// Canonical names of the columns that could not be found
        missing: Vec<String>,
    },

    /// The rubric could not be parsed as CSV
    #[error("rubric parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The rubric workbook could not be read
    #[error("rubric workbook error: {0}")]
    Xlsx(#[from] calamine::XlsxError),

    /// The rubric workbook has no worksheet
    #[error("rubric workbook has no worksheets")]
    EmptyWorkbook,

    /// A PDF could not be parsed
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// An EPUB container could not be opened
    #[error("EPUB archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// EPUB package or content markup could not be parsed
    #[error("markup error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The EPUB lacks a required package entry
    #[error("EPUB package error: {0}")]
    Epub(String),

    /// Invalid heuristics or leveler configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Heuristics TOML could not be deserialized
    #[error("configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parallel execution error
    #[cfg(feature = "parallel")]
    #[error("parallel execution failed: {0}")]
    ParallelError(String),
}

/// Result type for leveling operations
pub type Result<T> = std::result::Result<T, LevelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_rubric_lists_columns() {
        let err = LevelError::MalformedRubric {
            missing: vec!["structure".to_string(), "images".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "rubric is missing required columns: structure, images"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LevelError = io_error.into();
        assert!(matches!(err, LevelError::Io(_)));
    }
}
