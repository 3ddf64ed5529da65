//! Output formatting module

use anyhow::Result;
use azlevel_core::ClassificationResult;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single classification result
    fn format_result(&mut self, result: &ClassificationResult) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod csv;
pub mod json;
pub mod markdown;
pub mod text;
pub mod xlsx;

pub use self::csv::CsvFormatter;
pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
pub use xlsx::XlsxFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One block of lines per book
    Text,
    /// JSON array of results
    Json,
    /// Markdown table
    Markdown,
    /// CSV with a header row
    Csv,
    /// Excel workbook; requires an output file
    Xlsx,
}

impl OutputFormat {
    /// All formats, in listing order
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Markdown,
        OutputFormat::Csv,
        OutputFormat::Xlsx,
    ];

    /// Lowercase name as used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    /// Short description for `list formats`
    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Text => "Plain text, one block per book",
            OutputFormat::Json => "JSON array of results",
            OutputFormat::Markdown => "Markdown table",
            OutputFormat::Csv => "CSV with identifier, source, level, justification, evidence",
            OutputFormat::Xlsx => "Excel workbook with the CSV columns (needs --output)",
        }
    }

    /// Whether the format is binary and cannot go to a terminal
    pub fn is_binary(&self) -> bool {
        matches!(self, OutputFormat::Xlsx)
    }

    /// Parse a format name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Create the formatter for `format` writing to `writer`
pub fn create_formatter<W: Write + Send + Sync + 'static>(
    format: OutputFormat,
    writer: W,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(writer)),
        OutputFormat::Xlsx => Box::new(XlsxFormatter::new(writer)),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use azlevel_core::{ClassificationResult, Level};
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Writer whose bytes stay readable after the formatter takes ownership
    #[derive(Clone, Default)]
    pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub fn contents(&self) -> String {
            String::from_utf8(self.bytes()).unwrap()
        }

        pub fn bytes(&self) -> Vec<u8> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub fn leveled() -> ClassificationResult {
        ClassificationResult {
            identifier: "9788535914849".to_string(),
            source: "9788535914849.txt".to_string(),
            level: Level::new('C'),
            justification: "Average of 6.0 words per sentence; low sentence complexity."
                .to_string(),
            evidence: "avg_sent_len=6.0 | commas_per_sent=0.00 | long_word_ratio=0.00 | connectives=0, sub_conj=0"
                .to_string(),
        }
    }

    pub fn failed() -> ClassificationResult {
        ClassificationResult {
            identifier: "0306406152".to_string(),
            source: "0306406152.pdf".to_string(),
            level: None,
            justification: "text extraction failed".to_string(),
            evidence: String::new(),
        }
    }
}
