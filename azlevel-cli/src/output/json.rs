//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use azlevel_core::ClassificationResult;
use std::io::Write;

/// JSON formatter - outputs results as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    results: Vec<ClassificationResult>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter with pretty printing
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            results: Vec::new(),
            pretty: true,
        }
    }

    /// Enable or disable pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_result(&mut self, result: &ClassificationResult) -> Result<()> {
        self.results.push(result.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.results)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.results)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{failed, leveled, SharedBuffer};
    use serde_json::Value;

    #[test]
    fn test_array_of_results() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone());
        formatter.format_result(&leveled()).unwrap();
        formatter.format_result(&failed()).unwrap();
        formatter.finish().unwrap();

        let value: Value = serde_json::from_str(&buffer.contents()).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["identifier"], "9788535914849");
        assert_eq!(rows[0]["level"], "C");
        assert_eq!(rows[1]["level"], "unknown");
        assert_eq!(rows[1]["evidence"], "");
    }

    #[test]
    fn test_compact_output() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone()).pretty(false);
        formatter.format_result(&failed()).unwrap();
        formatter.finish().unwrap();

        let contents = buffer.contents();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("[{\"identifier\":\"0306406152\""));
    }

    #[test]
    fn test_empty_batch() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone());
        formatter.finish().unwrap();
        assert_eq!(buffer.contents(), "[]\n");
    }
}
