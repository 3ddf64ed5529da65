//! CSV output formatter

use super::OutputFormatter;
use anyhow::Result;
use azlevel_core::ClassificationResult;
use std::io::Write;

/// Column headers, in output order
pub const HEADERS: [&str; 5] = ["identifier", "source", "level", "justification", "evidence"];

/// CSV formatter - one record per book after a header row
pub struct CsvFormatter<W: Write> {
    writer: csv::Writer<W>,
    wrote_header: bool,
}

impl<W: Write> CsvFormatter<W> {
    /// Create a new CSV formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(writer),
            wrote_header: false,
        }
    }

    fn ensure_header(&mut self) -> Result<()> {
        if !self.wrote_header {
            self.writer.write_record(HEADERS)?;
            self.wrote_header = true;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for CsvFormatter<W> {
    fn format_result(&mut self, result: &ClassificationResult) -> Result<()> {
        self.ensure_header()?;
        let level = result.level_label();
        self.writer.write_record([
            result.identifier.as_str(),
            result.source.as_str(),
            level.as_str(),
            result.justification.as_str(),
            result.evidence.as_str(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.ensure_header()?;
        self.writer.flush()?;
        Ok(())
    }
}
