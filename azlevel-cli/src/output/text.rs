//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use azlevel_core::ClassificationResult;
use std::io::{self, Write};

/// Plain text formatter - outputs one block per book
pub struct TextFormatter<W: Write> {
    writer: W,
    count: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_result(&mut self, result: &ClassificationResult) -> Result<()> {
        if self.count > 0 {
            writeln!(self.writer)?;
        }
        self.count += 1;

        writeln!(
            self.writer,
            "{} ({}): {}",
            result.identifier,
            result.source,
            result.level_label()
        )?;
        writeln!(self.writer, "  {}", result.justification)?;
        if !result.evidence.is_empty() {
            writeln!(self.writer, "  {}", result.evidence)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
