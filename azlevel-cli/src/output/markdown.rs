//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use azlevel_core::ClassificationResult;
use std::io::Write;

/// Markdown formatter - outputs results as a markdown table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    count: usize,
    leveled: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            count: 0,
            leveled: 0,
        }
    }
}

/// Escape characters that would break a table cell
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_result(&mut self, result: &ClassificationResult) -> Result<()> {
        if self.count == 0 {
            writeln!(
                self.writer,
                "| ISBN | File | Level | Justification | Evidence |"
            )?;
            writeln!(self.writer, "|---|---|---|---|---|")?;
        }
        self.count += 1;
        if result.is_leveled() {
            self.leveled += 1;
        }

        writeln!(
            self.writer,
            "| {} | {} | {} | {} | {} |",
            cell(&result.identifier),
            cell(&result.source),
            result.level_label(),
            cell(&result.justification),
            cell(&result.evidence)
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Books leveled: {} of {}*",
            self.leveled, self.count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
