//! XLSX output formatter

use super::csv::HEADERS;
use super::OutputFormatter;
use anyhow::Result;
use azlevel_core::ClassificationResult;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;

/// Worksheet holding the results
pub const SHEET_NAME: &str = "Levels";

/// Column widths, in characters, matching [`HEADERS`]
const COLUMN_WIDTHS: [f64; 5] = [16.0, 22.0, 8.0, 80.0, 60.0];

/// XLSX formatter - a single worksheet with a bold header row.
///
/// Rows are buffered and the workbook is written on [`OutputFormatter::finish`].
pub struct XlsxFormatter<W: Write> {
    writer: W,
    rows: Vec<[String; 5]>,
}

impl<W: Write> XlsxFormatter<W> {
    /// Create a new XLSX formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows: Vec::new(),
        }
    }

    fn workbook(&self) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let bold = Format::new().set_bold();
        for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, &bold)?;
            sheet.set_column_width(col as u16, width)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (index, row) in self.rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                sheet.write_string(index as u32 + 1, col as u16, value)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

impl<W: Write + Send + Sync> OutputFormatter for XlsxFormatter<W> {
    fn format_result(&mut self, result: &ClassificationResult) -> Result<()> {
        self.rows.push([
            result.identifier.clone(),
            result.source.clone(),
            result.level_label(),
            result.justification.clone(),
            result.evidence.clone(),
        ]);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let bytes = self.workbook()?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{failed, leveled, SharedBuffer};
    use calamine::{Reader, Xlsx};
    use std::io::Cursor;

    fn read_back(bytes: Vec<u8>) -> Vec<Vec<String>> {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
        let range = workbook.worksheet_range(SHEET_NAME).unwrap();
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_rows_in_result_order() {
        let buffer = SharedBuffer::default();
        let mut formatter = XlsxFormatter::new(buffer.clone());
        formatter.format_result(&leveled()).unwrap();
        formatter.format_result(&failed()).unwrap();
        formatter.finish().unwrap();

        let bytes = buffer.bytes();
        assert!(bytes.starts_with(b"PK"));
        let rows = read_back(bytes);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], HEADERS);
        assert_eq!(rows[1][0], "9788535914849");
        assert_eq!(rows[1][2], "C");
        assert_eq!(rows[2][2], "unknown");
        assert_eq!(rows[2][3], "text extraction failed");
    }

    #[test]
    fn test_empty_batch_has_header_only() {
        let buffer = SharedBuffer::default();
        let mut formatter = XlsxFormatter::new(buffer.clone());
        formatter.finish().unwrap();
        assert_eq!(read_back(buffer.bytes()), vec![HEADERS.to_vec()]);
    }
}
