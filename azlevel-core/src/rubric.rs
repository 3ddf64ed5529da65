//! Rubric table: descriptive expectations per level letter
//!
//! A rubric is loaded from CSV or from an XLSX workbook whose headers are
//! matched loosely, in English or Portuguese ("Nível", "Frase e Estrutura",
//! "Vocabulário", "Imagens").

use crate::band::Level;
use crate::error::{LevelError, Result};
use calamine::{Reader, Xlsx};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

/// Lookup of rubric rows by level
pub trait RubricLookup {
    /// Row for `level`, if the rubric has one
    fn lookup(&self, level: Level) -> Option<&RubricRow>;
}

impl<T: RubricLookup + ?Sized> RubricLookup for &T {
    fn lookup(&self, level: Level) -> Option<&RubricRow> {
        (**self).lookup(level)
    }
}

/// Descriptive expectations for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricRow {
    /// Level the row describes
    pub level: Level,
    /// Sentence and structure expectations
    pub structure: String,
    /// Vocabulary expectations
    pub vocabulary: String,
    /// Illustration expectations
    #[serde(default)]
    pub images: String,
}

/// Columns a rubric must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricColumn {
    /// Level letter
    Level,
    /// Sentence and structure text
    Structure,
    /// Vocabulary text
    Vocabulary,
    /// Illustration text
    Images,
}

impl RubricColumn {
    /// All required columns, in canonical order
    pub const ALL: [RubricColumn; 4] = [
        RubricColumn::Level,
        RubricColumn::Structure,
        RubricColumn::Vocabulary,
        RubricColumn::Images,
    ];

    /// Canonical column name
    pub fn name(self) -> &'static str {
        match self {
            RubricColumn::Level => "level",
            RubricColumn::Structure => "structure",
            RubricColumn::Vocabulary => "vocabulary",
            RubricColumn::Images => "images",
        }
    }

    /// Recognize a header cell; the first matching rule wins
    pub fn from_header(header: &str) -> Option<Self> {
        let lower = header.trim().to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

        // "level" also appears in headers such as "Vocabulary level", so it
        // is only tried after the other columns
        if has(&["nível", "nivel"]) {
            Some(RubricColumn::Level)
        } else if has(&["frase", "estrutura", "structure", "sentence"]) {
            Some(RubricColumn::Structure)
        } else if has(&["vocab"]) {
            Some(RubricColumn::Vocabulary)
        } else if has(&["imagem", "image"]) {
            Some(RubricColumn::Images)
        } else if has(&["level"]) {
            Some(RubricColumn::Level)
        } else {
            None
        }
    }
}

/// Rubric rows keyed by level; the first row for a letter wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rubric {
    rows: BTreeMap<Level, RubricRow>,
}

impl Rubric {
    /// Build from in-memory rows
    pub fn from_rows<I: IntoIterator<Item = RubricRow>>(rows: I) -> Self {
        let mut map = BTreeMap::new();
        for row in rows {
            map.entry(row.level).or_insert(row);
        }
        Self { rows: map }
    }

    /// Load from a CSV file
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Load from CSV data with a header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut records = Vec::new();
        for record in csv_reader.records() {
            records.push(record?.iter().map(str::to_string).collect::<Vec<_>>());
        }
        Self::from_table(headers.iter(), records)
    }

    /// Load from an XLSX workbook.
    ///
    /// The first sheet whose name contains "fountas" (any case) is used,
    /// otherwise the first sheet. Its first row holds the headers.
    pub fn from_xlsx_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let workbook: Xlsx<_> = calamine::open_workbook(path.as_ref())?;
        Self::from_xlsx_workbook(workbook)
    }

    /// Load from XLSX data; see [`Rubric::from_xlsx_path`]
    pub fn from_xlsx_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_xlsx_workbook(Xlsx::new(reader)?)
    }

    /// Load from a file, choosing the reader by extension (`.xlsx` or CSV)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let is_xlsx = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
        if is_xlsx {
            Self::from_xlsx_path(path)
        } else {
            Self::from_csv_path(path)
        }
    }

    fn from_xlsx_workbook<R: Read + Seek>(mut workbook: Xlsx<R>) -> Result<Self> {
        let names = workbook.sheet_names();
        let sheet = rubric_sheet(&names).ok_or(LevelError::EmptyWorkbook)?;
        log::debug!("reading rubric from sheet '{sheet}'");
        let range = workbook.worksheet_range(sheet)?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()));
        let headers: Vec<String> = rows.next().map(Iterator::collect).unwrap_or_default();
        let records: Vec<Vec<String>> = rows.map(Iterator::collect).collect();
        Self::from_table(headers.iter().map(String::as_str), records)
    }

    /// Build from a header row and data rows of cell text
    fn from_table<'h, H>(headers: H, records: Vec<Vec<String>>) -> Result<Self>
    where
        H: IntoIterator<Item = &'h str>,
    {
        let mut positions: [Option<usize>; 4] = [None; 4];
        for (index, header) in headers.into_iter().enumerate() {
            if let Some(column) = RubricColumn::from_header(header) {
                let slot = &mut positions[column as usize];
                if slot.is_none() {
                    *slot = Some(index);
                }
            }
        }

        let missing: Vec<String> = RubricColumn::ALL
            .iter()
            .filter(|column| positions[**column as usize].is_none())
            .map(|column| column.name().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LevelError::MalformedRubric { missing });
        }

        let cell = |record: &[String], column: RubricColumn| -> String {
            positions[column as usize]
                .and_then(|i| record.get(i))
                .cloned()
                .unwrap_or_default()
        };

        let mut rows = Vec::new();
        for record in &records {
            let Some(level) = Level::parse(&cell(record, RubricColumn::Level)) else {
                log::debug!("skipping rubric row without a level letter: {record:?}");
                continue;
            };
            rows.push(RubricRow {
                level,
                structure: cell(record, RubricColumn::Structure),
                vocabulary: cell(record, RubricColumn::Vocabulary),
                images: cell(record, RubricColumn::Images),
            });
        }

        log::debug!("loaded rubric with {} rows", rows.len());
        Ok(Self::from_rows(rows))
    }

    /// Number of levels described
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no level is described
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in level order
    pub fn rows(&self) -> impl Iterator<Item = &RubricRow> {
        self.rows.values()
    }
}

/// Sheet holding the rubric: the first one named like "Fountas", else the first
fn rubric_sheet(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| name.to_lowercase().contains("fountas"))
        .or_else(|| names.first())
        .map(String::as_str)
}

impl RubricLookup for Rubric {
    fn lookup(&self, level: Level) -> Option<&RubricRow> {
        self.rows.get(&level)
    }
}
