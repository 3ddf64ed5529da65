//! Documents and best-effort text extraction
//!
//! Extraction never fails loudly: unreadable or unsupported documents yield
//! empty text, which the classifier reports as an extraction failure.
//! PDF pages and EPUB chapters are read in order and reading stops as soon
//! as the collected text passes the sample cap.

mod epub;
mod pdf;

pub use epub::extract_epub_text;
pub use pdf::extract_pdf_text;

use crate::error::Result;
use crate::heuristics::MAX_SAMPLE_CHARS;
use crate::isbn::extract_isbn;
use crate::text::normalize_text;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a document's content comes from
pub enum DocumentContent {
    /// File on disk
    File(PathBuf),
    /// Raw file bytes already in memory
    Bytes(Vec<u8>),
    /// Text that was extracted elsewhere
    Text(String),
}

impl std::fmt::Debug for DocumentContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentContent::File(path) => f.debug_tuple("File").field(path).finish(),
            DocumentContent::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            DocumentContent::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} chars>", text.chars().count()))
                .finish(),
        }
    }
}

/// One manuscript to classify
#[derive(Debug)]
pub struct Document {
    name: String,
    identifier: String,
    content: DocumentContent,
}

impl Document {
    /// Document backed by a file; the identifier is derived from its name
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            identifier: extract_isbn(&name),
            name,
            content: DocumentContent::File(path),
        }
    }

    /// Document from in-memory file bytes, named like its source file
    pub fn from_bytes<S: Into<String>>(name: S, bytes: Vec<u8>) -> Self {
        let name = name.into();
        Self {
            identifier: extract_isbn(&name),
            name,
            content: DocumentContent::Bytes(bytes),
        }
    }

    /// Document from already extracted text
    pub fn from_text<S: Into<String>, T: Into<String>>(name: S, text: T) -> Self {
        let name = name.into();
        Self {
            identifier: extract_isbn(&name),
            name,
            content: DocumentContent::Text(text.into()),
        }
    }

    /// Replace the derived identifier
    pub fn with_identifier<S: Into<String>>(mut self, identifier: S) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Source name, usually the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque identifier reported with the result
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Content source
    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    /// Format guessed from the source name
    pub fn format(&self) -> DocumentFormat {
        DocumentFormat::from_name(&self.name)
    }
}

/// Document formats recognized by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Plain text (`.txt`, `.text`, `.md`)
    Text,
    /// PDF
    Pdf,
    /// EPUB
    Epub,
    /// Anything else
    Unknown,
}

impl DocumentFormat {
    /// Detect the format of a file name, case-insensitively
    pub fn from_name(name: &str) -> Self {
        let extension = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        match extension.as_deref() {
            Some("txt" | "text" | "md") => DocumentFormat::Text,
            Some("pdf") => DocumentFormat::Pdf,
            Some("epub") => DocumentFormat::Epub,
            _ => DocumentFormat::Unknown,
        }
    }

    /// Lowercase format name
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Text => "text",
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Epub => "epub",
            DocumentFormat::Unknown => "unknown",
        }
    }
}

/// Source of normalized plain text for a document.
///
/// Implementations return an empty string when nothing can be extracted;
/// they never fail.
pub trait TextExtractor {
    /// Whitespace-normalized, length-capped text of `document`, possibly empty
    fn extract(&self, document: &Document) -> String;
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract(&self, document: &Document) -> String {
        (**self).extract(document)
    }
}

/// Text parts collected until their combined length passes a cap
#[derive(Debug)]
pub(crate) struct SampleBuffer {
    parts: Vec<String>,
    chars: usize,
    max_chars: usize,
}

impl SampleBuffer {
    pub(crate) fn new(max_chars: usize) -> Self {
        Self {
            parts: Vec::new(),
            chars: 0,
            max_chars,
        }
    }

    /// Add a part; returns `true` once the cap has been passed
    pub(crate) fn push(&mut self, part: String) -> bool {
        if !part.is_empty() {
            self.chars += part.chars().count();
            self.parts.push(part);
        }
        self.is_full()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.chars > self.max_chars
    }

    /// Parts joined by a space, normalized and capped
    pub(crate) fn finish(self) -> String {
        normalize_text(&self.parts.join(" "), self.max_chars)
    }
}

/// Extractor for plain-text manuscripts.
///
/// Bytes are decoded as UTF-8 when valid and with a legacy single-byte
/// encoding (Windows-1252 by default) otherwise. PDF, EPUB and unknown
/// formats are reported as unsupported; [`BookExtractor`] handles those.
#[derive(Debug, Clone, Copy)]
pub struct PlainTextExtractor {
    max_chars: usize,
    fallback: &'static Encoding,
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new(MAX_SAMPLE_CHARS)
    }
}

impl PlainTextExtractor {
    /// Extractor keeping at most `max_chars` characters
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            fallback: WINDOWS_1252,
        }
    }

    /// Use a different fallback for bytes that are not UTF-8, by WHATWG label
    /// such as `"latin1"` or `"iso-8859-15"`. Returns `None` for unknown labels.
    pub fn with_fallback_label(mut self, label: &str) -> Option<Self> {
        self.fallback = Encoding::for_label(label.trim().as_bytes())?;
        Some(self)
    }

    /// Sample cap in characters
    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Decode bytes, preferring UTF-8 (with or without BOM)
    pub fn decode(&self, bytes: &[u8]) -> String {
        if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(
            bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes),
        ) {
            return text.into_owned();
        }
        let (text, encoding, _) = self.fallback.decode(bytes);
        log::debug!("decoded non-UTF-8 text as {}", encoding.name());
        text.into_owned()
    }

    fn supported(&self, document: &Document) -> bool {
        match document.format() {
            DocumentFormat::Text => true,
            format => {
                log::warn!(
                    "{}: unsupported document format ({})",
                    document.name(),
                    format.as_str()
                );
                false
            }
        }
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, document: &Document) -> String {
        let raw = match document.content() {
            DocumentContent::Text(text) => return normalize_text(text, self.max_chars),
            DocumentContent::Bytes(bytes) => {
                if !self.supported(document) {
                    return String::new();
                }
                self.decode(bytes)
            }
            DocumentContent::File(path) => {
                if !self.supported(document) {
                    return String::new();
                }
                match fs::read(path) {
                    Ok(bytes) => self.decode(&bytes),
                    Err(e) => {
                        log::warn!("failed to read {}: {e}", path.display());
                        return String::new();
                    }
                }
            }
        };
        normalize_text(&raw, self.max_chars)
    }
}

/// Extractor dispatching on the document format: plain text, PDF and EPUB.
///
/// Unknown formats and unreadable files are logged and yield empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookExtractor {
    plain: PlainTextExtractor,
}

impl BookExtractor {
    /// Extractor keeping at most `max_chars` characters
    pub fn new(max_chars: usize) -> Self {
        Self {
            plain: PlainTextExtractor::new(max_chars),
        }
    }

    /// Extractor with a custom plain-text decoder
    pub fn with_plain_text(plain: PlainTextExtractor) -> Self {
        Self { plain }
    }

    /// Sample cap in characters
    pub fn max_chars(&self) -> usize {
        self.plain.max_chars()
    }

    fn extract_bytes(&self, document: &Document, bytes: &[u8]) -> String {
        let max_chars = self.max_chars();
        let result: Result<String> = match document.format() {
            DocumentFormat::Text => Ok(normalize_text(&self.plain.decode(bytes), max_chars)),
            DocumentFormat::Pdf => extract_pdf_text(bytes, max_chars),
            DocumentFormat::Epub => extract_epub_text(bytes, max_chars),
            DocumentFormat::Unknown => {
                log::warn!("{}: unsupported document format", document.name());
                Ok(String::new())
            }
        };
        result.unwrap_or_else(|e| {
            log::warn!(
                "{}: failed to read {}: {e}",
                document.name(),
                document.format().as_str()
            );
            String::new()
        })
    }
}

impl TextExtractor for BookExtractor {
    fn extract(&self, document: &Document) -> String {
        match document.content() {
            DocumentContent::Text(text) => normalize_text(text, self.max_chars()),
            DocumentContent::Bytes(bytes) => self.extract_bytes(document, bytes),
            DocumentContent::File(path) => match fs::read(path) {
                Ok(bytes) => self.extract_bytes(document, &bytes),
                Err(e) => {
                    log::warn!("failed to read {}: {e}", path.display());
                    String::new()
                }
            },
        }
    }
}
