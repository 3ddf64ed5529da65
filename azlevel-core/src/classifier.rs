//! Per-document leveling and batch classification

use crate::band::{map_to_band, Band, Level};
use crate::error::{LevelError, Result};
use crate::features::{compute_features, FeatureVector, InsufficientText};
use crate::heuristics::Heuristics;
use crate::ingest::{Document, TextExtractor};
use crate::justify::{justify, Language};
use crate::refine::refine_letter;
use crate::rubric::RubricLookup;
use crate::text::normalize_text;
use serde::{Serialize, Serializer};

/// Label reported in place of a level when a document could not be leveled
pub const UNKNOWN_LEVEL: &str = "unknown";

/// Result of leveling one text
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A level was assigned
    Leveled {
        /// Assigned letter
        level: Level,
        /// Band the letter was chosen from
        band: Band,
        /// Statistics behind the decision
        features: FeatureVector,
        /// Natural-language explanation
        justification: String,
    },
    /// Extraction produced no text
    ExtractionFailed,
    /// Text yielded no sentences or no tokens
    InsufficientText(InsufficientText),
}

impl Outcome {
    /// Assigned level, if any
    pub fn level(&self) -> Option<Level> {
        match self {
            Outcome::Leveled { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Whether a level was assigned
    pub fn is_leveled(&self) -> bool {
        matches!(self, Outcome::Leveled { .. })
    }
}

/// One row of the result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Opaque book identifier, usually an ISBN
    pub identifier: String,
    /// Source name, usually the file name
    pub source: String,
    /// Assigned level; serialized as `"unknown"` when absent
    #[serde(serialize_with = "serialize_level")]
    pub level: Option<Level>,
    /// Natural-language explanation or failure reason
    pub justification: String,
    /// Raw feature summary; empty when no level was assigned
    pub evidence: String,
}

fn serialize_level<S>(level: &Option<Level>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match level {
        Some(level) => serializer.serialize_char(level.letter()),
        None => serializer.serialize_str(UNKNOWN_LEVEL),
    }
}

impl ClassificationResult {
    /// Build the row for an outcome
    pub fn from_outcome(
        identifier: impl Into<String>,
        source: impl Into<String>,
        outcome: Outcome,
        language: Language,
    ) -> Self {
        let (level, justification, evidence) = match outcome {
            Outcome::Leveled {
                level,
                features,
                justification,
                ..
            } => (Some(level), justification, features.evidence()),
            Outcome::ExtractionFailed => {
                (None, language.extraction_failed().to_string(), String::new())
            }
            Outcome::InsufficientText(_) => {
                (None, language.insufficient_text().to_string(), String::new())
            }
        };
        Self {
            identifier: identifier.into(),
            source: source.into(),
            level,
            justification,
            evidence,
        }
    }

    /// Level letter, or `"unknown"`
    pub fn level_label(&self) -> String {
        self.level
            .map_or_else(|| UNKNOWN_LEVEL.to_string(), |level| level.to_string())
    }

    /// Whether a level was assigned
    pub fn is_leveled(&self) -> bool {
        self.level.is_some()
    }
}

/// How a batch is scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One document at a time
    #[default]
    Sequential,
    /// Documents spread over a thread pool; output order is unchanged
    Parallel,
}

/// Builder for [`Leveler`]
#[derive(Debug, Clone, Default)]
pub struct LevelerBuilder {
    heuristics: Heuristics,
    language: Language,
    threads: Option<usize>,
}

impl LevelerBuilder {
    /// Create a builder with the standard calibration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the calibration
    pub fn heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    /// Set the justification language
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Worker threads for parallel batches; `None` uses rayon's global pool
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<Leveler> {
        self.heuristics.validate()?;
        if self.threads == Some(0) {
            return Err(LevelError::Config(
                "thread count must be greater than zero".to_string(),
            ));
        }
        Ok(Leveler {
            heuristics: self.heuristics,
            language: self.language,
            threads: self.threads,
        })
    }
}

/// Assigns levels to texts and documents.
///
/// A leveler holds no per-document state; the same instance can classify
/// any number of documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Leveler {
    heuristics: Heuristics,
    language: Language,
    threads: Option<usize>,
}

impl Leveler {
    /// Leveler with the standard calibration and English wording
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder
    pub fn builder() -> LevelerBuilder {
        LevelerBuilder::new()
    }

    /// Calibration in use
    pub fn heuristics(&self) -> &Heuristics {
        &self.heuristics
    }

    /// Justification language
    pub fn language(&self) -> Language {
        self.language
    }

    /// Level a text. The text is normalized first, so already normalized
    /// input passes through unchanged.
    pub fn assess<R: RubricLookup + ?Sized>(&self, text: &str, rubric: &R) -> Outcome {
        let text = normalize_text(text, self.heuristics.max_sample_chars);
        if text.is_empty() {
            return Outcome::ExtractionFailed;
        }

        let features = match compute_features(&text, &self.heuristics) {
            Ok(features) => features,
            Err(insufficient) => return Outcome::InsufficientText(insufficient),
        };

        let band = map_to_band(features.avg_sent_len, &self.heuristics.bands);
        let level = refine_letter(&band, &features, &self.heuristics.weights);
        let justification = justify(
            level,
            &band,
            &features,
            rubric,
            &self.heuristics.justification,
            self.language,
        );

        Outcome::Leveled {
            level,
            band,
            features,
            justification,
        }
    }

    /// Level a text and package the result row
    pub fn classify_text<R: RubricLookup + ?Sized>(
        &self,
        identifier: &str,
        source: &str,
        text: &str,
        rubric: &R,
    ) -> ClassificationResult {
        let outcome = self.assess(text, rubric);
        let result = ClassificationResult::from_outcome(identifier, source, outcome, self.language);
        log_result(&result);
        result
    }

    /// Extract and level one document
    pub fn classify_document<E, R>(
        &self,
        document: &Document,
        extractor: &E,
        rubric: &R,
    ) -> ClassificationResult
    where
        E: TextExtractor + ?Sized,
        R: RubricLookup + ?Sized,
    {
        let text = extractor.extract(document);
        self.classify_text(document.identifier(), document.name(), &text, rubric)
    }

    /// Classify documents one at a time, in input order
    pub fn classify_batch<E, R>(
        &self,
        documents: &[Document],
        extractor: &E,
        rubric: &R,
    ) -> Vec<ClassificationResult>
    where
        E: TextExtractor + ?Sized,
        R: RubricLookup + ?Sized,
    {
        self.classify_batch_with(documents, extractor, rubric, |_, _| {})
    }

    /// Classify documents sequentially, calling `observer` with the index
    /// and result of each document as soon as it is done
    pub fn classify_batch_with<E, R, F>(
        &self,
        documents: &[Document],
        extractor: &E,
        rubric: &R,
        mut observer: F,
    ) -> Vec<ClassificationResult>
    where
        E: TextExtractor + ?Sized,
        R: RubricLookup + ?Sized,
        F: FnMut(usize, &ClassificationResult),
    {
        log::info!("classifying {} documents sequentially", documents.len());
        documents
            .iter()
            .enumerate()
            .map(|(index, document)| {
                let result = self.classify_document(document, extractor, rubric);
                observer(index, &result);
                result
            })
            .collect()
    }

    /// Classify documents on a thread pool.
    ///
    /// Results are returned in input order and equal those of
    /// [`Leveler::classify_batch`]; `observer` is called in completion order.
    #[cfg(feature = "parallel")]
    pub fn classify_batch_parallel<E, R, F>(
        &self,
        documents: &[Document],
        extractor: &E,
        rubric: &R,
        observer: F,
    ) -> Result<Vec<ClassificationResult>>
    where
        E: TextExtractor + Sync + ?Sized,
        R: RubricLookup + Sync + ?Sized,
        F: Fn(&ClassificationResult) + Sync + Send,
    {
        use rayon::prelude::*;

        let run = || -> Vec<ClassificationResult> {
            documents
                .par_iter()
                .map(|document| {
                    let result = self.classify_document(document, extractor, rubric);
                    observer(&result);
                    result
                })
                .collect()
        };

        match self.threads {
            Some(threads) => {
                log::info!(
                    "classifying {} documents on {} threads",
                    documents.len(),
                    threads
                );
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| LevelError::ParallelError(e.to_string()))?;
                Ok(pool.install(run))
            }
            None => {
                log::info!(
                    "classifying {} documents on the global thread pool",
                    documents.len()
                );
                Ok(run())
            }
        }
    }

    /// Classify with an explicit execution mode.
    ///
    /// Without the `parallel` feature, [`ExecutionMode::Parallel`] runs
    /// sequentially.
    pub fn classify_batch_mode<E, R, F>(
        &self,
        documents: &[Document],
        extractor: &E,
        rubric: &R,
        mode: ExecutionMode,
        observer: F,
    ) -> Result<Vec<ClassificationResult>>
    where
        E: TextExtractor + Sync + ?Sized,
        R: RubricLookup + Sync + ?Sized,
        F: Fn(&ClassificationResult) + Sync + Send,
    {
        match mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                self.classify_batch_parallel(documents, extractor, rubric, observer)
            }
            _ => Ok(self.classify_batch_with(documents, extractor, rubric, |_, result| {
                observer(result)
            })),
        }
    }
}

fn log_result(result: &ClassificationResult) {
    if result.is_leveled() {
        log::debug!(
            "{} ({}): level {} [{}]",
            result.source,
            result.identifier,
            result.level_label(),
            result.evidence
        );
    } else {
        log::warn!("{}: {}", result.source, result.justification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::BANDS;
    use crate::ingest::PlainTextExtractor;
    use crate::rubric::{Rubric, RubricRow};

    const SIMPLE: &str = "The cat sat. The dog ran. We had fun.";

    fn rubric() -> Rubric {
        Rubric::from_rows(
            BANDS[0]
                .letters()
                .map(|level| RubricRow {
                    level,
                    structure: format!("structure {level}"),
                    vocabulary: format!("vocabulary {level}"),
                    images: String::new(),
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_assess_simple_text() {
        let leveler = Leveler::new();
        match leveler.assess(SIMPLE, &rubric()) {
            Outcome::Leveled {
                level,
                band,
                features,
                justification,
            } => {
                assert_eq!(band, BANDS[0]);
                assert!(band.contains(level));
                assert_eq!(features.num_sents, 3);
                assert!(justification.contains(&format!("rubric for level {level}")));
            }
            other => panic!("expected a level, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_whitespace_are_extraction_failures() {
        let leveler = Leveler::new();
        assert_eq!(leveler.assess("", &Rubric::default()), Outcome::ExtractionFailed);
        assert_eq!(leveler.assess(" \n\t ", &Rubric::default()), Outcome::ExtractionFailed);
    }

    #[test]
    fn test_punctuation_only_is_insufficient() {
        let leveler = Leveler::new();
        let outcome = leveler.assess("...!!!", &Rubric::default());
        assert!(matches!(outcome, Outcome::InsufficientText(_)));
        assert_eq!(outcome.level(), None);
    }

    #[test]
    fn test_sentinel_rows() {
        let leveler = Leveler::new();
        let failed = leveler.classify_text("123", "123.pdf", "", &Rubric::default());
        assert_eq!(failed.level, None);
        assert_eq!(failed.level_label(), "unknown");
        assert_eq!(failed.justification, "text extraction failed");
        assert_eq!(failed.evidence, "");

        let short = leveler.classify_text("123", "123.txt", "123 456.", &Rubric::default());
        assert_eq!(short.justification, "insufficient text for analysis");
        assert_eq!(short.evidence, "");
    }

    #[test]
    fn test_portuguese_sentinels() {
        let leveler = Leveler::builder()
            .language(Language::Portuguese)
            .build()
            .unwrap();
        let failed = leveler.classify_text("1", "1.pdf", "", &Rubric::default());
        assert_eq!(failed.justification, "Falha ao extrair texto");
        let short = leveler.classify_text("1", "1.txt", "!!!", &Rubric::default());
        assert_eq!(short.justification, "Texto insuficiente para análise");
    }

    #[test]
    fn test_result_serializes_level_label() {
        let leveler = Leveler::new();
        let leveled = leveler.classify_text("isbn", "isbn.txt", SIMPLE, &rubric());
        let json = serde_json::to_value(&leveled).unwrap();
        assert_eq!(json["level"], leveled.level_label());
        assert_eq!(json["identifier"], "isbn");

        let failed = leveler.classify_text("isbn", "isbn.txt", "", &rubric());
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["level"], "unknown");
    }

    #[test]
    fn test_classification_is_deterministic() {
        let leveler = Leveler::new();
        let first = leveler.classify_text("a", "a.txt", SIMPLE, &rubric());
        let second = leveler.classify_text("a", "a.txt", SIMPLE, &rubric());
        assert_eq!(first, second);
    }

    #[test]
    fn test_batch_keeps_input_order() {
        let documents = vec![
            Document::from_text("b.txt", SIMPLE),
            Document::from_text("a.pdf", ""),
            Document::from_text("c.txt", "Just one line"),
        ];
        let leveler = Leveler::new();
        let mut seen = Vec::new();
        let results = leveler.classify_batch_with(
            &documents,
            &PlainTextExtractor::default(),
            &rubric(),
            |index, _| seen.push(index),
        );
        let sources: Vec<&str> = results.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["b.txt", "a.pdf", "c.txt"]);
        assert_eq!(seen, vec![0, 1, 2]);
        assert!(!results[1].is_leveled());
        assert!(results[2].is_leveled());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let documents: Vec<Document> = (0..16)
            .map(|i| {
                let text = "Although the night was long, we kept walking. ".repeat(i + 1);
                Document::from_text(format!("{i}.txt"), text)
            })
            .collect();
        let leveler = Leveler::builder().threads(Some(3)).build().unwrap();
        let extractor = PlainTextExtractor::default();

        let sequential = leveler.classify_batch(&documents, &extractor, &rubric());
        let done = AtomicUsize::new(0);
        let parallel = leveler
            .classify_batch_parallel(&documents, &extractor, &rubric(), |_| {
                done.fetch_add(1, Ordering::Relaxed);
            })
            .unwrap();

        assert_eq!(parallel, sequential);
        assert_eq!(done.load(Ordering::Relaxed), documents.len());
    }

    #[test]
    fn test_builder_rejects_bad_configuration() {
        assert!(Leveler::builder().threads(Some(0)).build().is_err());

        let mut heuristics = Heuristics::default();
        heuristics.bands.e_to_i = 3.0;
        assert!(Leveler::builder().heuristics(heuristics).build().is_err());
    }
}
