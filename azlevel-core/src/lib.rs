//! Heuristic A–Z reading-level classification of book manuscripts
//!
//! Text is segmented into sentences and tokens, reduced to a small vector
//! of linguistic statistics, mapped to a coarse band by average sentence
//! length and then to a letter inside the band by a weighted composite of
//! the remaining statistics. Every level comes with a justification that
//! quotes the caller's rubric when it has a row for that level.
//!
//! ```
//! use azlevel_core::{Leveler, Rubric};
//!
//! let leveler = Leveler::new();
//! let result = leveler.classify_text(
//!     "9788535914849",
//!     "9788535914849.txt",
//!     "The cat sat on the mat. The dog ran to the park.",
//!     &Rubric::default(),
//! );
//! assert_eq!(result.level_label(), "C");
//! ```

#![warn(missing_docs)]

pub mod band;
pub mod classifier;
pub mod error;
pub mod features;
pub mod heuristics;
pub mod ingest;
pub mod isbn;
pub mod justify;
pub mod lexicon;
pub mod refine;
pub mod rubric;
pub mod segmenter;
pub mod text;

// Re-export key types
pub use band::{map_to_band, Band, Level, BANDS};
pub use classifier::{
    ClassificationResult, ExecutionMode, Leveler, LevelerBuilder, Outcome, UNKNOWN_LEVEL,
};
pub use error::{LevelError, Result};
pub use features::{compute_features, FeatureVector, InsufficientText};
pub use heuristics::{
    BandThresholds, Heuristics, JustificationThresholds, ScoreWeights, MAX_SAMPLE_CHARS,
};
pub use ingest::{
    extract_epub_text, extract_pdf_text, BookExtractor, Document, DocumentContent, DocumentFormat,
    PlainTextExtractor, TextExtractor,
};
pub use isbn::{extract_isbn, looks_like_isbn};
pub use justify::{justify, Language};
pub use refine::{composite_score, refine_letter};
pub use rubric::{Rubric, RubricColumn, RubricLookup, RubricRow};
pub use segmenter::{segment_sentences, tokenize};
pub use text::{normalize_text, NormalizedText};
