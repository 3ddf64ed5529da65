//! Natural-language justification of an assigned level

use crate::band::{Band, Level};
use crate::features::FeatureVector;
use crate::heuristics::JustificationThresholds;
use crate::rubric::RubricLookup;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language of justification text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English wording
    #[default]
    English,
    /// Portuguese wording
    Portuguese,
}

impl Language {
    /// Language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Portuguese => "pt",
        }
    }

    /// Parse a code or name such as `"pt"` or `"Portuguese"`
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Language::English),
            "pt" | "pt-br" | "por" | "portuguese" | "português" => Some(Language::Portuguese),
            _ => None,
        }
    }

    /// Justification recorded when no text could be extracted
    pub fn extraction_failed(&self) -> &'static str {
        match self {
            Language::English => "text extraction failed",
            Language::Portuguese => "Falha ao extrair texto",
        }
    }

    /// Justification recorded when the text is too short to measure
    pub fn insufficient_text(&self) -> &'static str {
        match self {
            Language::English => "insufficient text for analysis",
            Language::Portuguese => "Texto insuficiente para análise",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Portuguese => write!(f, "Portuguese"),
        }
    }
}

/// Qualitative sentence complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    /// Short sentences
    Low,
    /// Neither short nor long
    Moderate,
    /// Long sentences
    High,
}

impl Complexity {
    /// Classify an average sentence length; `high` is checked first
    pub fn of(avg_sent_len: f64, thresholds: &JustificationThresholds) -> Self {
        if avg_sent_len >= thresholds.high_complexity_min {
            Complexity::High
        } else if avg_sent_len <= thresholds.low_complexity_max {
            Complexity::Low
        } else {
            Complexity::Moderate
        }
    }

    fn word(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, Complexity::High) => "high",
            (Language::English, Complexity::Low) => "low",
            (Language::English, Complexity::Moderate) => "moderate",
            (Language::Portuguese, Complexity::High) => "alta",
            (Language::Portuguese, Complexity::Low) => "baixa",
            (Language::Portuguese, Complexity::Moderate) => "moderada",
        }
    }
}

/// Whether sentences read as compound
pub fn is_compound(features: &FeatureVector, thresholds: &JustificationThresholds) -> bool {
    features.commas_per_sent > thresholds.compound_commas_above
        || features.complexity_markers() >= thresholds.compound_connectives_min
}

/// Whether vocabulary reads as long
pub fn has_long_vocabulary(features: &FeatureVector, thresholds: &JustificationThresholds) -> bool {
    features.long_word_ratio >= thresholds.long_vocabulary_min
}

/// Assemble the justification for `level`.
///
/// Three statements (sentence complexity, sentence structure, vocabulary)
/// are always present. A fourth quoting the rubric is appended only when the
/// rubric describes `level`.
pub fn justify<R: RubricLookup + ?Sized>(
    level: Level,
    band: &Band,
    features: &FeatureVector,
    rubric: &R,
    thresholds: &JustificationThresholds,
    language: Language,
) -> String {
    debug_assert!(band.contains(level), "{level} outside band {band}");

    let complexity = Complexity::of(features.avg_sent_len, thresholds).word(language);
    let mut parts = Vec::with_capacity(4);

    parts.push(match language {
        Language::English => format!(
            "Average of {:.1} words per sentence; {} sentence complexity.",
            features.avg_sent_len, complexity
        ),
        Language::Portuguese => format!(
            "Média de {:.1} palavras por frase; {} complexidade frasal.",
            features.avg_sent_len, complexity
        ),
    });

    parts.push(
        match (language, is_compound(features, thresholds)) {
            (Language::English, true) => {
                "Connectives, subordination and comma use indicate compound sentences."
            }
            (Language::English, false) => {
                "Few connectives or subordinators; sentences are simple and direct."
            }
            (Language::Portuguese, true) => {
                "Presença de conectivos/subordinação e uso de vírgulas indicando orações compostas."
            }
            (Language::Portuguese, false) => {
                "Poucos conectivos/subordinação; frases mais simples e diretas."
            }
        }
        .to_string(),
    );

    parts.push(
        match (language, has_long_vocabulary(features, thresholds)) {
            (Language::English, true) => {
                "Vocabulary with a notable share of long words (9+ letters)."
            }
            (Language::English, false) => "Vocabulary made mostly of short, frequent words.",
            (Language::Portuguese, true) => {
                "Vocabulário com proporção relevante de palavras longas (≥9 letras)."
            }
            (Language::Portuguese, false) => {
                "Vocabulário predominantemente de palavras curtas e frequentes."
            }
        }
        .to_string(),
    );

    if let Some(row) = rubric.lookup(level) {
        parts.push(match language {
            Language::English => format!(
                "Aligned with the rubric for level {}: {} | {}",
                level, row.structure, row.vocabulary
            ),
            Language::Portuguese => format!(
                "Alinhado à rubrica do nível {}: {} | {}",
                level, row.structure, row.vocabulary
            ),
        });
    }

    parts.join(" ")
}
