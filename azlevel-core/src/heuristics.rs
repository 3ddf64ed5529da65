//! Thresholds and weights driving the leveling heuristics
//!
//! Every literal the pipeline depends on lives here, so a calibration can be
//! swapped (from TOML or in code) without touching control flow. The
//! [`Default`] values are the standard calibration.

use crate::error::{LevelError, Result};
use serde::{Deserialize, Serialize};

/// Maximum number of characters sampled from each manuscript
pub const MAX_SAMPLE_CHARS: usize = 50_000;

/// Tokens with at least this many characters count as long words
pub const LONG_WORD_MIN_CHARS: usize = 9;

/// Complete heuristic calibration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    /// Cap applied to normalized text, in characters
    pub max_sample_chars: usize,
    /// Minimum character length of a long word
    pub long_word_min_chars: usize,
    /// Average sentence length cut points between bands
    pub bands: BandThresholds,
    /// Composite score weights used to pick a letter inside a band
    pub weights: ScoreWeights,
    /// Cut points used when wording the justification
    pub justification: JustificationThresholds,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            max_sample_chars: MAX_SAMPLE_CHARS,
            long_word_min_chars: LONG_WORD_MIN_CHARS,
            bands: BandThresholds::default(),
            weights: ScoreWeights::default(),
            justification: JustificationThresholds::default(),
        }
    }
}

impl Heuristics {
    /// The standard calibration
    pub fn standard() -> Self {
        Self::default()
    }

    /// Parse a calibration from TOML; absent keys keep their standard value
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let heuristics: Heuristics = toml::from_str(source)?;
        heuristics.validate()?;
        Ok(heuristics)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_sample_chars == 0 {
            return Err(LevelError::Config(
                "max_sample_chars must be greater than zero".to_string(),
            ));
        }
        if self.long_word_min_chars == 0 {
            return Err(LevelError::Config(
                "long_word_min_chars must be greater than zero".to_string(),
            ));
        }
        self.bands.validate()?;
        self.weights.validate()?;
        self.justification.validate()
    }
}

/// Inclusive upper bounds of average sentence length for the first four
/// bands; anything above `n_to_s` falls into T–Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandThresholds {
    /// Upper bound for A–D
    pub a_to_d: f64,
    /// Upper bound for E–I
    pub e_to_i: f64,
    /// Upper bound for J–M
    pub j_to_m: f64,
    /// Upper bound for N–S
    pub n_to_s: f64,
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            a_to_d: 6.0,
            e_to_i: 10.0,
            j_to_m: 14.0,
            n_to_s: 19.0,
        }
    }
}

impl BandThresholds {
    /// Bounds in band order
    pub fn upper_bounds(&self) -> [f64; 4] {
        [self.a_to_d, self.e_to_i, self.j_to_m, self.n_to_s]
    }

    fn validate(&self) -> Result<()> {
        let bounds = self.upper_bounds();
        if bounds.iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(LevelError::Config(
                "band thresholds must be finite and non-negative".to_string(),
            ));
        }
        if bounds.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(LevelError::Config(format!(
                "band thresholds must be strictly increasing, got {bounds:?}"
            )));
        }
        Ok(())
    }
}

/// Weights and saturation points of the four composite score terms.
///
/// Each term is `weight * min(1, feature * scale)` (or `feature / saturation`),
/// so a term never exceeds its weight. The weights are not normalized; with
/// the standard values the score tops out at 2.6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the long-word term
    pub long_words: f64,
    /// Multiplier applied to the long-word ratio before capping
    pub long_word_scale: f64,
    /// Weight of the type-token ratio term
    pub lexical_diversity: f64,
    /// Multiplier applied to the type-token ratio before capping
    pub lexical_diversity_scale: f64,
    /// Weight of the commas-per-sentence term
    pub commas: f64,
    /// Commas per sentence at which the term saturates
    pub comma_saturation: f64,
    /// Weight of the connective + subordinator term
    pub connectives: f64,
    /// Connective + subordinator count at which the term saturates
    pub connective_saturation: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            long_words: 0.8,
            long_word_scale: 5.0,
            lexical_diversity: 0.6,
            lexical_diversity_scale: 2.0,
            commas: 0.7,
            comma_saturation: 2.0,
            connectives: 0.5,
            connective_saturation: 10.0,
        }
    }
}

impl ScoreWeights {
    /// Highest score reachable with these weights
    pub fn max_score(&self) -> f64 {
        self.long_words + self.lexical_diversity + self.commas + self.connectives
    }

    fn validate(&self) -> Result<()> {
        let weights = [
            self.long_words,
            self.lexical_diversity,
            self.commas,
            self.connectives,
        ];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(LevelError::Config(
                "score weights must be finite and non-negative".to_string(),
            ));
        }
        let scales = [
            self.long_word_scale,
            self.lexical_diversity_scale,
            self.comma_saturation,
            self.connective_saturation,
        ];
        if scales.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(LevelError::Config(
                "score scales must be finite and positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cut points for the qualitative statements of a justification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JustificationThresholds {
    /// Average sentence length at or above which complexity is "high"
    pub high_complexity_min: f64,
    /// Average sentence length at or below which complexity is "low"
    pub low_complexity_max: f64,
    /// Commas per sentence strictly above which sentences read as compound
    pub compound_commas_above: f64,
    /// Connective + subordinator count at which sentences read as compound
    pub compound_connectives_min: usize,
    /// Long-word ratio at or above which vocabulary reads as long
    pub long_vocabulary_min: f64,
}

impl Default for JustificationThresholds {
    fn default() -> Self {
        Self {
            high_complexity_min: 15.0,
            low_complexity_max: 6.0,
            compound_commas_above: 0.3,
            compound_connectives_min: 2,
            long_vocabulary_min: 0.08,
        }
    }
}

impl JustificationThresholds {
    fn validate(&self) -> Result<()> {
        if self.low_complexity_max > self.high_complexity_min {
            return Err(LevelError::Config(format!(
                "low_complexity_max ({}) exceeds high_complexity_min ({})",
                self.low_complexity_max, self.high_complexity_min
            )));
        }
        Ok(())
    }
}
