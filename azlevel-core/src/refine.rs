//! Letter selection inside a band

use crate::band::{Band, Level};
use crate::features::FeatureVector;
use crate::heuristics::ScoreWeights;

/// Weighted composite of the non-length features.
///
/// Each term is capped at its weight but the sum is not normalized, so any
/// strong feature pushes the letter toward the top of the band.
pub fn composite_score(features: &FeatureVector, weights: &ScoreWeights) -> f64 {
    let long_words = (features.long_word_ratio * weights.long_word_scale).min(1.0);
    let diversity = (features.ttr * weights.lexical_diversity_scale).min(1.0);
    let commas = (features.commas_per_sent / weights.comma_saturation).min(1.0);
    let markers =
        (features.complexity_markers() as f64 / weights.connective_saturation).min(1.0);

    weights.long_words * long_words
        + weights.lexical_diversity * diversity
        + weights.commas * commas
        + weights.connectives * markers
}

/// Index into a band of `band_len` letters for a composite score.
///
/// Ties round to even; the result is clamped into the band.
pub fn letter_index(score: f64, band_len: usize) -> usize {
    let last = band_len.saturating_sub(1);
    let raw = (score * last as f64).round_ties_even();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= last as f64 {
        last
    } else {
        raw as usize
    }
}

/// Pick the letter inside `band` for the given features
pub fn refine_letter(band: &Band, features: &FeatureVector, weights: &ScoreWeights) -> Level {
    let score = composite_score(features, weights);
    let index = letter_index(score, band.len());
    band.letter_at(index).unwrap_or_else(|| band.end())
}
