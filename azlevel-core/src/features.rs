//! Linguistic feature extraction

use crate::heuristics::Heuristics;
use crate::lexicon;
use crate::segmenter::{count_tokens, segment_sentences, tokenize};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Raised when text yields no sentences or no tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsufficientText {
    /// Sentences found
    pub sentences: usize,
    /// Tokens found
    pub tokens: usize,
}

impl fmt::Display for InsufficientText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insufficient text for analysis ({} sentences, {} tokens)",
            self.sentences, self.tokens
        )
    }
}

impl std::error::Error for InsufficientText {}

/// Scalar statistics describing one manuscript sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Mean token count per sentence
    pub avg_sent_len: f64,
    /// Distinct tokens over total tokens
    pub ttr: f64,
    /// Fraction of tokens at or above the long-word length
    pub long_word_ratio: f64,
    /// Tokens in the connective set
    pub connectives: usize,
    /// Tokens in the subordinator set
    pub sub_conj: usize,
    /// Comma characters per sentence
    pub commas_per_sent: f64,
    /// Number of sentences
    pub num_sents: usize,
    /// Number of tokens
    pub num_tokens: usize,
}

impl FeatureVector {
    /// Extract features with the standard calibration
    pub fn from_text(text: &str) -> Result<Self, InsufficientText> {
        compute_features(text, &Heuristics::default())
    }

    /// Connectives plus subordinators
    pub fn complexity_markers(&self) -> usize {
        self.connectives + self.sub_conj
    }

    /// One-line summary of the raw values behind a level
    pub fn evidence(&self) -> String {
        format!(
            "avg_sent_len={:.1} | commas_per_sent={:.2} | long_word_ratio={:.2} | connectives={}, sub_conj={}",
            self.avg_sent_len,
            self.commas_per_sent,
            self.long_word_ratio,
            self.connectives,
            self.sub_conj
        )
    }
}

/// Compute the feature vector of already normalized text.
///
/// Sentence lengths come from tokenizing each sentence on its own; ratios
/// and word-class counts use the token list of the whole text.
pub fn compute_features(
    text: &str,
    heuristics: &Heuristics,
) -> Result<FeatureVector, InsufficientText> {
    let sentences = segment_sentences(text);
    let tokens = tokenize(text);
    if tokens.is_empty() || sentences.is_empty() {
        return Err(InsufficientText {
            sentences: sentences.len(),
            tokens: tokens.len(),
        });
    }

    let num_sents = sentences.len();
    let num_tokens = tokens.len();
    let token_denominator = num_tokens.max(1) as f64;
    let sentence_denominator = num_sents.max(1) as f64;

    let sentence_lengths: usize = sentences.iter().map(|s| count_tokens(s)).sum();
    let avg_sent_len = sentence_lengths as f64 / sentence_denominator;

    let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
    let ttr = distinct.len() as f64 / token_denominator;

    let long_words = tokens
        .iter()
        .filter(|t| t.chars().count() >= heuristics.long_word_min_chars)
        .count();
    let long_word_ratio = long_words as f64 / token_denominator;

    let connectives = lexicon::connectives().count_in(&tokens);
    let sub_conj = lexicon::subordinators().count_in(&tokens);

    let commas = text.matches(',').count();
    let commas_per_sent = commas as f64 / sentence_denominator;

    Ok(FeatureVector {
        avg_sent_len,
        ttr,
        long_word_ratio,
        connectives,
        sub_conj,
        commas_per_sent,
        num_sents,
        num_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_simple_text() {
        let f = FeatureVector::from_text("The cat sat. The cat ran.").unwrap();
        assert_eq!(f.num_sents, 2);
        assert_eq!(f.num_tokens, 6);
        assert!(approx(f.avg_sent_len, 3.0));
        // the, cat, sat, ran
        assert!(approx(f.ttr, 4.0 / 6.0));
        assert!(approx(f.long_word_ratio, 0.0));
        assert!(approx(f.commas_per_sent, 0.0));
        assert_eq!(f.connectives, 0);
        assert_eq!(f.sub_conj, 0);
    }

    #[test]
    fn test_word_classes_and_commas() {
        let text = "Although it rained, we stayed because it was warm. \
                    However, the extraordinary weather continued, so we left.";
        let f = FeatureVector::from_text(text).unwrap();
        assert_eq!(f.num_sents, 2);
        // although, because, however
        assert_eq!(f.connectives, 3);
        // although, because, so
        assert_eq!(f.sub_conj, 3);
        assert!(approx(f.commas_per_sent, 1.5));
        assert_eq!(f.complexity_markers(), 6);
        // "extraordinary" and "continued" have at least nine letters
        assert!(approx(f.long_word_ratio, 2.0 / f.num_tokens as f64));
    }

    #[test]
    fn test_sentence_lengths_use_per_sentence_tokens() {
        let f = FeatureVector::from_text("One two three. Four.").unwrap();
        assert!(approx(f.avg_sent_len, 2.0));
    }

    #[test]
    fn test_long_word_counts_characters_not_bytes() {
        // "coração" has 7 characters but 9 bytes
        let f = FeatureVector::from_text("coração coração.").unwrap();
        assert!(approx(f.long_word_ratio, 0.0));
        let f = FeatureVector::from_text("informação.").unwrap();
        assert!(approx(f.long_word_ratio, 1.0));
    }

    #[test]
    fn test_insufficient_text() {
        let err = FeatureVector::from_text("...!!!").unwrap_err();
        assert_eq!(err, InsufficientText { sentences: 1, tokens: 0 });
        assert!(FeatureVector::from_text("").is_err());
        assert!(FeatureVector::from_text("123 456.").is_err());
        assert!(err.to_string().starts_with("insufficient text for analysis"));
    }

    #[test]
    fn test_custom_long_word_length() {
        let mut h = Heuristics::default();
        h.long_word_min_chars = 4;
        let f = compute_features("a tiny word.", &h).unwrap();
        assert!(approx(f.long_word_ratio, 2.0 / 3.0));
    }

    #[test]
    fn test_evidence_format() {
        let f = FeatureVector {
            avg_sent_len: 12.345,
            ttr: 0.5,
            long_word_ratio: 0.0789,
            connectives: 3,
            sub_conj: 4,
            commas_per_sent: 0.5,
            num_sents: 10,
            num_tokens: 123,
        };
        assert_eq!(
            f.evidence(),
            "avg_sent_len=12.3 | commas_per_sent=0.50 | long_word_ratio=0.08 | connectives=3, sub_conj=4"
        );
    }
}
