//! Sentence and word segmentation
//!
//! Sentences end at a run of `.`, `!` or `?` followed by whitespace; the
//! delimiter is consumed. Words are maximal runs of Latin letters (accented
//! Latin-1 letters included) and apostrophes, lowercased.

use regex::Regex;
use std::sync::OnceLock;

/// Sentence delimiter: terminal punctuation run plus one whitespace char
pub const SENTENCE_DELIMITER: &str = r"[.!?]+\s";

/// Token character class
pub const TOKEN_PATTERN: &str = r"[A-Za-zÀ-ÖØ-öø-ÿ']+";

fn sentence_delimiter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(SENTENCE_DELIMITER).expect("sentence delimiter is a valid regex")
    })
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Split text into trimmed, non-empty sentences
pub fn segment_sentences(text: &str) -> Vec<&str> {
    sentence_delimiter()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercase the text and extract word tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    token_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Number of tokens without materializing them
pub fn count_tokens(text: &str) -> usize {
    token_regex().find_iter(&text.to_lowercase()).count()
}

/// Whether `ch` may appear inside a token
pub fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || ch == '\''
        || ('\u{C0}'..='\u{D6}').contains(&ch)
        || ('\u{D8}'..='\u{F6}').contains(&ch)
        || ('\u{F8}'..='\u{FF}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_sentences() {
        let sentences = segment_sentences("The cat sat. The dog ran! Did it stop? Yes.");
        assert_eq!(
            sentences,
            vec!["The cat sat", "The dog ran", "Did it stop", "Yes."]
        );
    }

    #[test]
    fn test_terminal_runs_are_one_delimiter() {
        let sentences = segment_sentences("Wait... What?! No way.");
        assert_eq!(sentences, vec!["Wait", "What", "No way."]);
    }

    #[test]
    fn test_punctuation_without_space_does_not_split() {
        let sentences = segment_sentences("It cost 3.50 at the U.S.A. shop.");
        assert_eq!(sentences, vec!["It cost 3.50 at the U.S.A", "shop."]);
    }

    #[test]
    fn test_no_terminal_punctuation() {
        assert_eq!(segment_sentences("just some words"), vec!["just some words"]);
        assert!(segment_sentences("").is_empty());
        assert!(segment_sentences("   ").is_empty());
    }

    #[test]
    fn test_punctuation_only_fragments_survive_as_sentences() {
        // "..." not followed by whitespace is not a delimiter
        assert_eq!(segment_sentences("...!!!"), vec!["...!!!"]);
        // but a delimiter followed by nothing leaves empty fragments
        assert!(segment_sentences("... ").is_empty());
    }

    #[test]
    fn test_tokenize_lowercases_and_keeps_apostrophes() {
        let tokens = tokenize("Don't STOP, Mary's friend!");
        assert_eq!(tokens, vec!["don't", "stop", "mary's", "friend"]);
    }

    #[test]
    fn test_tokenize_accented_latin() {
        let tokens = tokenize("Ação, coração e ÉPOCA.");
        assert_eq!(tokens, vec!["ação", "coração", "e", "época"]);
    }

    #[test]
    fn test_tokenize_drops_digits_and_symbols() {
        let tokens = tokenize("Room 101 costs $20 - ok?");
        assert_eq!(tokens, vec!["room", "costs", "ok"]);
    }

    #[test]
    fn test_tokenize_splits_on_non_latin1_letters() {
        // 'ł' and 'ő' are outside the Latin-1 ranges
        let tokens = tokenize("Łódź Erdős");
        assert_eq!(tokens, vec!["ód", "erd", "s"]);
    }

    #[test]
    fn test_bare_apostrophe_is_a_token() {
        assert_eq!(tokenize("' ''"), vec!["'", "''"]);
    }

    #[test]
    fn test_count_tokens_matches_tokenize() {
        let text = "One two, three! Four-five.";
        assert_eq!(count_tokens(text), tokenize(text).len());
    }

    #[test]
    fn test_token_char_class() {
        assert!(is_token_char('a'));
        assert!(is_token_char('Z'));
        assert!(is_token_char('\''));
        assert!(is_token_char('é'));
        assert!(is_token_char('ÿ'));
        assert!(!is_token_char('×'));
        assert!(!is_token_char('÷'));
        assert!(!is_token_char('1'));
        assert!(!is_token_char('-'));
    }
}
